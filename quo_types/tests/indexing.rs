//! Indexing scenarios, including the diagnostics a user would see.

use quo_types::{index, DiagnosticCode, Number, Severity, SourcePos, SourceRange, Type, Value};

fn one_two_three() -> Value {
    Value::tuple(vec![
        Value::number_int(1),
        Value::number_int(2),
        Value::number_int(3),
    ])
}

fn usd() -> Value {
    Value::object([("code", Value::string("USD"))])
}

fn subject() -> SourceRange {
    SourceRange {
        filename: "payments.quo".to_string(),
        start: SourcePos { line: 7, column: 3, byte: 120 },
        end: SourcePos { line: 7, column: 15, byte: 132 },
    }
}

#[test]
fn tuple_element_by_number() {
    assert_eq!(index(&one_two_three(), &Value::number_int(0), None), Ok(Value::number_int(1)));
}

#[test]
fn tuple_index_out_of_range() {
    let diag = index(&one_two_three(), &Value::number_int(5), Some(&subject())).unwrap_err();
    assert_eq!(diag.code, DiagnosticCode::IndexNotFound);
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.summary, "Invalid index");
    assert_eq!(diag.subject, Some(subject()));
}

#[test]
fn tuple_fractional_index() {
    let key = Value::number(Number::must_parse("1.5"));
    let diag = index(&one_two_three(), &key, None).unwrap_err();
    assert_eq!(diag.code, DiagnosticCode::FractionalIndex);
    assert!(diag.detail.contains("requires a whole number"));
}

#[test]
fn object_attribute_by_name() {
    assert_eq!(index(&usd(), &Value::string("code"), None), Ok(Value::string("USD")));
}

#[test]
fn object_missing_attribute() {
    let diag = index(&usd(), &Value::string("missing"), None).unwrap_err();
    assert_eq!(diag.code, DiagnosticCode::IndexNotFound);
}

#[test]
fn null_collection() {
    for key in [Value::number_int(0), Value::string("code"), Value::null(Type::String)] {
        let diag = index(&Value::null(Type::list(Type::String)), &key, Some(&subject())).unwrap_err();
        assert_eq!(diag.code, DiagnosticCode::IndexOnNull);
        assert_eq!(diag.summary, "Attempt to index null value");
        assert_eq!(
            diag.to_string(),
            "payments.quo:7,3-7,15: error: Attempt to index null value; \
             This value is null, so it does not have any indices."
        );
    }
}

#[test]
fn list_by_string_key() {
    let list = Value::list(Type::String, vec![Value::string("a"), Value::string("b")]);
    assert_eq!(index(&list, &Value::string("1"), None), Ok(Value::string("b")));
    let diag = index(&list, &Value::string("one"), None).unwrap_err();
    assert_eq!(diag.code, DiagnosticCode::InvalidIndexKey);
    assert_eq!(
        diag.detail,
        "The given key does not identify an element in this collection value: \
         a number is required."
    );
}

#[test]
fn asset_amount_key_is_widened() {
    let list = Value::list(Type::Bool, vec![Value::bool(false), Value::bool(true)]);
    let key = Value::asset_amount(quo_types::AssetAmount::new(10_000_000));
    assert_eq!(index(&list, &key, None), Ok(Value::bool(true)));
    let half = Value::asset_amount(quo_types::AssetAmount::new(5_000_000));
    assert_eq!(
        index(&list, &half, None).unwrap_err().code,
        DiagnosticCode::FractionalIndex
    );
}

#[test]
fn element_may_itself_be_null() {
    let list = Value::list(Type::String, vec![Value::null(Type::String)]);
    assert_eq!(index(&list, &Value::number_int(0), None), Ok(Value::null(Type::String)));
}

#[test]
fn unknown_values_propagate() {
    let list = Value::unknown(Type::list(Type::NUMBER));
    assert_eq!(
        index(&list, &Value::number_int(3), None),
        Ok(Value::unknown(Type::NUMBER))
    );
    assert_eq!(
        index(&one_two_three(), &Value::unknown(Type::NUMBER), None),
        Ok(Value::dynamic())
    );
    assert_eq!(
        index(&usd(), &Value::unknown(Type::String), None),
        Ok(Value::dynamic())
    );
}
