//! Debug rendering as Rust constructor expressions.
//!
//! The output of `value_repr` is source text that rebuilds the value, so
//! test failures can be pasted straight back into a test.

use crate::number::{Number, DEFAULT_PRECISION};
use crate::ty::{Capsule, Type};
use crate::value::{Known, Value};

pub fn type_repr(ty: &Type) -> String {
    match ty {
        Type::String => "Type::String".to_string(),
        Type::Bool => "Type::Bool".to_string(),
        Type::HostNumber => "Type::HostNumber".to_string(),
        Type::Dynamic => "Type::Dynamic".to_string(),
        Type::List(t) => format!("Type::list({})", type_repr(t)),
        Type::Map(t) => format!("Type::map({})", type_repr(t)),
        Type::Tuple(ts) => format!("Type::tuple(vec![{}])", join(ts.iter().map(type_repr))),
        Type::Object(attrs) => format!(
            "Type::object([{}])",
            join(attrs.iter().map(|(k, t)| format!("({:?}, {})", k, type_repr(t))))
        ),
        Type::Capsule(Capsule::Number) => "Type::NUMBER".to_string(),
        Type::Capsule(Capsule::AssetAmount) => "Type::ASSET_AMOUNT".to_string(),
        Type::Capsule(Capsule::Opaque(name)) => format!("Type::opaque({:?})", name),
    }
}

/// Constructor expression for a Number.
///
/// Non-integers are spelled with the 14-digit display precision, so a
/// repeating fraction reproduces only approximately.
pub fn number_repr(n: &Number) -> String {
    if n.is_zero() {
        return "Number::zero()".to_string();
    }
    match n.to_i64() {
        Some(i) => format!("Number::from_i64({})", i),
        None => format!("Number::must_parse({:?})", n.render(DEFAULT_PRECISION)),
    }
}

pub fn value_repr(value: &Value) -> String {
    match value {
        Value::Null(ty) => format!("Value::null({})", type_repr(ty)),
        Value::Unknown(Type::Dynamic) => "Value::dynamic()".to_string(),
        Value::Unknown(ty) => format!("Value::unknown({})", type_repr(ty)),
        Value::Known(known) => known_repr(known),
    }
}

fn known_repr(known: &Known) -> String {
    match known {
        Known::String(s) => format!("Value::string({:?})", s),
        Known::Bool(b) => format!("Value::bool({})", b),
        Known::HostNumber(n) => format!("Value::host_number({:?})", n),
        Known::Number(n) => format!("Value::number({})", number_repr(n)),
        Known::AssetAmount(a) => format!("Value::asset_amount(AssetAmount::new({}))", a.raw()),
        Known::List { element, items } => format!(
            "Value::list({}, vec![{}])",
            type_repr(element),
            join(items.iter().map(value_repr))
        ),
        Known::Map { element, entries } => format!(
            "Value::map({}, BTreeMap::from([{}]))",
            type_repr(element),
            join(
                entries
                    .iter()
                    .map(|(k, v)| format!("({:?}.to_string(), {})", k, value_repr(v)))
            )
        ),
        Known::Tuple(items) => format!("Value::tuple(vec![{}])", join(items.iter().map(value_repr))),
        Known::Object(attrs) => format!(
            "Value::object([{}])",
            join(attrs.iter().map(|(k, v)| format!("({:?}, {})", k, value_repr(v))))
        ),
        Known::Opaque { capsule, payload } => {
            format!("Value::opaque({:?}, vec!{:?})", capsule, payload)
        }
    }
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::AssetAmount;

    #[test]
    fn test_number_forms() {
        assert_eq!(value_repr(&Value::number(Number::zero())), "Value::number(Number::zero())");
        assert_eq!(
            value_repr(&Value::number_int(-42)),
            "Value::number(Number::from_i64(-42))"
        );
        assert_eq!(
            value_repr(&Value::number(Number::must_parse("1.5"))),
            "Value::number(Number::must_parse(\"1.50000000000000\"))"
        );
        assert_eq!(
            number_repr(&Number::must_parse("1e30")),
            "Number::must_parse(\"1000000000000000000000000000000.00000000000000\")"
        );
    }

    #[test]
    fn test_null_and_unknown() {
        assert_eq!(value_repr(&Value::null(Type::String)), "Value::null(Type::String)");
        assert_eq!(value_repr(&Value::dynamic()), "Value::dynamic()");
        assert_eq!(
            value_repr(&Value::unknown(Type::list(Type::NUMBER))),
            "Value::unknown(Type::list(Type::NUMBER))"
        );
    }

    #[test]
    fn test_composites() {
        let v = Value::object([
            ("amount", Value::asset_amount(AssetAmount::new(5))),
            ("tags", Value::tuple(vec![Value::string("a"), Value::bool(false)])),
        ]);
        assert_eq!(
            value_repr(&v),
            "Value::object([(\"amount\", Value::asset_amount(AssetAmount::new(5))), \
             (\"tags\", Value::tuple(vec![Value::string(\"a\"), Value::bool(false)]))])"
        );
        assert_eq!(
            type_repr(&Type::object([("issuer", Type::String)])),
            "Type::object([(\"issuer\", Type::String)])"
        );
        assert_eq!(
            value_repr(&Value::opaque("duration", vec![1, 2])),
            "Value::opaque(\"duration\", vec![1, 2])"
        );
    }

    #[test]
    fn test_repr_of_number_reparses() {
        let n = Number::must_parse("-2.5123456");
        let text = n.render(DEFAULT_PRECISION);
        assert_eq!(Number::must_parse(&text), n);
    }
}
