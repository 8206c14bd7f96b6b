/// Golden canonical-form test: a fixed payment value must serialize to the
/// frozen v1 document and hash to the permanent v1 value.
///
/// This test must NEVER be modified to match new behavior.
/// If it fails, the canonical format has changed without a version bump.
use std::fs;

use quo_types::asset::{credit_asset, NATIVE_ASSET};
use quo_types::hashing::{
    canonical_deserialize, canonical_hash, canonical_serialize, CANONICAL_FORMAT_VERSION,
};
use quo_types::{raw_equal, AssetAmount, Number, Type, Value};

fn read_trimmed(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
        .trim()
        .to_string()
}

fn payment() -> Value {
    let third = Number::from_i64(1)
        .checked_div(&Number::from_i64(3))
        .unwrap();
    Value::object([
        ("amount", Value::asset_amount(AssetAmount::new(25_123_456))),
        ("asset", credit_asset("USD", "GISSUER")),
        ("destination", NATIVE_ASSET.clone()),
        ("memo", Value::null(Type::String)),
        ("price", Value::number(Number::must_parse("0.125"))),
        ("ratio", Value::number(third)),
        (
            "tags",
            Value::list(Type::String, vec![Value::string("a"), Value::string("b")]),
        ),
    ])
}

#[test]
fn golden_document_bytes_match() {
    let bytes = canonical_serialize(&payment()).unwrap();
    let expected = read_trimmed("tests/golden/payment_document.json");
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        expected,
        "GOLDEN TEST FAILED: canonical document bytes changed."
    );
}

#[test]
fn golden_hash_matches() {
    let hash = canonical_hash(&payment()).unwrap();
    let expected = read_trimmed("tests/golden/expected_hash.txt");
    assert_eq!(
        hash, expected,
        "GOLDEN TEST FAILED: canonical hash changed.\n\
         Got:      {}\n\
         Expected: {}",
        hash, expected
    );
}

#[test]
fn golden_document_reads_back() {
    let doc = read_trimmed("tests/golden/payment_document.json");
    let value = canonical_deserialize(doc.as_bytes()).unwrap();
    assert!(raw_equal(&value, &payment()));
}

#[test]
fn golden_hash_is_independent_of_number_spelling() {
    let mut respelled = payment();
    if let Value::Known(quo_types::Known::Object(attrs)) = &mut respelled {
        attrs.insert(
            "price".to_string(),
            Value::number(AssetAmount::new(1_250_000).to_number()),
        );
    }
    assert_eq!(
        canonical_hash(&respelled).unwrap(),
        read_trimmed("tests/golden/expected_hash.txt")
    );
}

#[test]
fn format_version_is_one() {
    assert_eq!(CANONICAL_FORMAT_VERSION, 1);
}
