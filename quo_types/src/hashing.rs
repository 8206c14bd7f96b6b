//! Canonical serialization + SHA-256 hashing of values.
//!
//! Produces byte-identical output across platforms for raw-equal values.
//!
//! Rules:
//!   - Document fields in fixed order: format_version, type, value
//!   - Object attributes and map keys sorted (UTF-8 byte order)
//!   - Number and host number as exact "numer/denom" in lowest terms
//!   - Asset amount as its raw integer
//!   - Opaque capsule payload as lowercase hex
//!   - UTF-8 JSON, no whitespace, no float
//!   - Unknown values have no canonical form

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde_json::{Map, Value as Json};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::amount::AssetAmount;
use crate::number::{Number, NumberError};
use crate::ty::{Capsule, Type};
use crate::value::{Known, Value};

/// Bumped on any change to the byte layout. Old hashes stay valid only for
/// documents carrying the old version.
pub const CANONICAL_FORMAT_VERSION: u64 = 1;

#[derive(Debug, Error)]
pub enum CanonicalError {
    #[error("unknown values have no canonical form")]
    UnknownValue,

    #[error("unsupported canonical format version {0}")]
    FormatVersion(u64),

    #[error("{path}: expected {expected}")]
    Shape { path: String, expected: &'static str },

    #[error(transparent)]
    Number(#[from] NumberError),

    #[error("invalid canonical JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn shape(path: &str, expected: &'static str) -> CanonicalError {
    CanonicalError::Shape {
        path: if path.is_empty() { "value".to_string() } else { path.to_string() },
        expected,
    }
}

/// Canonical serialization to UTF-8 JSON bytes.
pub fn canonical_serialize(value: &Value) -> Result<Vec<u8>, CanonicalError> {
    let doc = canonical_document(value)?;
    Ok(serde_json::to_vec(&doc)?)
}

/// SHA-256 of canonical serialization. Lowercase hex string.
pub fn canonical_hash(value: &Value) -> Result<String, CanonicalError> {
    let bytes = canonical_serialize(value)?;
    Ok(hex(&Sha256::digest(&bytes)))
}

/// Build the canonical document in strict field order.
pub fn canonical_document(value: &Value) -> Result<Json, CanonicalError> {
    let mut root = Map::new();
    root.insert(
        "format_version".to_string(),
        Json::Number(CANONICAL_FORMAT_VERSION.into()),
    );
    root.insert("type".to_string(), serde_json::to_value(value.ty())?);
    root.insert("value".to_string(), canonical_value(value)?);
    Ok(Json::Object(root))
}

/// The `value` part of a canonical document. Untagged: the document's
/// type says how to read it back.
pub fn canonical_value(value: &Value) -> Result<Json, CanonicalError> {
    let known = match value {
        Value::Null(_) => return Ok(Json::Null),
        Value::Unknown(_) => return Err(CanonicalError::UnknownValue),
        Value::Known(known) => known,
    };
    let json = match known {
        Known::String(s) => Json::String(s.clone()),
        Known::Bool(b) => Json::Bool(*b),
        Known::HostNumber(f) => Json::String(ratio_text(&Number::from_f64(*f)?)),
        Known::Number(n) => Json::String(ratio_text(n)),
        Known::AssetAmount(a) => Json::Number(a.raw().into()),
        Known::List { items, .. } | Known::Tuple(items) => Json::Array(
            items
                .iter()
                .map(canonical_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Known::Map { entries: attrs, .. } | Known::Object(attrs) => {
            // BTreeMap iteration is already sorted by key.
            let mut obj = Map::new();
            for (k, v) in attrs {
                obj.insert(k.clone(), canonical_value(v)?);
            }
            Json::Object(obj)
        }
        Known::Opaque { payload, .. } => Json::String(hex(payload)),
    };
    Ok(json)
}

/// Parse canonical bytes back into a value.
pub fn canonical_deserialize(bytes: &[u8]) -> Result<Value, CanonicalError> {
    let doc: Json = serde_json::from_slice(bytes)?;
    let version = doc
        .get("format_version")
        .and_then(Json::as_u64)
        .ok_or_else(|| shape("format_version", "an integer"))?;
    if version != CANONICAL_FORMAT_VERSION {
        return Err(CanonicalError::FormatVersion(version));
    }
    let ty: Type = serde_json::from_value(doc.get("type").cloned().unwrap_or(Json::Null))?;
    let value = doc.get("value").ok_or_else(|| shape("value", "a value"))?;
    value_from_canonical(&ty, value)
}

/// Read the `value` part of a canonical document as type `ty`.
pub fn value_from_canonical(ty: &Type, json: &Json) -> Result<Value, CanonicalError> {
    read_at("", ty, json)
}

fn read_at(path: &str, ty: &Type, json: &Json) -> Result<Value, CanonicalError> {
    if json.is_null() {
        return Ok(Value::null(ty.clone()));
    }
    let value = match ty {
        Type::String => Value::string(json.as_str().ok_or_else(|| shape(path, "a string"))?),
        Type::Bool => Value::bool(json.as_bool().ok_or_else(|| shape(path, "a bool"))?),
        Type::HostNumber => {
            let n = read_ratio(path, json)?;
            let f = n
                .as_ratio()
                .to_f64()
                .ok_or_else(|| shape(path, "a finite number"))?;
            Value::host_number(f)
        }
        Type::Capsule(Capsule::Number) => Value::number(read_ratio(path, json)?),
        Type::Capsule(Capsule::AssetAmount) => Value::asset_amount(AssetAmount::new(
            json.as_i64().ok_or_else(|| shape(path, "an integer"))?,
        )),
        Type::Capsule(Capsule::Opaque(name)) => {
            let text = json.as_str().ok_or_else(|| shape(path, "a hex string"))?;
            Value::opaque(name.clone(), unhex(text).ok_or_else(|| shape(path, "a hex string"))?)
        }
        Type::List(element) => {
            let items = json.as_array().ok_or_else(|| shape(path, "an array"))?;
            let items = items
                .iter()
                .enumerate()
                .map(|(i, item)| read_at(&format!("{}[{}]", path, i), element, item))
                .collect::<Result<Vec<_>, _>>()?;
            Value::list((**element).clone(), items)
        }
        Type::Tuple(elements) => {
            let items = json.as_array().ok_or_else(|| shape(path, "an array"))?;
            if items.len() != elements.len() {
                return Err(shape(path, "an array matching the tuple length"));
            }
            let items = elements
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (t, item))| read_at(&format!("{}[{}]", path, i), t, item))
                .collect::<Result<Vec<_>, _>>()?;
            Value::tuple(items)
        }
        Type::Map(element) => {
            let obj = json.as_object().ok_or_else(|| shape(path, "an object"))?;
            let mut entries = std::collections::BTreeMap::new();
            for (k, v) in obj {
                let v = read_at(&format!("{}[{:?}]", path, k), element, v)?;
                entries.insert(k.clone(), v);
            }
            Value::map((**element).clone(), entries)
        }
        Type::Object(attrs) => {
            let obj = json.as_object().ok_or_else(|| shape(path, "an object"))?;
            if obj.len() != attrs.len() {
                return Err(shape(path, "exactly the declared attributes"));
            }
            let mut out = Vec::with_capacity(attrs.len());
            for (name, t) in attrs {
                let v = obj
                    .get(name)
                    .ok_or_else(|| shape(path, "exactly the declared attributes"))?;
                out.push((name.clone(), read_at(&format!("{}.{}", path, name), t, v)?));
            }
            Value::object(out)
        }
        // Only null or unknown values have the dynamic type.
        Type::Dynamic => return Err(shape(path, "null for a dynamic type")),
    };
    Ok(value)
}

fn ratio_text(n: &Number) -> String {
    format!("{}/{}", n.numer(), n.denom())
}

fn read_ratio(path: &str, json: &Json) -> Result<Number, CanonicalError> {
    let text = json
        .as_str()
        .ok_or_else(|| shape(path, "a \"numer/denom\" string"))?;
    let (numer, denom) = text
        .split_once('/')
        .ok_or_else(|| shape(path, "a \"numer/denom\" string"))?;
    let numer: BigInt = numer
        .parse()
        .map_err(|_| shape(path, "a \"numer/denom\" string"))?;
    let denom: BigInt = denom
        .parse()
        .map_err(|_| shape(path, "a \"numer/denom\" string"))?;
    Ok(Number::from_fraction(numer, denom)?)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn unhex(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(text.get(i..i + 2)?, 16).ok())
        .collect()
}
