//! Stores typed values as canonical JSON documents.
//!
//! A thin layer over `quo_types::hashing`: the document written to disk is
//! exactly the one that gets hashed, so a file's SHA-256 equals
//! `value_hash` of the value it holds. Loading goes through the conversion
//! engine, so a document may hold any value convertible to the type the
//! caller expects.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use quo_types::convert::{convert, ConversionError};
use quo_types::hashing::{
    canonical_deserialize, canonical_document, canonical_hash, CanonicalError,
};
use quo_types::{Type, Value};

#[derive(Debug, Error)]
pub enum CodecError {
    /// The value is, or contains, an unknown.
    #[error("cannot store value: {0}")]
    Serialization(CanonicalError),

    #[error("cannot read stored value: {0}")]
    Deserialization(CanonicalError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The canonical document of `value`, without whitespace.
pub fn encode_value(value: &Value) -> Result<String, CodecError> {
    let doc = canonical_document(value).map_err(CodecError::Serialization)?;
    serde_json::to_string(&doc).map_err(|e| CodecError::Serialization(e.into()))
}

/// Read a document back as exactly the type it declares. Use
/// `restore_value` to land on a different type.
pub fn decode_value(json: &str) -> Result<Value, CodecError> {
    canonical_deserialize(json.as_bytes()).map_err(CodecError::Deserialization)
}

/// Read a document and convert its value to `expected`. A stored string
/// "1.5" restores as a Number when a Number is expected.
pub fn restore_value(json: &str, expected: &Type) -> Result<Value, CodecError> {
    let value = decode_value(json)?;
    Ok(convert(value, expected)?)
}

pub fn export_value_to_file(value: &Value, path: &Path) -> Result<(), CodecError> {
    let json = encode_value(value)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json.as_bytes())?;
    debug!(path = %path.display(), bytes = json.len(), "value exported");
    Ok(())
}

pub fn import_value_from_file(path: &Path, expected: &Type) -> Result<Value, CodecError> {
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "value imported");
    restore_value(&content, expected)
}

pub fn value_hash(value: &Value) -> Result<String, CodecError> {
    canonical_hash(value).map_err(CodecError::Serialization)
}
