//! The indexing operator, `collection[key]`.
//!
//! Exported so applications can index exactly the way the language does,
//! including its null and unknown handling. Returns at most one diagnostic.

use tracing::debug;

use crate::convert::{convert, ConversionError};
use crate::diagnostic::{Diagnostic, DiagnosticCode, SourceRange};
use crate::ty::Type;
use crate::value::{Known, Value};

const INVALID_INDEX: &str = "Invalid index";
const NOT_FOUND_DETAIL: &str =
    "The given key does not identify an element in this collection value.";

/// Evaluate `collection[key]`.
///
/// `subject` is attached to any diagnostic; pass None if the caller will
/// ignore the location anyway.
pub fn index(
    collection: &Value,
    key: &Value,
    subject: Option<&SourceRange>,
) -> Result<Value, Diagnostic> {
    let result = index_inner(collection, key, subject);
    if let Err(diag) = &result {
        debug!(code = ?diag.code, detail = %diag.detail, "index rejected");
    }
    result
}

fn index_inner(
    collection: &Value,
    key: &Value,
    subject: Option<&SourceRange>,
) -> Result<Value, Diagnostic> {
    if collection.is_null() {
        return Err(Diagnostic::error(
            DiagnosticCode::IndexOnNull,
            "Attempt to index null value",
            "This value is null, so it does not have any indices.",
            subject,
        ));
    }
    if key.is_null() {
        return Err(Diagnostic::error(
            DiagnosticCode::NullIndexKey,
            INVALID_INDEX,
            "Can't use a null value as an indexing key.",
            subject,
        ));
    }

    let ty = collection.ty();
    if ty.is_dynamic() || key.ty().is_dynamic() {
        return Ok(Value::dynamic());
    }

    match &ty {
        Type::List(element) => {
            let pos = sequence_position(key, subject)?;
            let items = match collection {
                Value::Known(Known::List { items, .. }) => items,
                _ => return Ok(Value::unknown((**element).clone())),
            };
            let Some(pos) = pos else {
                return Ok(Value::unknown((**element).clone()));
            };
            pos.and_then(|i| items.get(i))
                .cloned()
                .ok_or_else(|| not_found(subject))
        }
        Type::Tuple(elements) => {
            // An unknown tuple still knows its arity, so presence can be
            // decided from the type alone once the key is known.
            let Some(pos) = sequence_position(key, subject)? else {
                return Ok(Value::dynamic());
            };
            let Some(i) = pos.filter(|&i| i < elements.len()) else {
                return Err(not_found(subject));
            };
            match collection {
                Value::Known(Known::Tuple(items)) => Ok(items[i].clone()),
                _ => Ok(Value::unknown(elements[i].clone())),
            }
        }
        Type::Map(element) => {
            let key = string_key(key, subject)?;
            let (Value::Known(Known::Map { entries, .. }), Some(name)) = (collection, key) else {
                return Ok(Value::unknown((**element).clone()));
            };
            entries.get(&name).cloned().ok_or_else(|| not_found(subject))
        }
        Type::Object(_) => {
            let key = string_key(key, subject)?;
            let (Value::Known(Known::Object(attrs)), Some(name)) = (collection, key) else {
                return Ok(Value::dynamic());
            };
            attrs.get(&name).cloned().ok_or_else(|| not_found(subject))
        }
        _ => Err(Diagnostic::error(
            DiagnosticCode::UnsupportedIndexTarget,
            INVALID_INDEX,
            "This value does not have any indices.",
            subject,
        )),
    }
}

/// Coerce a sequence key to a position.
///
/// Outer None: the key is unknown. Inner None: the key is a whole number
/// that cannot be a position (negative or too large).
fn sequence_position(
    key: &Value,
    subject: Option<&SourceRange>,
) -> Result<Option<Option<usize>>, Diagnostic> {
    let key = convert(key.clone(), &Type::NUMBER).map_err(|e| invalid_key(e, subject))?;
    let Some(n) = key.as_number() else {
        return Ok(None);
    };
    if !n.is_integer() {
        return Err(Diagnostic::error(
            DiagnosticCode::FractionalIndex,
            INVALID_INDEX,
            "The given key does not identify an element in this collection value: \
             indexing a sequence requires a whole number, but the given index has a \
             fractional part.",
            subject,
        ));
    }
    Ok(Some(n.to_usize()))
}

/// Coerce a mapping or attribute key to a string. None: the key is unknown.
fn string_key(key: &Value, subject: Option<&SourceRange>) -> Result<Option<String>, Diagnostic> {
    let key = convert(key.clone(), &Type::String).map_err(|e| invalid_key(e, subject))?;
    Ok(key.as_str().map(str::to_string))
}

fn invalid_key(err: ConversionError, subject: Option<&SourceRange>) -> Diagnostic {
    Diagnostic::error(
        DiagnosticCode::InvalidIndexKey,
        INVALID_INDEX,
        format!(
            "The given key does not identify an element in this collection value: {}.",
            err
        ),
        subject,
    )
}

fn not_found(subject: Option<&SourceRange>) -> Diagnostic {
    Diagnostic::error(
        DiagnosticCode::IndexNotFound,
        INVALID_INDEX,
        NOT_FOUND_DETAIL,
        subject,
    )
}
