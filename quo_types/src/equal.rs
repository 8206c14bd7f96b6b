//! Raw equality.
//!
//! Compares two values without going through the language's `==` operator,
//! so unknown values compare by type rather than producing an unknown bool.

use std::cmp::Ordering;

use crate::value::{Known, Value};

/// True if `a` and `b` are the same value.
///
/// Types must match structurally and both values must be in the same state.
/// Numbers compare by rational value, so `1.50`, `1.5` and a widened asset
/// amount of the same magnitude are equal.
pub fn raw_equal(a: &Value, b: &Value) -> bool {
    if a.ty() != b.ty() {
        return false;
    }
    if a.is_known() != b.is_known() || a.is_null() != b.is_null() {
        return false;
    }
    match (a, b) {
        (Value::Known(Known::Number(x)), Value::Known(Known::Number(y))) => {
            x.compare(y) == Ordering::Equal
        }
        _ => a == b,
    }
}
