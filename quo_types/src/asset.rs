//! The Asset object shape and the native-asset constant.
//!
//! An asset is any object value with a string `code` and a string `issuer`.
//! The native asset has no issuer, so it is represented with a null
//! `issuer`; anything translating assets to the ledger protocol must treat
//! that exact value specially.

use once_cell::sync::Lazy;

use crate::equal::raw_equal;
use crate::ty::Type;
use crate::value::Value;

pub const NATIVE_ASSET_CODE: &str = "XLM";

pub static ASSET_TYPE: Lazy<Type> =
    Lazy::new(|| Type::object([("code", Type::String), ("issuer", Type::String)]));

pub static NATIVE_ASSET: Lazy<Value> = Lazy::new(|| {
    Value::object([
        ("code", Value::string(NATIVE_ASSET_CODE)),
        ("issuer", Value::null(Type::String)),
    ])
});

/// A credit asset issued by `issuer`.
pub fn credit_asset(code: impl Into<String>, issuer: impl Into<String>) -> Value {
    Value::object([
        ("code", Value::string(code)),
        ("issuer", Value::string(issuer)),
    ])
}

pub fn is_native_asset(value: &Value) -> bool {
    raw_equal(value, &NATIVE_ASSET)
}
