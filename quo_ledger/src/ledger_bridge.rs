//! Value ↔ ledger wire conversion bridge.
//!
//! Translates typed values (assets, amounts, prices, payments) into the
//! protobuf messages of proto_types.rs and back. Every input goes through
//! the conversion engine first, so anything the language would accept for
//! the target type is accepted here too.
//!
//! The native asset is the one special case: its value form is an ordinary
//! asset object with a null issuer, but on the wire it has its own variant.

use num_traits::Signed;
use prost::Message;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use quo_types::asset::{credit_asset, is_native_asset, ASSET_TYPE, NATIVE_ASSET};
use quo_types::convert::{convert, ConversionError};
use quo_types::{index, AssetAmount, Diagnostic, Number, NumberError, Type, Value};

use crate::config::BridgeConfig;
use crate::proto_types::*;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid bridge config: {0}")]
    Config(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("{0}")]
    Field(#[from] Diagnostic),

    #[error("{0} is not yet known")]
    Unknown(&'static str),

    #[error("{0} must not be null")]
    Null(&'static str),

    #[error("invalid asset code {0:?}")]
    InvalidAssetCode(String),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(AssetAmount),

    #[error("price {0} cannot be expressed as a positive 32-bit fraction")]
    PriceOutOfRange(String),

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Number(#[from] NumberError),

    #[error("malformed wire message: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Convert `value` to `ty` and require the result to be known and non-null.
fn require(what: &'static str, value: &Value, ty: &Type) -> Result<Value, BridgeError> {
    let value = convert(value.clone(), ty)?;
    if !value.is_known() {
        return Err(BridgeError::Unknown(what));
    }
    if value.is_null() {
        return Err(BridgeError::Null(what));
    }
    Ok(value)
}

fn attribute(what: &'static str, object: &Value, name: &str) -> Result<Value, BridgeError> {
    let v = index(object, &Value::string(name), None)?;
    if !v.is_known() {
        return Err(BridgeError::Unknown(what));
    }
    Ok(v)
}

// ── Asset ──────────────────────────────────────────────────────

pub fn asset_to_proto(value: &Value, config: &BridgeConfig) -> Result<ProtoAsset, BridgeError> {
    let asset = require("asset", value, &ASSET_TYPE)?;
    if is_native_asset(&asset) {
        debug!("native asset mapped to native wire variant");
        return Ok(ProtoAsset {
            kind: Some(AssetKind::Native(NativeAsset {})),
        });
    }

    let code = attribute("asset code", &asset, "code")?;
    let issuer = attribute("asset issuer", &asset, "issuer")?;
    let code = code.as_str().ok_or(BridgeError::Null("asset code"))?;
    let issuer = issuer.as_str().ok_or(BridgeError::Null("asset issuer"))?;

    let credit = ProtoCreditAsset {
        code: code.to_string(),
        issuer: issuer.to_string(),
    };
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(BridgeError::InvalidAssetCode(code.to_string()));
    }
    // A hand-built config may exceed what the wire form can carry.
    let max_len = config.max_code_len.min(MAX_WIRE_CODE_LEN);
    let kind = match code.len() {
        1..=4 => AssetKind::CreditAlphanum4(credit),
        n if n >= 5 && n <= max_len => AssetKind::CreditAlphanum12(credit),
        _ => return Err(BridgeError::InvalidAssetCode(code.to_string())),
    };
    Ok(ProtoAsset { kind: Some(kind) })
}

pub fn proto_to_asset(proto: &ProtoAsset) -> Result<Value, BridgeError> {
    match proto.kind.as_ref().ok_or(BridgeError::MissingField("asset kind"))? {
        AssetKind::Native(_) => Ok(NATIVE_ASSET.clone()),
        AssetKind::CreditAlphanum4(c) | AssetKind::CreditAlphanum12(c) => {
            Ok(credit_asset(c.code.clone(), c.issuer.clone()))
        }
    }
}

// ── Amount ─────────────────────────────────────────────────────

/// Raw wire amount. Only asset amounts are accepted: a Number is never
/// narrowed to the fixed-point scale.
pub fn amount_to_proto(value: &Value, config: &BridgeConfig) -> Result<i64, BridgeError> {
    let value = require("amount", value, &Type::ASSET_AMOUNT)?;
    let amount = value
        .as_asset_amount()
        .ok_or(BridgeError::Null("amount"))?;
    if config.require_positive_amounts && amount.raw() <= 0 {
        return Err(BridgeError::NonPositiveAmount(amount));
    }
    Ok(amount.raw())
}

pub fn proto_to_amount(raw: i64) -> Value {
    Value::asset_amount(AssetAmount::new(raw))
}

// ── Price ──────────────────────────────────────────────────────

pub fn price_to_proto(value: &Value) -> Result<ProtoPrice, BridgeError> {
    let value = require("price", value, &Type::NUMBER)?;
    let price = value.as_number().ok_or(BridgeError::Null("price"))?;
    let out_of_range = || BridgeError::PriceOutOfRange(price.to_string());
    if !price.numer().is_positive() {
        return Err(out_of_range());
    }
    let n = i32::try_from(price.numer()).map_err(|_| out_of_range())?;
    let d = i32::try_from(price.denom()).map_err(|_| out_of_range())?;
    Ok(ProtoPrice { n, d })
}

pub fn proto_to_price(proto: &ProtoPrice) -> Result<Value, BridgeError> {
    let price = Number::from_fraction(proto.n.into(), proto.d.into())?;
    Ok(Value::number(price))
}

// ── Payment ────────────────────────────────────────────────────

/// Translate a payment object with `destination`, `asset` and `amount`
/// attributes.
pub fn payment_to_proto(value: &Value, config: &BridgeConfig) -> Result<ProtoPayment, BridgeError> {
    if !value.is_known() {
        return Err(BridgeError::Unknown("payment"));
    }
    let destination = require(
        "destination",
        &attribute("destination", value, "destination")?,
        &Type::String,
    )?;
    let asset = attribute("asset", value, "asset")?;
    let amount = attribute("amount", value, "amount")?;

    Ok(ProtoPayment {
        destination: destination.as_str().unwrap_or_default().to_string(),
        asset: Some(asset_to_proto(&asset, config)?),
        amount: amount_to_proto(&amount, config)?,
    })
}

pub fn proto_to_payment(proto: &ProtoPayment) -> Result<Value, BridgeError> {
    let asset = proto
        .asset
        .as_ref()
        .ok_or(BridgeError::MissingField("payment asset"))?;
    Ok(Value::object([
        ("destination", Value::string(proto.destination.clone())),
        ("asset", proto_to_asset(asset)?),
        ("amount", proto_to_amount(proto.amount)),
    ]))
}

pub fn encode_payment(payment: &ProtoPayment) -> Vec<u8> {
    payment.encode_to_vec()
}

pub fn decode_payment(bytes: &[u8]) -> Result<ProtoPayment, BridgeError> {
    Ok(ProtoPayment::decode(bytes)?)
}

/// SHA-256 of the encoded payment. Lowercase hex string.
pub fn payment_digest(payment: &ProtoPayment) -> String {
    let digest = Sha256::digest(encode_payment(payment));
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
