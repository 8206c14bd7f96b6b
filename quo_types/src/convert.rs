//! Conversion engine.
//!
//! Rules are looked up by target type first. Conversions to `NUMBER` have
//! their own source-specific rules; every other target falls back to the
//! generic structural conversions in `host`.
//!
//! Each resolved rule is applied through one wrapper that handles the
//! dynamic target, unknown input and null input, so individual converters
//! only ever see a known, non-null payload.

use thiserror::Error;
use tracing::trace;

use crate::host::{self, HostConversion};
use crate::number::{Number, NumberError};
use crate::ty::{Capsule, Type};
use crate::value::{Known, Value};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("{} required", .to.friendly_name())]
    Mismatch { from: Type, to: Type },

    #[error("a number is required")]
    NumberRequired,

    #[error("a bool is required")]
    BoolRequired,

    #[error(transparent)]
    Number(#[from] NumberError),

    #[error("attribute {0:?} is required")]
    MissingAttribute(String),

    #[error("incorrect number of elements: need {want}, got {got}")]
    LengthMismatch { want: usize, got: usize },

    #[error("all elements must have the same type")]
    InconsistentElements,

    #[error("{path}: {inner}")]
    Nested {
        path: String,
        inner: Box<ConversionError>,
    },
}

impl ConversionError {
    /// Prefix the error with one path step, e.g. `[0]` or `.code`.
    pub fn at(self, step: impl Into<String>) -> Self {
        let step = step.into();
        match self {
            ConversionError::Nested { path, inner } => ConversionError::Nested {
                path: format!("{}{}", step, path),
                inner,
            },
            other => ConversionError::Nested {
                path: step,
                inner: Box::new(other),
            },
        }
    }
}

/// Source-specific rules for converting into `NUMBER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberSource {
    HostNumber,
    String,
    AssetAmount,
}

impl NumberSource {
    pub fn for_type(from: &Type) -> Option<Self> {
        match from {
            Type::HostNumber => Some(NumberSource::HostNumber),
            Type::String => Some(NumberSource::String),
            Type::Capsule(Capsule::AssetAmount) => Some(NumberSource::AssetAmount),
            _ => None,
        }
    }

    fn convert(self, known: Known) -> Result<Number, ConversionError> {
        match (self, known) {
            (NumberSource::HostNumber, Known::HostNumber(f)) => Ok(Number::from_f64(f)?),
            (NumberSource::String, Known::String(s)) => {
                Number::parse(&s).map_err(|_| ConversionError::NumberRequired)
            }
            (NumberSource::AssetAmount, Known::AssetAmount(a)) => Ok(a.to_number()),
            (_, other) => Err(ConversionError::Mismatch {
                from: other.ty(),
                to: Type::NUMBER,
            }),
        }
    }
}

/// A resolved conversion rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    ToNumber(NumberSource),
    Host(HostConversion),
}

impl Conversion {
    /// Apply the rule, with uniform dynamic/unknown/null handling.
    pub fn apply(&self, value: Value, target: &Type) -> Result<Value, ConversionError> {
        if target.is_dynamic() {
            return Ok(value);
        }
        let known = match value {
            Value::Unknown(_) => return Ok(Value::Unknown(target.clone())),
            Value::Null(_) => return Ok(Value::Null(target.clone())),
            Value::Known(known) => known,
        };
        match self {
            Conversion::ToNumber(source) => source.convert(known).map(Value::number),
            Conversion::Host(conv) => conv.apply(known, target),
        }
    }
}

/// Find a conversion from `from` to `to`, or None if no rule applies.
///
/// Identical types have no conversion; `convert` short-circuits them.
pub fn get_conversion(from: &Type, to: &Type) -> Option<Conversion> {
    if from == to {
        return None;
    }
    match to {
        Type::Capsule(Capsule::Number) => NumberSource::for_type(from).map(Conversion::ToNumber),
        _ => host::get_conversion(from, to).map(Conversion::Host),
    }
}

/// Convert `value` to `target`.
pub fn convert(value: Value, target: &Type) -> Result<Value, ConversionError> {
    let from = value.ty();
    if from == *target {
        return Ok(value);
    }
    let Some(conversion) = get_conversion(&from, target) else {
        trace!(%from, to = %target, "no conversion rule");
        return Err(mismatch(from, target));
    };
    trace!(%from, to = %target, ?conversion, "conversion rule resolved");
    conversion.apply(value, target)
}

/// An object missing one of the target's attributes names that attribute;
/// every other unconvertible pair is a plain mismatch.
fn mismatch(from: Type, to: &Type) -> ConversionError {
    if let (Type::Object(have), Type::Object(want)) = (&from, to) {
        if let Some(name) = want.keys().find(|name| !have.contains_key(*name)) {
            return ConversionError::MissingAttribute(name.clone());
        }
    }
    ConversionError::Mismatch {
        from,
        to: to.clone(),
    }
}
