//! Arithmetic operators over values.
//!
//! Both operands are number parameters: each is converted to `NUMBER`
//! through the conversion engine before the arithmetic runs, nulls are
//! rejected, and any unknown operand makes the result an unknown number.

use thiserror::Error;

use crate::convert::{convert, ConversionError};
use crate::number::{Number, NumberError};
use crate::ty::Type;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperatorError {
    #[error("argument {index}: argument must not be null")]
    NullArgument { index: usize },

    #[error("argument {index}: {source}")]
    Argument {
        index: usize,
        source: ConversionError,
    },

    #[error(transparent)]
    Arithmetic(#[from] NumberError),
}

pub fn add(a: &Value, b: &Value) -> Result<Value, OperatorError> {
    binary(a, b, |x, y| Ok(x + y))
}

pub fn subtract(a: &Value, b: &Value) -> Result<Value, OperatorError> {
    binary(a, b, |x, y| Ok(x - y))
}

pub fn multiply(a: &Value, b: &Value) -> Result<Value, OperatorError> {
    binary(a, b, |x, y| Ok(x * y))
}

pub fn divide(a: &Value, b: &Value) -> Result<Value, OperatorError> {
    binary(a, b, |x, y| x.checked_div(y))
}

fn binary<F>(a: &Value, b: &Value, op: F) -> Result<Value, OperatorError>
where
    F: FnOnce(&Number, &Number) -> Result<Number, NumberError>,
{
    let a = argument(0, a)?;
    let b = argument(1, b)?;
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => Ok(Value::number(op(x, y)?)),
        _ => Ok(Value::unknown(Type::NUMBER)),
    }
}

/// Bind one operand to a number parameter.
fn argument(index: usize, value: &Value) -> Result<Value, OperatorError> {
    if value.is_null() {
        return Err(OperatorError::NullArgument { index });
    }
    if value.ty().is_dynamic() {
        return Ok(Value::unknown(Type::NUMBER));
    }
    convert(value.clone(), &Type::NUMBER).map_err(|source| OperatorError::Argument { index, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::AssetAmount;

    fn num(s: &str) -> Value {
        Value::number(Number::must_parse(s))
    }

    #[test]
    fn test_exact_arithmetic() {
        assert_eq!(add(&num("0.1"), &num("0.2")), Ok(num("0.3")));
        assert_eq!(subtract(&num("1"), &num("2.5")), Ok(num("-1.5")));
        assert_eq!(multiply(&num("1.5"), &num("4")), Ok(num("6")));
        let third = divide(&num("1"), &num("3")).unwrap();
        assert_eq!(multiply(&third, &num("3")), Ok(num("1")));
    }

    #[test]
    fn test_operands_are_converted() {
        assert_eq!(add(&Value::string("1.25"), &num("1")), Ok(num("2.25")));
        assert_eq!(
            add(&Value::asset_amount(AssetAmount::new(25_000_000)), &Value::host_number(0.5)),
            Ok(num("3"))
        );
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            divide(&num("1"), &num("0")),
            Err(OperatorError::Arithmetic(NumberError::DivisionByZero))
        );
    }

    #[test]
    fn test_unknown_operands() {
        let unknown = Value::unknown(Type::String);
        assert_eq!(add(&unknown, &num("1")), Ok(Value::unknown(Type::NUMBER)));
        assert_eq!(divide(&num("1"), &Value::dynamic()), Ok(Value::unknown(Type::NUMBER)));
        // Unknown divisor, so the zero check cannot run yet.
        assert_eq!(divide(&Value::dynamic(), &num("0")), Ok(Value::unknown(Type::NUMBER)));
    }

    #[test]
    fn test_null_rejected() {
        let err = add(&num("1"), &Value::null(Type::NUMBER)).unwrap_err();
        assert_eq!(err, OperatorError::NullArgument { index: 1 });
        assert_eq!(err.to_string(), "argument 1: argument must not be null");
    }

    #[test]
    fn test_bad_operand_reports_position() {
        let err = multiply(&Value::bool(true), &num("1")).unwrap_err();
        assert_eq!(err.to_string(), "argument 0: number required");
        let err = subtract(&num("1"), &Value::string("ten")).unwrap_err();
        assert_eq!(err.to_string(), "argument 1: a number is required");
    }
}
