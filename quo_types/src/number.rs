//! Rational Number type.
//!
//! Arbitrary-precision, exact. No float anywhere in the arithmetic path.
//! Float input is accepted only through `Number::from_f64`, which converts
//! exactly or fails.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use thiserror::Error;

/// Fractional digits used by `Display` and the debug renderer.
///
/// This is a display approximation, not a round-trip guarantee: values
/// with more than 14 significant fractional digits are rounded.
pub const DEFAULT_PRECISION: usize = 14;

/// Exponents beyond this magnitude are rejected as invalid syntax.
pub const MAX_EXPONENT: i64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("invalid number syntax")]
    InvalidSyntax,

    #[error("division by zero")]
    DivisionByZero,

    #[error("infinity is not allowed")]
    Infinity,

    #[error("NaN is not allowed")]
    NotANumber,
}

/// An exact rational number.
///
/// Always held in lowest terms, so the derived equality, ordering and
/// hashing are by numeric value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Number(BigRational);

impl Number {
    pub fn zero() -> Self {
        Number(BigRational::zero())
    }

    pub fn from_i64(v: i64) -> Self {
        Number(BigRational::from_integer(BigInt::from(v)))
    }

    /// Wrap an existing rational. The rational is moved in, so the caller
    /// cannot mutate it afterwards.
    pub fn from_ratio(ratio: BigRational) -> Self {
        Number(ratio)
    }

    /// Build `numer / denom`, failing if `denom` is zero.
    pub fn from_fraction(numer: BigInt, denom: BigInt) -> Result<Self, NumberError> {
        if denom.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        Ok(Number(BigRational::new(numer, denom)))
    }

    /// Parse a decimal literal: `[0-9.\-eE]` only.
    ///
    /// Fraction syntax such as `"1/2"` is rejected by the character
    /// pre-screen before any numeric parsing happens.
    pub fn parse(text: &str) -> Result<Self, NumberError> {
        let allowed = |c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E');
        if !text.chars().all(allowed) {
            return Err(NumberError::InvalidSyntax);
        }
        parse_decimal(text).map(Number).ok_or(NumberError::InvalidSyntax)
    }

    /// Parse a literal known to be valid. Panics otherwise.
    ///
    /// Only for fixed input: tests, constants and reproductions printed by
    /// `repr::value_repr`. Untrusted text goes through `Number::parse`.
    pub fn must_parse(text: &str) -> Self {
        match Self::parse(text) {
            Ok(n) => n,
            Err(e) => panic!("Number::must_parse({:?}): {}", text, e),
        }
    }

    /// Exact conversion from a binary float.
    pub fn from_f64(v: f64) -> Result<Self, NumberError> {
        if v.is_nan() {
            return Err(NumberError::NotANumber);
        }
        if v.is_infinite() {
            return Err(NumberError::Infinity);
        }
        // from_float only declines non-finite input, handled above.
        BigRational::from_float(v)
            .map(Number)
            .ok_or(NumberError::Infinity)
    }

    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    pub fn into_ratio(self) -> BigRational {
        self.0
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// The value as an i64, if it is a whole number in range.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.0.numer().to_i64()
    }

    /// The value as a sequence position, if it is a non-negative whole
    /// number in range.
    pub fn to_usize(&self) -> Option<usize> {
        if !self.is_integer() {
            return None;
        }
        self.0.numer().to_usize()
    }

    pub fn checked_div(&self, rhs: &Number) -> Result<Number, NumberError> {
        if rhs.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        Ok(Number(&self.0 / &rhs.0))
    }

    /// Exact three-way comparison.
    pub fn compare(&self, other: &Number) -> Ordering {
        self.0.cmp(&other.0)
    }

    /// Decimal rendering with exactly `precision` fractional digits.
    ///
    /// The last digit is rounded to nearest, halves away from zero. A
    /// negative value keeps its sign even when it rounds to zero.
    pub fn render(&self, precision: usize) -> String {
        let ten = BigInt::from(10);
        let scale: BigInt = num_traits::pow(ten, precision);
        let scaled = self.0.numer().abs() * &scale;
        let denom = self.0.denom();

        let mut digits = &scaled / denom;
        let rem = &scaled % denom;
        let twice = &rem + &rem;
        if &twice >= denom {
            digits += BigInt::one();
        }

        let mut text = digits.to_string();
        let sign = if self.is_negative() { "-" } else { "" };
        if precision == 0 {
            return format!("{}{}", sign, text);
        }
        if text.len() <= precision {
            let pad = precision + 1 - text.len();
            text.insert_str(0, &"0".repeat(pad));
        }
        let (whole, frac) = text.split_at(text.len() - precision);
        format!("{}{}.{}", sign, whole, frac)
    }
}

fn parse_decimal(text: &str) -> Option<BigRational> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (mantissa, exponent) = match rest.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };

    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(frac) {
        return None;
    }

    let mut exp: i64 = match exponent {
        None => 0,
        Some(e) => {
            let (exp_negative, exp_digits) = match e.strip_prefix('-') {
                Some(d) => (true, d),
                None => (false, e),
            };
            if exp_digits.is_empty() || !all_digits(exp_digits) {
                return None;
            }
            let magnitude: i64 = exp_digits.parse().ok()?;
            if exp_negative {
                magnitude.checked_neg()?
            } else {
                magnitude
            }
        }
    };
    exp = exp.checked_sub(i64::try_from(frac.len()).ok()?)?;
    if exp.unsigned_abs() > MAX_EXPONENT.unsigned_abs() {
        return None;
    }

    let digits: BigInt = format!("{}{}", whole, frac).parse().ok()?;
    let ten = BigInt::from(10);
    let magnitude = if exp >= 0 {
        BigRational::from_integer(digits * num_traits::pow(ten, exp as usize))
    } else {
        BigRational::new(digits, num_traits::pow(ten, exp.unsigned_abs() as usize))
    };

    Some(if negative { -magnitude } else { magnitude })
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::from_i64(v)
    }
}

impl FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::parse(s)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_PRECISION))
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({}/{})", self.0.numer(), self.0.denom())
    }
}

impl Add for &Number {
    type Output = Number;

    fn add(self, rhs: &Number) -> Number {
        Number(&self.0 + &rhs.0)
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        Number(self.0 + rhs.0)
    }
}

impl Sub for &Number {
    type Output = Number;

    fn sub(self, rhs: &Number) -> Number {
        Number(&self.0 - &rhs.0)
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Number) -> Number {
        Number(self.0 - rhs.0)
    }
}

impl Mul for &Number {
    type Output = Number;

    fn mul(self, rhs: &Number) -> Number {
        Number(&self.0 * &rhs.0)
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, rhs: Number) -> Number {
        Number(self.0 * rhs.0)
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        Number(-self.0)
    }
}

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Number {
        Number(-self.0.clone())
    }
}
