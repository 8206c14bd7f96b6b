//! Fixed-point asset amounts.
//!
//! An amount is an i64 count of ten-millionths of an asset unit
//! (AMOUNT_SCALE = 10_000_000). Widening to `Number` is exact; there is
//! deliberately no narrowing conversion back.

use std::fmt;

use num_bigint::BigInt;

use crate::number::Number;

/// Raw units per whole asset unit.
pub const AMOUNT_SCALE: i64 = 10_000_000;

/// Fractional digits implied by `AMOUNT_SCALE`.
pub const AMOUNT_DECIMALS: usize = 7;

/// A ledger amount in ten-millionths of a unit.
///
/// Kept as a distinct type so a raw i64 is never silently read at the
/// wrong scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetAmount(i64);

impl AssetAmount {
    pub const fn new(raw: i64) -> Self {
        AssetAmount(raw)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Exact widening: `raw / 10_000_000`.
    pub fn to_number(self) -> Number {
        // A constant non-zero denominator cannot fail.
        match Number::from_fraction(BigInt::from(self.0), BigInt::from(AMOUNT_SCALE)) {
            Ok(n) => n,
            Err(_) => unreachable!("AMOUNT_SCALE is non-zero"),
        }
    }
}

impl fmt::Display for AssetAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // i128 so that i64::MIN has a representable magnitude.
        let raw = i128::from(self.0);
        let scale = i128::from(AMOUNT_SCALE);
        let magnitude = raw.abs();
        let sign = if raw < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            magnitude / scale,
            magnitude % scale,
            width = AMOUNT_DECIMALS
        )
    }
}
