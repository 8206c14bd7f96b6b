#![forbid(unsafe_code)]

//! Typed-value core of the Quo expression language.
//!
//! Exact rational numbers, fixed-point asset amounts, the conversion engine
//! that moves values between types, the indexing operator, and raw
//! equality and debug rendering that understand both numeric capsules.

pub mod amount;
pub mod asset;
pub mod convert;
pub mod diagnostic;
pub mod equal;
pub mod hashing;
pub mod host;
pub mod index;
pub mod number;
pub mod operators;
pub mod repr;
pub mod ty;
pub mod value;

pub use amount::{AssetAmount, AMOUNT_SCALE};
pub use convert::{convert, ConversionError};
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity, SourcePos, SourceRange};
pub use equal::raw_equal;
pub use index::index;
pub use number::{Number, NumberError};
pub use ty::{Capsule, Type};
pub use value::{Known, Value};
