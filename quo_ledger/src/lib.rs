#![forbid(unsafe_code)]

//! Ledger-facing side of Quo typed values.
//!
//! Translates assets, amounts, prices and payments to protobuf wire
//! messages, and stores values as canonical JSON documents.
//!
//! No type logic lives here: every input is coerced through the
//! conversion engine in `quo_types`.

pub mod config;
pub mod ledger_bridge;
pub mod proto_types;
pub mod value_codec;
