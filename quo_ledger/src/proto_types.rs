//! Hand-written protobuf types for the ledger wire messages.
//!
//! Uses prost derive macros for encode/decode without prost-build.

use prost::Message;

/// Longest asset code the long credit form can carry.
pub const MAX_WIRE_CODE_LEN: usize = 12;

// ── Asset ──────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct ProtoAsset {
    #[prost(oneof = "AssetKind", tags = "1, 2, 3")]
    pub kind: Option<AssetKind>,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum AssetKind {
    /// The network's native asset. Carries no code or issuer.
    #[prost(message, tag = "1")]
    Native(NativeAsset),
    /// Codes of 1 to 4 characters.
    #[prost(message, tag = "2")]
    CreditAlphanum4(ProtoCreditAsset),
    /// Codes of 5 to 12 characters.
    #[prost(message, tag = "3")]
    CreditAlphanum12(ProtoCreditAsset),
}

#[derive(Clone, PartialEq, Message)]
pub struct NativeAsset {}

#[derive(Clone, PartialEq, Message)]
pub struct ProtoCreditAsset {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(string, tag = "2")]
    pub issuer: String,
}

// ── Price ──────────────────────────────────────────────────────

/// A price as the fraction `n / d`.
#[derive(Clone, PartialEq, Message)]
pub struct ProtoPrice {
    #[prost(int32, tag = "1")]
    pub n: i32,
    #[prost(int32, tag = "2")]
    pub d: i32,
}

// ── Payment ────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct ProtoPayment {
    #[prost(string, tag = "1")]
    pub destination: String,
    #[prost(message, optional, tag = "2")]
    pub asset: Option<ProtoAsset>,
    /// Ten-millionths of a unit.
    #[prost(int64, tag = "3")]
    pub amount: i64,
}
