#![forbid(unsafe_code)]

//! Common error type for the VDF prover crates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VdfError {
    /// I/O related failures (config reads, artifact writes).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parsing failures.
    #[error("Config parse error: {0}")]
    ConfigParse(toml::de::Error),

    /// A decimal big-integer parameter did not parse.
    #[error("Malformed integer for `{field}`: {value:?}")]
    Parse { field: &'static str, value: String },

    /// Domain violation detected before any work started.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Witness lookup needs a chain entry that was never recorded.
    #[error("Chain index {index} out of range (recorded entries: {len})")]
    OutOfRange { index: u64, len: u64 },

    /// Formatter was handed a proof chain without any claim.
    #[error("Proof chain is empty")]
    EmptyProofChain,

    /// JSON artifact encode/decode errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CBOR chain dump encode/decode errors.
    #[error("CBOR error: {0}")]
    Cbor(#[from] serde_cbor::Error),
}

/// Convenient alias for results throughout the prover crates.
pub type VdfResult<T> = Result<T, VdfError>;
