//! Error types for the core crate.

use thiserror::Error;

/// Errors raised while decoding provider payloads.
///
/// Normalization and diffing never fail; malformed records are skipped.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The payload is not valid JSON or does not match the record shape.
    #[error("decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Valid JSON with an unexpected top-level shape.
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
