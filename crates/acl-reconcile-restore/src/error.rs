//! Error types for the restore module.

use thiserror::Error;

/// Errors that can occur while preparing a restore.
#[derive(Debug, Error)]
pub enum RestoreError {
    /// Metadata document could not be decoded.
    #[error("metadata decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Metadata document could not be read.
    #[error("metadata read error: {0}")]
    Io(#[from] std::io::Error),

    /// Sharing mode integer outside the known range.
    #[error("unknown sharing mode: {0}")]
    UnknownSharingMode(u8),

    /// An ancestor folder has not been visited yet.
    #[error("no metadata found for ancestor folder: {path}")]
    MissingAncestor { path: String },

    /// Item path is empty or has empty segments.
    #[error("invalid item path: {0:?}")]
    InvalidPath(String),
}

/// Result type for restore operations.
pub type Result<T> = std::result::Result<T, RestoreError>;
