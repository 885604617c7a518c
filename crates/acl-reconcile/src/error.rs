//! Error types for the Reconciler.

use acl_reconcile_core::CoreError;
use acl_reconcile_restore::RestoreError;
use thiserror::Error;

/// Errors that can occur during reconciliation.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Provider payload could not be decoded.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Restore inputs were incomplete or malformed.
    #[error("restore error: {0}")]
    Restore(#[from] RestoreError),
}

/// Result type for reconciliation.
pub type Result<T> = std::result::Result<T, ReconcileError>;
