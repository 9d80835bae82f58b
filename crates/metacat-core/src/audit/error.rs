//! Audit-specific error types.

use thiserror::Error;

/// Audit channel errors.
///
/// Only [`AuditError::Connect`] ever reaches a caller, from the start-up hook.
/// Everything else is logged and dropped by the publisher.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The channel connection could not be established.
    #[error("failed to connect to audit channel {endpoint}: {reason}")]
    Connect {
        /// Endpoint that was attempted.
        endpoint: String,
        /// Underlying failure.
        reason: String,
    },

    /// The connection has been shut down.
    #[error("audit connection is closed")]
    Closed,

    /// The channel refused or lost the message.
    #[error("audit channel unavailable: {0}")]
    Unavailable(String),

    /// The event could not be encoded.
    #[error("audit serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for audit channel operations.
pub type AuditResult<T> = Result<T, AuditError>;
