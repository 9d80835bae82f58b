//! Server error types.

use metacat_core::AuditError;
use thiserror::Error;

/// Server errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Validation, quota or declaration failure from the core.
    #[error("catalog error: {0}")]
    Core(#[from] metacat_core::Error),

    /// The audit channel could not be brought up.
    #[error("audit error: {0}")]
    Audit(#[from] AuditError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;
