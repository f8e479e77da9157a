//! Vault error types.

use thiserror::Error;

/// Errors raised by vault backends.
#[derive(Debug, Error)]
pub enum VaultError {
    /// No document at the given path.
    #[error("not found: {path}")]
    NotFound {
        /// The missing path.
        path: String,
    },

    /// `create` hit an already-existing document.
    #[error("already exists: {path}")]
    AlreadyExists {
        /// The occupied path.
        path: String,
    },

    /// A path escaped the backend's root.
    #[error("path outside vault root: {path}")]
    OutsideRoot {
        /// The offending path.
        path: String,
    },

    /// Underlying I/O failure.
    #[error("vault i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;
