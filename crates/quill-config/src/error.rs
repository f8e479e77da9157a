//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading settings or tokens.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A settings file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path of the unreadable file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A settings file was malformed.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path of the malformed file.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The provider being asked for a snapshot is disabled.
    #[error("daily note settings provider is disabled")]
    Disabled,

    /// Two token entries carry the same secret.
    #[error("duplicate token secret in token table")]
    DuplicateToken,

    /// A token entry has an empty secret.
    #[error("token secret must not be empty")]
    EmptySecret,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
