//! Resolution error types.
//!
//! Every variant names the offending address or alias; daily-note misses
//! spell out the creation escape hatch so callers can offer it.

use thiserror::Error;

/// Errors raised during address resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Malformed address (bad scheme syntax, authority component, `..`
    /// traversal, undecodable percent sequence).
    #[error("invalid address \"{address}\": {reason}")]
    InvalidAddress {
        /// The raw address as given.
        address: String,
        /// What made it invalid.
        reason: String,
    },

    /// A recognized scheme this gateway does not serve.
    #[error("unsupported scheme \"{scheme}\"")]
    UnsupportedScheme {
        /// The rejected scheme.
        scheme: String,
    },

    /// Daily addressing was used but no daily-note provider is enabled.
    #[error("no daily note provider is enabled; configure daily note settings to use daily:// addresses")]
    DailyProviderUnavailable,

    /// An alias token that is neither symbolic nor a date in the configured
    /// format.
    #[error("invalid date alias \"{alias}\" (expected today, yesterday, tomorrow, or a date in format {format})")]
    DailyAliasInvalid {
        /// The offending alias token.
        alias: String,
        /// The configured date format.
        format: String,
    },

    /// The daily note for an alias does not exist yet. Distinct from a
    /// generic not-found so callers can offer creation.
    #[error("daily note for \"{alias}\" does not exist at {path}; pass create_if_missing to create it")]
    DailyNoteMissing {
        /// The alias that resolved to the missing note.
        alias: String,
        /// Where the note would live.
        path: String,
    },

    /// Settings provider failure.
    #[error(transparent)]
    Config(#[from] quill_config::ConfigError),

    /// Storage failure during existence check or creation.
    #[error(transparent)]
    Vault(#[from] quill_vault::VaultError),
}

impl ResolveError {
    /// Shorthand for [`ResolveError::InvalidAddress`].
    pub(crate) fn invalid(address: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
