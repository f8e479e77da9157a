//! Gateway error types and their protocol rendering.
//!
//! Two rules govern what a caller sees:
//! - capability boundaries look like non-existence (`UnknownTool` carries
//!   the same text whether the name is ungated or unregistered, and
//!   policy-hidden paths read as not-found);
//! - provider-internal detail (I/O errors, parse errors) is truncated to a
//!   generic message, while the offending path or alias is always kept.

use thiserror::Error;

use quill_resolve::ResolveError;
use quill_vault::VaultError;

use crate::types::ToolResult;

/// Errors raised while handling a gateway call.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The tool name is unregistered, or hidden from this token. The two
    /// cases are deliberately the same variant and the same text.
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// The requested name.
        name: String,
    },

    /// The resource scheme is unregistered, hidden, or disabled.
    #[error("unknown resource scheme: {scheme}")]
    UnknownScheme {
        /// The requested scheme.
        scheme: String,
    },

    /// Leaf or directory absent — or hidden by policy, indistinguishably.
    #[error("not found: {path}")]
    NotFound {
        /// The requested path.
        path: String,
    },

    /// No documents under a directory after policy filtering.
    #[error("no documents found in \"{path}\"")]
    EmptyDirectory {
        /// The requested directory.
        path: String,
    },

    /// Explicit write attempt on a known-existing, policy-denied path.
    #[error("access denied: {path}")]
    AccessDenied {
        /// The denied path.
        path: String,
    },

    /// A find/replace matched zero or more than one occurrence.
    #[error("ambiguous match in {path}: found {matches} occurrences, expected exactly 1")]
    AmbiguousMatch {
        /// The target document.
        path: String,
        /// How many occurrences were found.
        matches: usize,
    },

    /// A tool was called with missing or ill-typed arguments.
    #[error("invalid arguments: {reason}")]
    InvalidArguments {
        /// What was wrong.
        reason: String,
    },

    /// Address resolution failure.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Storage failure.
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl GatewayError {
    /// The message shown to the caller. Keeps paths and aliases, truncates
    /// provider internals.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Vault(VaultError::NotFound { path }) => format!("not found: {path}"),
            Self::Vault(VaultError::AlreadyExists { path }) => {
                format!("already exists: {path}")
            }
            Self::Vault(_) => "internal storage error".to_string(),
            Self::Resolve(ResolveError::Vault(VaultError::NotFound { path })) => {
                format!("not found: {path}")
            }
            Self::Resolve(ResolveError::Vault(_)) => "internal storage error".to_string(),
            Self::Resolve(ResolveError::Config(_)) => {
                "daily note settings could not be loaded".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Render as a protocol failure.
    #[must_use]
    pub fn to_result(&self) -> ToolResult {
        ToolResult::error(self.public_message())
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_text_is_uniform() {
        let a = GatewayError::UnknownTool {
            name: "write_document".to_string(),
        };
        let b = GatewayError::UnknownTool {
            name: "write_document".to_string(),
        };
        assert_eq!(a.public_message(), b.public_message());
        assert_eq!(a.public_message(), "unknown tool: write_document");
    }

    #[test]
    fn test_io_detail_truncated() {
        let err = GatewayError::Vault(VaultError::Io(std::io::Error::other("EACCES /secret")));
        assert_eq!(err.public_message(), "internal storage error");
    }

    #[test]
    fn test_ambiguous_match_names_path_and_count() {
        let err = GatewayError::AmbiguousMatch {
            path: "a.md".to_string(),
            matches: 2,
        };
        let msg = err.public_message();
        assert!(msg.contains("a.md"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_daily_miss_mentions_escape_hatch() {
        let err = GatewayError::Resolve(ResolveError::DailyNoteMissing {
            alias: "today".to_string(),
            path: "daily/2023-05-09.md".to_string(),
        });
        let msg = err.public_message();
        assert!(msg.contains("today"));
        assert!(msg.contains("create"));
    }
}
