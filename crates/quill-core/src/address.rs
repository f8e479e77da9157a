//! Addressing schemes and resolved addresses.

use serde::{Deserialize, Serialize};

/// Scheme a resolved address arrived through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddressScheme {
    /// A plain vault path (`direct://...` or a bare string).
    Direct,
    /// A date-alias address (`daily://...`).
    DailyAlias,
    /// A third-party extension namespace, carrying the scheme name.
    Extension {
        /// Registered scheme name, e.g. `tasks`.
        name: String,
    },
}

/// Outcome of address resolution. Created per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    /// Normalized, scheme-stripped vault location.
    pub canonical_path: String,
    /// Scheme the address arrived through.
    pub scheme: AddressScheme,
    /// Whether the caller addressed this as a directory.
    pub is_directory_hint: bool,
    /// Human-facing alias label (e.g. `today`) kept for messages.
    pub alias_label: Option<String>,
}

impl ResolvedAddress {
    /// A direct address for an already-canonical path.
    #[must_use]
    pub fn direct(canonical_path: impl Into<String>) -> Self {
        Self {
            canonical_path: canonical_path.into(),
            scheme: AddressScheme::Direct,
            is_directory_hint: false,
            alias_label: None,
        }
    }

    /// A daily-alias address.
    #[must_use]
    pub fn daily(canonical_path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            canonical_path: canonical_path.into(),
            scheme: AddressScheme::DailyAlias,
            is_directory_hint: false,
            alias_label: Some(label.into()),
        }
    }

    /// An extension-owned address.
    #[must_use]
    pub fn extension(scheme: impl Into<String>, canonical_path: impl Into<String>) -> Self {
        Self {
            canonical_path: canonical_path.into(),
            scheme: AddressScheme::Extension {
                name: scheme.into(),
            },
            is_directory_hint: false,
            alias_label: None,
        }
    }

    /// Mark the address as a directory.
    #[must_use]
    pub fn as_directory(mut self) -> Self {
        self.is_directory_hint = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_address() {
        let addr = ResolvedAddress::direct("notes/foo.md");
        assert_eq!(addr.canonical_path, "notes/foo.md");
        assert_eq!(addr.scheme, AddressScheme::Direct);
        assert!(!addr.is_directory_hint);
        assert!(addr.alias_label.is_none());
    }

    #[test]
    fn test_daily_address_keeps_label() {
        let addr = ResolvedAddress::daily("daily/2023-05-09.md", "today");
        assert_eq!(addr.alias_label.as_deref(), Some("today"));
        assert_eq!(addr.scheme, AddressScheme::DailyAlias);
    }

    #[test]
    fn test_directory_hint() {
        let addr = ResolvedAddress::direct("notes").as_directory();
        assert!(addr.is_directory_hint);
    }
}
