//! Capability tiers.
//!
//! A tier gates whole operation categories. Tiers are totally ordered so the
//! dispatcher can compare a tool's minimum tier against a token's tier with
//! plain `<=`.

use serde::{Deserialize, Serialize};

/// Capability tier carried by a bearer token.
///
/// Ordering is meaningful: `Restricted < ReadOnly < Full`. A token may use a
/// tool iff the tool's minimum tier is `<=` the token's tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityTier {
    /// May only enumerate what it is shown; no document reads.
    Restricted,
    /// May read documents and listings; all mutation is hidden.
    ReadOnly,
    /// Unrestricted within directory rules.
    Full,
}

impl CapabilityTier {
    /// Whether this tier permits mutating operations at all.
    #[must_use]
    pub fn allows_mutation(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl std::fmt::Display for CapabilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Restricted => write!(f, "restricted"),
            Self::ReadOnly => write!(f, "read_only"),
            Self::Full => write!(f, "full"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(CapabilityTier::Restricted < CapabilityTier::ReadOnly);
        assert!(CapabilityTier::ReadOnly < CapabilityTier::Full);
    }

    #[test]
    fn test_allows_mutation() {
        assert!(CapabilityTier::Full.allows_mutation());
        assert!(!CapabilityTier::ReadOnly.allows_mutation());
        assert!(!CapabilityTier::Restricted.allows_mutation());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&CapabilityTier::ReadOnly).unwrap();
        assert_eq!(json, "\"read_only\"");
    }
}
