//! Bearer tokens and directory rules.
//!
//! A [`CapabilityToken`] is issued by external configuration loading, held
//! for the process lifetime and never mutated. Tokens are compared and
//! hashed by secret value; the secret never appears in `Debug` output.

use serde::{Deserialize, Serialize};

use crate::tier::CapabilityTier;

/// Effect of a directory rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleEffect {
    /// Paths under the prefix are visible.
    Allow,
    /// Paths under the prefix are hidden.
    Deny,
}

/// One allow/deny entry of a token's directory policy.
///
/// Prefixes are stored in canonical form: no leading or trailing slash, and
/// the empty prefix denotes the vault root (matches everything).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRule {
    /// Canonical path prefix the rule applies to.
    pub prefix: String,
    /// Whether matching paths are allowed or denied.
    pub effect: RuleEffect,
}

impl DirectoryRule {
    /// Create a rule, normalizing the prefix to canonical form.
    #[must_use]
    pub fn new(prefix: impl Into<String>, effect: RuleEffect) -> Self {
        Self {
            prefix: prefix.into().trim_matches('/').to_string(),
            effect,
        }
    }

    /// Shorthand for an allow rule.
    #[must_use]
    pub fn allow(prefix: impl Into<String>) -> Self {
        Self::new(prefix, RuleEffect::Allow)
    }

    /// Shorthand for a deny rule.
    #[must_use]
    pub fn deny(prefix: impl Into<String>) -> Self {
        Self::new(prefix, RuleEffect::Deny)
    }
}

/// An authenticated caller's capability token.
///
/// Immutable once issued. Equality and hashing use the secret value only,
/// matching how the token is looked up on every request.
#[derive(Clone, Serialize, Deserialize)]
pub struct CapabilityToken {
    /// Opaque bearer secret.
    secret: String,
    /// Tier gating operation categories.
    pub tier: CapabilityTier,
    /// Ordered directory allow/deny rules. Empty means no exceptions.
    pub directory_rules: Vec<DirectoryRule>,
}

impl CapabilityToken {
    /// Create a token with no directory rules.
    #[must_use]
    pub fn new(secret: impl Into<String>, tier: CapabilityTier) -> Self {
        Self {
            secret: secret.into(),
            tier,
            directory_rules: Vec::new(),
        }
    }

    /// Attach directory rules.
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = DirectoryRule>) -> Self {
        self.directory_rules = rules.into_iter().collect();
        self
    }

    /// The bearer secret, for lookup against the token table.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl PartialEq for CapabilityToken {
    fn eq(&self, other: &Self) -> bool {
        self.secret == other.secret
    }
}

impl Eq for CapabilityToken {}

impl std::hash::Hash for CapabilityToken {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.secret.hash(state);
    }
}

// The secret stays out of logs and debug dumps.
impl std::fmt::Debug for CapabilityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityToken")
            .field("secret", &"<redacted>")
            .field("tier", &self.tier)
            .field("directory_rules", &self.directory_rules.len())
            .finish()
    }
}
