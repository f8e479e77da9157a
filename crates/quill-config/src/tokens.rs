//! Bearer token table.
//!
//! Loads `[[tokens]]` entries from TOML and answers secret lookups. Tokens
//! are created here once at startup and never mutated afterwards.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::info;

use quill_core::{CapabilityTier, CapabilityToken, DirectoryRule, RuleEffect};

use crate::error::{ConfigError, ConfigResult};

#[derive(Deserialize)]
struct TokenFile {
    #[serde(default)]
    tokens: Vec<TokenEntry>,
}

#[derive(Deserialize)]
struct TokenEntry {
    secret: String,
    tier: CapabilityTier,
    #[serde(default)]
    rules: Vec<RuleEntry>,
}

#[derive(Deserialize)]
struct RuleEntry {
    prefix: String,
    effect: RuleEffect,
}

/// Lookup table from bearer secret to capability token.
#[derive(Debug, Default)]
pub struct TokenTable {
    tokens: HashMap<String, CapabilityToken>,
}

impl TokenTable {
    /// Build a table from already-constructed tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateToken`] for repeated secrets and
    /// [`ConfigError::EmptySecret`] for empty ones.
    pub fn from_tokens(tokens: impl IntoIterator<Item = CapabilityToken>) -> ConfigResult<Self> {
        let mut map = HashMap::new();
        for token in tokens {
            if token.secret().is_empty() {
                return Err(ConfigError::EmptySecret);
            }
            if map.insert(token.secret().to_string(), token).is_some() {
                return Err(ConfigError::DuplicateToken);
            }
        }
        Ok(Self { tokens: map })
    }

    /// Parse a table from TOML:
    ///
    /// ```toml
    /// [[tokens]]
    /// secret = "..."
    /// tier = "read_only"
    /// rules = [{ prefix = "secret", effect = "deny" }]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed TOML, plus the same validation
    /// errors as [`TokenTable::from_tokens`].
    pub fn from_toml(raw: &str) -> ConfigResult<Self> {
        let parsed: TokenFile = toml::from_str(raw).map_err(|e| ConfigError::Parse {
            path: "<token table>".to_string(),
            source: e,
        })?;
        let tokens = parsed.tokens.into_iter().map(|entry| {
            CapabilityToken::new(entry.secret, entry.tier).with_rules(
                entry
                    .rules
                    .into_iter()
                    .map(|r| DirectoryRule::new(r.prefix, r.effect)),
            )
        });
        let table = Self::from_tokens(tokens)?;
        info!(count = table.tokens.len(), "loaded token table");
        Ok(table)
    }

    /// Look up the token for a bearer secret.
    #[must_use]
    pub fn lookup(&self, secret: &str) -> Option<&CapabilityToken> {
        self.tokens.get(secret)
    }

    /// Number of issued tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
[[tokens]]
secret = "agent-a"
tier = "full"

[[tokens]]
secret = "agent-b"
tier = "read_only"
rules = [{ prefix = "secret", effect = "deny" }]
"#;

    #[test]
    fn test_parse_and_lookup() {
        let table = TokenTable::from_toml(TABLE).unwrap();
        assert_eq!(table.len(), 2);

        let a = table.lookup("agent-a").unwrap();
        assert_eq!(a.tier, CapabilityTier::Full);
        assert!(a.directory_rules.is_empty());

        let b = table.lookup("agent-b").unwrap();
        assert_eq!(b.tier, CapabilityTier::ReadOnly);
        assert_eq!(b.directory_rules[0].prefix, "secret");
        assert_eq!(b.directory_rules[0].effect, RuleEffect::Deny);
    }

    #[test]
    fn test_unknown_secret() {
        let table = TokenTable::from_toml(TABLE).unwrap();
        assert!(table.lookup("nope").is_none());
    }

    #[test]
    fn test_duplicate_secret_rejected() {
        let raw = r#"
[[tokens]]
secret = "same"
tier = "full"

[[tokens]]
secret = "same"
tier = "read_only"
"#;
        assert!(matches!(
            TokenTable::from_toml(raw).unwrap_err(),
            ConfigError::DuplicateToken
        ));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let token = CapabilityToken::new("", CapabilityTier::Full);
        assert!(matches!(
            TokenTable::from_tokens([token]).unwrap_err(),
            ConfigError::EmptySecret
        ));
    }
}
