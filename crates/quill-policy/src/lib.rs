//! Longest-prefix directory access policy.
//!
//! A token carries an ordered list of allow/deny directory rules. For a
//! candidate path, every rule whose prefix is an ancestor of (or equal to)
//! the path is in play; the longest prefix wins, and a tie at equal length
//! breaks toward deny. A token with no rules is allowed everywhere within
//! its tier's scope — rules carve exceptions, they do not define the scope.
//!
//! Tier gating of whole operation categories happens in the dispatcher
//! before this evaluator is consulted.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use quill_core::{CapabilityToken, RuleEffect};
use tracing::trace;

/// Whether `prefix` is an ancestor of (or equal to) `path`.
///
/// Both are canonical paths. The empty prefix is the vault root and matches
/// everything; otherwise the match must end on a `/` segment boundary, so
/// `secret` does not match `secrets.md`.
#[must_use]
pub fn is_ancestor(prefix: &str, path: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Evaluate the token's directory rules against a canonical path.
///
/// Returns `true` when the path is visible to the token.
#[must_use]
pub fn is_allowed(path: &str, token: &CapabilityToken) -> bool {
    let path = path.trim_matches('/');

    let mut best_len: Option<usize> = None;
    let mut best_effect = RuleEffect::Allow;
    for rule in &token.directory_rules {
        if !is_ancestor(&rule.prefix, path) {
            continue;
        }
        let len = rule.prefix.len();
        match best_len {
            Some(best) if len < best => {}
            Some(best) if len == best => {
                // Fail closed on equally specific rules.
                if rule.effect == RuleEffect::Deny {
                    best_effect = RuleEffect::Deny;
                }
            }
            _ => {
                best_len = Some(len);
                best_effect = rule.effect;
            }
        }
    }

    let allowed = best_effect == RuleEffect::Allow;
    if !allowed {
        trace!(path, "path denied by directory rule");
    }
    allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{CapabilityTier, DirectoryRule};

    fn token_with(rules: Vec<DirectoryRule>) -> CapabilityToken {
        CapabilityToken::new("t", CapabilityTier::Full).with_rules(rules)
    }

    #[test]
    fn test_empty_rules_allow_everywhere() {
        let token = token_with(vec![]);
        assert!(is_allowed("anything/at/all.md", &token));
    }

    #[test]
    fn test_longest_prefix_wins() {
        // Root allow, subtree deny: the more specific rule governs.
        let token = token_with(vec![
            DirectoryRule::allow("/"),
            DirectoryRule::deny("/secret"),
        ]);
        assert!(!is_allowed("secret/x", &token));
        assert!(!is_allowed("secret", &token));
        assert!(is_allowed("public/x", &token));
    }

    #[test]
    fn test_deny_then_allow_deeper() {
        let token = token_with(vec![
            DirectoryRule::deny("private"),
            DirectoryRule::allow("private/shared"),
        ]);
        assert!(is_allowed("private/shared/doc.md", &token));
        assert!(!is_allowed("private/other.md", &token));
    }

    #[test]
    fn test_tie_breaks_toward_deny() {
        let token = token_with(vec![
            DirectoryRule::allow("dir"),
            DirectoryRule::deny("dir"),
        ]);
        assert!(!is_allowed("dir/x.md", &token));
    }

    #[test]
    fn test_prefix_requires_segment_boundary() {
        let token = token_with(vec![DirectoryRule::deny("secret")]);
        assert!(!is_allowed("secret/x.md", &token));
        // A sibling file that merely shares the string prefix is unaffected.
        assert!(is_allowed("secrets.md", &token));
    }

    #[test]
    fn test_is_ancestor() {
        assert!(is_ancestor("", "a/b"));
        assert!(is_ancestor("a", "a/b"));
        assert!(is_ancestor("a/b", "a/b"));
        assert!(!is_ancestor("a/b", "a"));
        assert!(!is_ancestor("a", "ab"));
    }
}
