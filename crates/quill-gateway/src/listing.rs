//! Directory listing.
//!
//! Shared by the direct and daily resource types. Given the set of
//! policy-visible document paths, a directory prefix and a depth, produce
//! the grouped listing: bare leaf names for documents at or above the
//! requested depth, `segment/` markers for collapsed subtrees below it.

use std::collections::BTreeSet;

use quill_policy::is_ancestor;

use crate::error::{GatewayError, GatewayResult};

/// Default listing depth.
pub const DEFAULT_DEPTH: usize = 1;

/// List the entries under `dir` at the requested depth.
///
/// `depth` counts levels beyond the immediate children: `0` shows only this
/// level, `1` (the default) descends one further, and so on. Paths
/// shallower than the requested depth appear at their true depth; deeper
/// subtrees are collapsed with a trailing `/`. Output is lexicographically
/// sorted and deduplicated.
///
/// # Errors
///
/// Returns [`GatewayError::EmptyDirectory`] when nothing matches. A truly
/// empty directory and a policy-hidden one are identical by design, so
/// callers must not distinguish them.
pub fn list_directory(paths: &[String], dir: &str, depth: usize) -> GatewayResult<Vec<String>> {
    let dir = dir.trim_matches('/');
    let mut entries = BTreeSet::new();

    for path in paths {
        if !is_ancestor(dir, path) {
            continue;
        }
        let rel = if dir.is_empty() {
            path.as_str()
        } else {
            // is_ancestor guarantees the boundary slash (or equality, which
            // cannot happen for a document path listed under itself).
            path.get(dir.len().saturating_add(1)..).unwrap_or("")
        };
        if rel.is_empty() {
            continue;
        }
        let segments: Vec<&str> = rel.split('/').collect();
        let last = segments.len().saturating_sub(1);
        let boundary = depth.min(last);
        let joined = segments
            .get(..=boundary)
            .unwrap_or_default()
            .join("/");
        if last > boundary {
            entries.insert(format!("{joined}/"));
        } else {
            entries.insert(joined);
        }
    }

    if entries.is_empty() {
        return Err(GatewayError::EmptyDirectory {
            path: dir.to_string(),
        });
    }
    Ok(entries.into_iter().collect())
}
