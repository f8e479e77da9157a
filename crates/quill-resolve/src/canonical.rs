//! Path/URI canonicalization.
//!
//! Normalizes the two historically-supported slash conventions
//! (`scheme://rest` and `scheme:///rest`) to one internal form, strips and
//! collapses slashes, percent-decodes, and rejects traversal and
//! authority-looking inputs. Bare strings with no scheme are direct paths.
//!
//! Idempotent for canonical output: decoding happens once, and a decoded
//! path that still contains a decodable percent triple (a double-encoded
//! input) is rejected, so canonical output never decodes further.

use crate::error::{ResolveError, ResolveResult};

/// A canonicalized address: optional scheme plus cleaned relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalAddress {
    /// Lower-cased scheme, if the address carried one.
    pub scheme: Option<String>,
    /// Cleaned relative path (no leading/trailing slashes, percent-decoded).
    pub path: String,
    /// Whether the raw address addressed a directory (trailing slash).
    pub directory_hint: bool,
}

/// Schemes we recognize and refuse to serve. Anything else unknown is left
/// for the extension registry to claim.
const REJECTED_SCHEMES: &[&str] = &["http", "https", "file", "ftp", "mailto"];

fn valid_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn hex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b.wrapping_sub(b'0')),
        b'a'..=b'f' => Some(b.wrapping_sub(b'a').wrapping_add(10)),
        b'A'..=b'F' => Some(b.wrapping_sub(b'A').wrapping_add(10)),
        _ => None,
    }
}

/// Whether `text` contains a `%xx` triple that [`percent_decode`] would
/// decode.
fn has_decodable_triple(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && matches!(
                (bytes.get(i.wrapping_add(1)), bytes.get(i.wrapping_add(2))),
                (Some(&hi), Some(&lo)) if hex(hi).is_some() && hex(lo).is_some()
            )
    })
}

/// Decode percent triples. Strict on malformed UTF-8; a `%` not followed by
/// two hex digits is kept literal (filenames may legitimately contain `%`).
/// A decoded path that still contains a decodable triple was double-encoded,
/// which would break one-pass canonicalization, so it is rejected.
fn percent_decode(raw: &str, address: &str) -> ResolveResult<String> {
    let bytes = raw.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let (Some(&hi), Some(&lo)) = (
                bytes.get(i.wrapping_add(1)),
                bytes.get(i.wrapping_add(2)),
            ) {
                if let (Some(hi), Some(lo)) = (hex(hi), hex(lo)) {
                    out.push(hi.wrapping_shl(4) | lo);
                    i = i.wrapping_add(3);
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i = i.wrapping_add(1);
    }

    let decoded = String::from_utf8(out)
        .map_err(|_| ResolveError::invalid(address, "percent sequence decodes to invalid UTF-8"))?;
    if has_decodable_triple(&decoded) {
        return Err(ResolveError::invalid(
            address,
            "double-encoded percent sequence",
        ));
    }
    Ok(decoded)
}

/// Canonicalize a raw path or URI string.
///
/// # Errors
///
/// - [`ResolveError::UnsupportedScheme`] for recognized web schemes.
/// - [`ResolveError::InvalidAddress`] for empty/malformed schemes,
///   authority-looking first segments (a `user@host` or `host:port` shape
///   almost always means a missing third slash, which would silently
///   truncate the path — fail loudly instead), `..` traversal, and
///   undecodable percent sequences.
pub fn canonicalize(raw: &str) -> ResolveResult<CanonicalAddress> {
    let trimmed = raw.trim();

    let (scheme, rest) = match trimmed.split_once("://") {
        Some((s, rest)) => {
            if s.is_empty() || !valid_scheme(s) {
                return Err(ResolveError::invalid(raw, "malformed scheme"));
            }
            let scheme = s.to_ascii_lowercase();
            if REJECTED_SCHEMES.contains(&scheme.as_str()) {
                return Err(ResolveError::UnsupportedScheme { scheme });
            }
            // Two-slash form: what a strict URI parser would call the
            // authority is really the first path segment. Reject shapes
            // that only make sense as a genuine authority.
            if !rest.starts_with('/') {
                let first = rest.split('/').next().unwrap_or("");
                if first.contains('@') || first.contains(':') {
                    return Err(ResolveError::invalid(
                        raw,
                        "authority component is not supported (did you mean scheme:///path?)",
                    ));
                }
            }
            (Some(scheme), rest)
        }
        None => (None, trimmed),
    };

    let directory_hint = rest.ends_with('/') && !rest.trim_matches('/').is_empty();
    let decoded = percent_decode(rest, raw)?;

    let mut segments = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(ResolveError::invalid(raw, "path traversal is not allowed"));
            }
            s => segments.push(s),
        }
    }

    Ok(CanonicalAddress {
        scheme,
        path: segments.join("/"),
        directory_hint,
    })
}
