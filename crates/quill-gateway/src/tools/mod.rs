//! Built-in tool handlers.
//!
//! Each handler resolves its own path arguments and checks directory
//! policy before touching the vault. Mutating tools surface `AccessDenied`
//! only for known-existing, policy-denied paths; a denied path that does
//! not exist reads as not-found, the same as for read surfaces.

/// Daily-note tool.
pub mod daily;
/// Read-side tools.
pub mod read;
/// Mutating tools.
pub mod write;

pub use daily::OpenDailyNoteTool;
pub use read::{CompletePathTool, ListDirectoryTool, ListResourcesTool, ReadDocumentTool};
pub use write::{AppendDocumentTool, ReplaceInDocumentTool, WriteDocumentTool};

use serde_json::Value;

use quill_core::CapabilityToken;
use quill_policy::is_allowed;

use crate::descriptor::GatewayContext;
use crate::error::{GatewayError, GatewayResult};

/// Extract a required string argument.
pub(crate) fn require_str(args: &Value, key: &str) -> GatewayResult<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| GatewayError::InvalidArguments {
            reason: format!("missing required string argument \"{key}\""),
        })
}

/// Extract an optional string argument.
pub(crate) fn optional_str(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(ToString::to_string)
}

/// Extract an optional boolean argument, defaulting to `false`.
pub(crate) fn optional_bool(args: &Value, key: &str) -> bool {
    args.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Extract an optional unsigned argument.
pub(crate) fn optional_u64(args: &Value, key: &str) -> Option<u64> {
    args.get(key).and_then(Value::as_u64)
}

/// Policy check for a mutating operation on `path`.
///
/// Denied-and-existing surfaces [`GatewayError::AccessDenied`]; denied-and-
/// absent stays [`GatewayError::NotFound`] so the denied subtree leaks
/// nothing.
pub(crate) async fn check_write_access(
    ctx: &GatewayContext,
    token: &CapabilityToken,
    path: &str,
) -> GatewayResult<()> {
    if is_allowed(path, token) {
        return Ok(());
    }
    if ctx.vault.exists(path).await? {
        Err(GatewayError::AccessDenied {
            path: path.to_string(),
        })
    } else {
        Err(GatewayError::NotFound {
            path: path.to_string(),
        })
    }
}
