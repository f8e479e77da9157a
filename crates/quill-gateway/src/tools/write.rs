//! Mutating tools.
//!
//! All three follow the same shape: resolve, check write access, then make
//! exactly one vault write. No side effect happens before the final write
//! call, so an abandoned request never leaves a half-applied mutation.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use quill_core::{AddressScheme, CapabilityToken, ResolvedAddress};
use quill_resolve::{ResolveError, ResolveOptions};

use crate::descriptor::{GatewayContext, ToolHandler};
use crate::error::{GatewayError, GatewayResult};
use crate::tools::{check_write_access, require_str};
use crate::types::ToolResult;

/// Resolve a URI for mutation. A missing daily note is not an error here —
/// the write itself will create it — but extension URIs cannot be written.
async fn resolve_for_write(
    ctx: &GatewayContext,
    uri: &str,
) -> GatewayResult<ResolvedAddress> {
    let resolved = match ctx.resolver.resolve(uri, ResolveOptions::default()).await {
        Ok(address) => address,
        Err(ResolveError::DailyNoteMissing { alias, path }) => {
            ResolvedAddress::daily(path, alias)
        }
        Err(e) => return Err(e.into()),
    };
    if let AddressScheme::Extension { name } = &resolved.scheme {
        return Err(GatewayError::InvalidArguments {
            reason: format!("{name}:// resources are read-only"),
        });
    }
    Ok(resolved)
}

/// `write_document` — create or overwrite a document.
#[derive(Debug, Default, Clone, Copy)]
pub struct WriteDocumentTool;

#[async_trait]
impl ToolHandler for WriteDocumentTool {
    async fn call(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        args: Value,
    ) -> GatewayResult<ToolResult> {
        let uri = require_str(&args, "uri")?;
        let content = require_str(&args, "content")?;
        let address = resolve_for_write(ctx, &uri).await?;
        check_write_access(ctx, token, &address.canonical_path).await?;

        ctx.vault.write(&address.canonical_path, &content).await?;
        info!(path = %address.canonical_path, "document written");
        Ok(ToolResult::text(format!(
            "wrote {}",
            address.canonical_path
        )))
    }
}

/// `append_document` — append to a document, creating it if absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppendDocumentTool;

#[async_trait]
impl ToolHandler for AppendDocumentTool {
    async fn call(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        args: Value,
    ) -> GatewayResult<ToolResult> {
        let uri = require_str(&args, "uri")?;
        let content = require_str(&args, "content")?;
        let address = resolve_for_write(ctx, &uri).await?;
        check_write_access(ctx, token, &address.canonical_path).await?;

        let existing = match ctx.vault.read(&address.canonical_path).await {
            Ok(text) => text,
            Err(quill_vault::VaultError::NotFound { .. }) => String::new(),
            Err(e) => return Err(e.into()),
        };
        let mut updated = existing;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(&content);

        ctx.vault.write(&address.canonical_path, &updated).await?;
        info!(path = %address.canonical_path, "document appended");
        Ok(ToolResult::text(format!(
            "appended to {}",
            address.canonical_path
        )))
    }
}

/// `replace_in_document` — replace exactly one occurrence of a search
/// string. Zero or multiple matches fail with `AmbiguousMatch`; a
/// concurrent edit that changes the count re-fails cleanly on retry rather
/// than writing garbage.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplaceInDocumentTool;

#[async_trait]
impl ToolHandler for ReplaceInDocumentTool {
    async fn call(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        args: Value,
    ) -> GatewayResult<ToolResult> {
        let uri = require_str(&args, "uri")?;
        let find = require_str(&args, "find")?;
        let replace = require_str(&args, "replace")?;
        if find.is_empty() {
            return Err(GatewayError::InvalidArguments {
                reason: "\"find\" must not be empty".to_string(),
            });
        }

        let address = ctx
            .resolver
            .resolve(&uri, ResolveOptions::default())
            .await?;
        check_write_access(ctx, token, &address.canonical_path).await?;

        let content = ctx.vault.read(&address.canonical_path).await?;
        let matches = content.matches(&find).count();
        if matches != 1 {
            return Err(GatewayError::AmbiguousMatch {
                path: address.canonical_path,
                matches,
            });
        }

        let updated = content.replacen(&find, &replace, 1);
        ctx.vault.write(&address.canonical_path, &updated).await?;
        info!(path = %address.canonical_path, "document patched");
        Ok(ToolResult::text(format!(
            "replaced 1 occurrence in {}",
            address.canonical_path
        )))
    }
}
