//! Read-side tools.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use quill_core::{AddressScheme, CapabilityTier, CapabilityToken};
use quill_resolve::ResolveOptions;

use crate::descriptor::{GatewayContext, ToolHandler};
use crate::error::{GatewayError, GatewayResult};
use crate::listing::{list_directory, DEFAULT_DEPTH};
use crate::resources::direct::{read_leaf_or_directory, visible_paths};
use crate::tools::{optional_str, optional_u64, require_str};
use crate::types::ToolResult;

/// `read_document` — resolve a URI and return leaf content or a directory
/// listing. Extension URIs are deferred to their provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadDocumentTool;

#[async_trait]
impl ToolHandler for ReadDocumentTool {
    async fn call(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        args: Value,
    ) -> GatewayResult<ToolResult> {
        let uri = require_str(&args, "uri")?;
        let address = ctx
            .resolver
            .resolve(&uri, ResolveOptions::default())
            .await?;

        match &address.scheme {
            AddressScheme::Extension { name } => {
                let provider =
                    ctx.extensions
                        .get(name)
                        .filter(|p| p.is_enabled())
                        .ok_or_else(|| GatewayError::UnknownScheme {
                            scheme: name.clone(),
                        })?;
                provider.read(&address.canonical_path, token).await
            }
            _ => {
                read_leaf_or_directory(
                    ctx,
                    token,
                    &address.canonical_path,
                    address.is_directory_hint,
                )
                .await
            }
        }
    }
}

/// `list_directory` — grouped listing at a requested depth.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListDirectoryTool;

#[async_trait]
impl ToolHandler for ListDirectoryTool {
    async fn call(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        args: Value,
    ) -> GatewayResult<ToolResult> {
        let raw = optional_str(&args, "path").unwrap_or_default();
        let depth = optional_u64(&args, "depth")
            .map_or(DEFAULT_DEPTH, |d| usize::try_from(d).unwrap_or(usize::MAX));

        let address = ctx
            .resolver
            .resolve(&raw, ResolveOptions::default())
            .await?;
        debug!(dir = %address.canonical_path, depth, "listing directory");

        let visible = visible_paths(ctx, token).await?;
        let entries = list_directory(&visible, &address.canonical_path, depth)?;
        Ok(ToolResult::lines(&entries))
    }
}

/// `complete_path` — prefix autocomplete over policy-visible paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompletePathTool;

#[async_trait]
impl ToolHandler for CompletePathTool {
    async fn call(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        args: Value,
    ) -> GatewayResult<ToolResult> {
        let prefix = optional_str(&args, "prefix").unwrap_or_default();
        let prefix = prefix.trim_start_matches('/');
        let matches: Vec<String> = visible_paths(ctx, token)
            .await?
            .into_iter()
            .filter(|p| p.starts_with(prefix))
            .collect();
        Ok(ToolResult::lines(&matches))
    }
}

/// `list_resources` — the resource schemes visible to the calling token.
///
/// Built from a registration-time snapshot: the registry is startup-static,
/// so the snapshot stays accurate for the process lifetime.
#[derive(Debug, Clone)]
pub struct ListResourcesTool {
    entries: Vec<(String, String, CapabilityTier)>,
}

impl ListResourcesTool {
    /// Create from `(scheme, description, min_tier)` snapshot entries.
    #[must_use]
    pub fn new(entries: Vec<(String, String, CapabilityTier)>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl ToolHandler for ListResourcesTool {
    async fn call(
        &self,
        _ctx: &GatewayContext,
        token: &CapabilityToken,
        _args: Value,
    ) -> GatewayResult<ToolResult> {
        let lines: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, _, min_tier)| *min_tier <= token.tier)
            .map(|(scheme, description, _)| format!("{scheme}: {description}"))
            .collect();
        Ok(ToolResult::lines(&lines))
    }
}
