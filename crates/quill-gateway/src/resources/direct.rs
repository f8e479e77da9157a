//! Direct vault-path resource type.

use async_trait::async_trait;

use quill_core::{CapabilityToken, ResolvedAddress};
use quill_policy::{is_allowed, is_ancestor};

use crate::descriptor::{GatewayContext, ResourceOps};
use crate::error::{GatewayError, GatewayResult};
use crate::listing::{list_directory, DEFAULT_DEPTH};
use crate::types::{ToolContent, ToolResult};

/// Resource type for plain vault paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectResource;

/// All vault paths visible to the token.
pub(crate) async fn visible_paths(
    ctx: &GatewayContext,
    token: &CapabilityToken,
) -> GatewayResult<Vec<String>> {
    let paths = ctx.vault.list_all_paths().await?;
    Ok(paths
        .into_iter()
        .filter(|p| is_allowed(p, token))
        .collect())
}

/// Read a canonical path as a leaf, falling back to a directory listing
/// when the path is a prefix of other documents. A policy-denied path reads
/// as not-found.
pub(crate) async fn read_leaf_or_directory(
    ctx: &GatewayContext,
    token: &CapabilityToken,
    path: &str,
    directory_hint: bool,
) -> GatewayResult<ToolResult> {
    if !is_allowed(path, token) {
        // Existence-hiding: denied reads are indistinguishable from misses.
        return Err(GatewayError::NotFound {
            path: path.to_string(),
        });
    }

    if !directory_hint && ctx.vault.exists(path).await? {
        let text = ctx.vault.read(path).await?;
        return Ok(ToolResult {
            content: vec![ToolContent::Resource {
                uri: format!("direct:///{path}"),
                text: Some(text),
            }],
            is_error: false,
        });
    }

    let visible = visible_paths(ctx, token).await?;
    if visible.iter().any(|p| is_ancestor(path, p)) {
        let entries = list_directory(&visible, path, DEFAULT_DEPTH)?;
        return Ok(ToolResult::lines(&entries));
    }

    Err(GatewayError::NotFound {
        path: path.to_string(),
    })
}

#[async_trait]
impl ResourceOps for DirectResource {
    async fn list(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
    ) -> GatewayResult<Vec<String>> {
        visible_paths(ctx, token).await
    }

    async fn complete(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        prefix: &str,
    ) -> GatewayResult<Vec<String>> {
        let prefix = prefix.trim_start_matches('/');
        Ok(visible_paths(ctx, token)
            .await?
            .into_iter()
            .filter(|p| p.starts_with(prefix))
            .collect())
    }

    async fn read(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        address: &ResolvedAddress,
    ) -> GatewayResult<ToolResult> {
        read_leaf_or_directory(
            ctx,
            token,
            &address.canonical_path,
            address.is_directory_hint,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use quill_config::StaticDailySettings;
    use quill_core::{CapabilityTier, DirectoryRule};
    use quill_resolve::{FixedClock, UriResolver};
    use quill_vault::MemoryVault;

    fn fixture(vault: MemoryVault) -> GatewayContext {
        let vault: Arc<MemoryVault> = Arc::new(vault);
        let resolver = UriResolver::new(
            vault.clone(),
            Arc::new(StaticDailySettings::disabled()),
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2023, 5, 9).unwrap())),
        );
        GatewayContext {
            vault,
            resolver: Arc::new(resolver),
            extensions: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn test_leaf_read() {
        let ctx = fixture(MemoryVault::seeded([("a.md", "body")]));
        let token = CapabilityToken::new("t", CapabilityTier::ReadOnly);
        let result = read_leaf_or_directory(&ctx, &token, "a.md", false)
            .await
            .unwrap();
        assert_eq!(result.text_content(), "body");
    }

    #[tokio::test]
    async fn test_directory_fallback() {
        let ctx = fixture(MemoryVault::seeded([("dir/a.md", ""), ("dir/b.md", "")]));
        let token = CapabilityToken::new("t", CapabilityTier::ReadOnly);
        let result = read_leaf_or_directory(&ctx, &token, "dir", false)
            .await
            .unwrap();
        assert_eq!(result.text_content(), "a.md\nb.md");
    }

    #[tokio::test]
    async fn test_denied_reads_as_not_found() {
        let ctx = fixture(MemoryVault::seeded([("secret/a.md", "hidden")]));
        let token = CapabilityToken::new("t", CapabilityTier::ReadOnly)
            .with_rules([DirectoryRule::deny("secret")]);
        let err = read_leaf_or_directory(&ctx, &token, "secret/a.md", false)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_completion_respects_policy() {
        let ctx = fixture(MemoryVault::seeded([
            ("notes/a.md", ""),
            ("notes/b.md", ""),
            ("secret/c.md", ""),
        ]));
        let token = CapabilityToken::new("t", CapabilityTier::ReadOnly)
            .with_rules([DirectoryRule::deny("secret")]);
        let matches = DirectResource
            .complete(&ctx, &token, "notes/")
            .await
            .unwrap();
        assert_eq!(matches, vec!["notes/a.md", "notes/b.md"]);
        let matches = DirectResource.complete(&ctx, &token, "sec").await.unwrap();
        assert!(matches.is_empty());
    }
}
