//! Daily-note resource type.
//!
//! Listing enumerates notes under the configured daily folder; completion
//! offers the symbolic aliases plus dates of existing notes. Reads receive
//! an address the resolver has already pinned to a concrete path.

use std::sync::Arc;

use async_trait::async_trait;

use quill_config::DailySettingsProvider;
use quill_core::{CapabilityToken, ResolvedAddress};
use quill_policy::is_ancestor;

use crate::descriptor::{GatewayContext, ResourceOps};
use crate::error::GatewayResult;
use crate::resources::direct::{read_leaf_or_directory, visible_paths};
use crate::types::ToolResult;

/// Symbolic alias tokens, offered first in completions.
const ALIASES: &[&str] = &["today", "yesterday", "tomorrow"];

/// Resource type for daily notes.
pub struct DailyResource {
    settings: Arc<dyn DailySettingsProvider>,
}

impl DailyResource {
    /// Create the resource over the live settings source.
    #[must_use]
    pub fn new(settings: Arc<dyn DailySettingsProvider>) -> Self {
        Self { settings }
    }

    fn folder(&self) -> GatewayResult<String> {
        if !self.settings.is_enabled() {
            return Err(quill_resolve::ResolveError::DailyProviderUnavailable.into());
        }
        let settings = self
            .settings
            .snapshot()
            .map_err(quill_resolve::ResolveError::Config)?;
        Ok(settings.folder)
    }
}

impl std::fmt::Debug for DailyResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyResource")
            .field("enabled", &self.settings.is_enabled())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ResourceOps for DailyResource {
    async fn list(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
    ) -> GatewayResult<Vec<String>> {
        let folder = self.folder()?;
        Ok(visible_paths(ctx, token)
            .await?
            .into_iter()
            .filter(|p| is_ancestor(&folder, p))
            .collect())
    }

    async fn complete(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        prefix: &str,
    ) -> GatewayResult<Vec<String>> {
        let mut out: Vec<String> = ALIASES
            .iter()
            .filter(|a| a.starts_with(prefix))
            .map(ToString::to_string)
            .collect();

        // Existing note dates: strip folder and extension so completions
        // are valid daily:// path components.
        let folder = self.folder()?;
        for path in self.list(ctx, token).await? {
            let rel = if folder.is_empty() {
                path.as_str()
            } else {
                path.get(folder.len().saturating_add(1)..).unwrap_or("")
            };
            let date = rel.strip_suffix(".md").unwrap_or(rel);
            if !date.is_empty() && date.starts_with(prefix) {
                out.push(date.to_string());
            }
        }
        Ok(out)
    }

    async fn read(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        address: &ResolvedAddress,
    ) -> GatewayResult<ToolResult> {
        read_leaf_or_directory(ctx, token, &address.canonical_path, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::NaiveDate;
    use quill_config::{DailyNoteSettings, StaticDailySettings};
    use quill_core::CapabilityTier;
    use quill_resolve::{FixedClock, UriResolver};
    use quill_vault::MemoryVault;

    fn fixture(vault: MemoryVault) -> (GatewayContext, DailyResource) {
        let vault: Arc<MemoryVault> = Arc::new(vault);
        let settings: Arc<StaticDailySettings> = Arc::new(StaticDailySettings::enabled(
            DailyNoteSettings::new("YYYY-MM-DD", "daily"),
        ));
        let resolver = UriResolver::new(
            vault.clone(),
            settings.clone(),
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2023, 5, 9).unwrap())),
        );
        let ctx = GatewayContext {
            vault,
            resolver: Arc::new(resolver),
            extensions: HashMap::new(),
        };
        (ctx, DailyResource::new(settings))
    }

    #[tokio::test]
    async fn test_list_only_daily_folder() {
        let (ctx, resource) = fixture(MemoryVault::seeded([
            ("daily/2023-05-08.md", ""),
            ("daily/2023-05-09.md", ""),
            ("notes/other.md", ""),
        ]));
        let token = CapabilityToken::new("t", CapabilityTier::ReadOnly);
        let listed = resource.list(&ctx, &token).await.unwrap();
        assert_eq!(listed, vec!["daily/2023-05-08.md", "daily/2023-05-09.md"]);
    }

    #[tokio::test]
    async fn test_disabled_provider_is_actionable() {
        let vault: Arc<MemoryVault> = Arc::new(MemoryVault::new());
        let settings: Arc<StaticDailySettings> = Arc::new(StaticDailySettings::disabled());
        let resolver = UriResolver::new(
            vault.clone(),
            settings.clone(),
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2023, 5, 9).unwrap())),
        );
        let ctx = GatewayContext {
            vault,
            resolver: Arc::new(resolver),
            extensions: HashMap::new(),
        };
        let resource = DailyResource::new(settings);

        let token = CapabilityToken::new("t", CapabilityTier::ReadOnly);
        let err = resource.list(&ctx, &token).await.unwrap_err();
        let msg = err.public_message();
        assert!(
            msg.contains("configure daily note settings"),
            "message should tell the user what to do: {msg}"
        );
    }

    #[tokio::test]
    async fn test_complete_aliases_and_dates() {
        let (ctx, resource) = fixture(MemoryVault::seeded([("daily/2023-05-08.md", "")]));
        let token = CapabilityToken::new("t", CapabilityTier::ReadOnly);

        let out = resource.complete(&ctx, &token, "to").await.unwrap();
        assert_eq!(out, vec!["today", "tomorrow"]);

        let out = resource.complete(&ctx, &token, "2023").await.unwrap();
        assert_eq!(out, vec!["2023-05-08"]);
    }
}
