//! Extension-backed resource type.
//!
//! Thin adapter from the registry's [`ResourceOps`] shape to an
//! [`ExtensionProvider`]. A provider that reports itself disabled reads as
//! an unknown scheme — availability must not leak more than existence.

use std::sync::Arc;

use async_trait::async_trait;

use quill_core::{CapabilityToken, ResolvedAddress};

use crate::descriptor::{GatewayContext, ResourceOps};
use crate::error::{GatewayError, GatewayResult};
use crate::extension::ExtensionProvider;
use crate::types::ToolResult;

/// Resource type wrapping one extension provider.
pub struct ExtensionResource {
    provider: Arc<dyn ExtensionProvider>,
}

impl ExtensionResource {
    /// Wrap a provider.
    #[must_use]
    pub fn new(provider: Arc<dyn ExtensionProvider>) -> Self {
        Self { provider }
    }

    fn ensure_enabled(&self) -> GatewayResult<()> {
        if self.provider.is_enabled() {
            Ok(())
        } else {
            Err(GatewayError::UnknownScheme {
                scheme: self.provider.scheme().to_string(),
            })
        }
    }
}

impl std::fmt::Debug for ExtensionResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionResource")
            .field("scheme", &self.provider.scheme())
            .field("enabled", &self.provider.is_enabled())
            .finish()
    }
}

#[async_trait]
impl ResourceOps for ExtensionResource {
    async fn list(
        &self,
        _ctx: &GatewayContext,
        token: &CapabilityToken,
    ) -> GatewayResult<Vec<String>> {
        self.ensure_enabled()?;
        self.provider.list(token).await
    }

    async fn complete(
        &self,
        _ctx: &GatewayContext,
        token: &CapabilityToken,
        prefix: &str,
    ) -> GatewayResult<Vec<String>> {
        self.ensure_enabled()?;
        Ok(self
            .provider
            .list(token)
            .await?
            .into_iter()
            .filter(|entry| entry.starts_with(prefix))
            .collect())
    }

    async fn read(
        &self,
        _ctx: &GatewayContext,
        token: &CapabilityToken,
        address: &ResolvedAddress,
    ) -> GatewayResult<ToolResult> {
        self.ensure_enabled()?;
        self.provider.read(&address.canonical_path, token).await
    }
}
