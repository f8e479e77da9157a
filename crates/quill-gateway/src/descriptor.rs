//! Tool and resource descriptors.
//!
//! A descriptor bundles a name/scheme, a human description, the minimum
//! capability tier that may see it, and the behavior behind it. Descriptors
//! are registered once at startup; the advertise order is the registration
//! order.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use quill_core::{CapabilityTier, CapabilityToken, ResolvedAddress};
use quill_resolve::UriResolver;
use quill_vault::Vault;

use crate::error::GatewayResult;
use crate::extension::ExtensionProvider;
use crate::types::ToolResult;

/// Shared collaborators handed to every handler invocation.
///
/// Handlers resolve addresses and check policy themselves before touching
/// the vault; the dispatcher never pre-resolves because some tools take
/// non-path arguments.
pub struct GatewayContext {
    /// The document store.
    pub vault: Arc<dyn Vault>,
    /// The address resolver.
    pub resolver: Arc<UriResolver>,
    /// Enabled extension providers, keyed by scheme.
    pub extensions: HashMap<String, Arc<dyn ExtensionProvider>>,
}

impl std::fmt::Debug for GatewayContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayContext")
            .field("extensions", &self.extensions.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Behavior behind a registered tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool.
    async fn call(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        args: Value,
    ) -> GatewayResult<ToolResult>;
}

/// A registered tool.
pub struct ToolDescriptor {
    /// Tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Minimum tier that may see and call this tool.
    pub min_tier: CapabilityTier,
    /// Whether the tool mutates the vault.
    pub mutating: bool,
    /// The handler.
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        min_tier: CapabilityTier,
        mutating: bool,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            min_tier,
            mutating,
            handler,
        }
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("min_tier", &self.min_tier)
            .field("mutating", &self.mutating)
            .finish_non_exhaustive()
    }
}

/// Behavior behind a registered resource type.
#[async_trait]
pub trait ResourceOps: Send + Sync {
    /// Enumerate resource paths visible to the token.
    async fn list(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
    ) -> GatewayResult<Vec<String>>;

    /// Prefix-based autocomplete.
    async fn complete(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        prefix: &str,
    ) -> GatewayResult<Vec<String>>;

    /// Read a resolved address: leaf content or directory enumeration.
    async fn read(
        &self,
        ctx: &GatewayContext,
        token: &CapabilityToken,
        address: &ResolvedAddress,
    ) -> GatewayResult<ToolResult>;
}

/// A registered resource type.
pub struct ResourceDescriptor {
    /// Scheme name, e.g. `direct`.
    pub scheme: String,
    /// Human-readable description.
    pub description: String,
    /// Minimum tier that may see and read this resource type.
    pub min_tier: CapabilityTier,
    /// The operations.
    pub ops: Arc<dyn ResourceOps>,
}

impl ResourceDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(
        scheme: impl Into<String>,
        description: impl Into<String>,
        min_tier: CapabilityTier,
        ops: Arc<dyn ResourceOps>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            description: description.into(),
            min_tier,
            ops,
        }
    }
}

impl std::fmt::Debug for ResourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceDescriptor")
            .field("scheme", &self.scheme)
            .field("min_tier", &self.min_tier)
            .finish_non_exhaustive()
    }
}
