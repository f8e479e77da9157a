//! The dispatcher facade.
//!
//! [`Gateway`] owns the two registries and the shared context. Every
//! inbound call carries a token; the dispatcher filters by tier before
//! anything else runs, and an unauthorized name fails exactly like an
//! unregistered one.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use quill_config::DailySettingsProvider;
use quill_core::{CapabilityTier, CapabilityToken};
use quill_resolve::{Clock, ResolveOptions, UriResolver, SCHEME_DAILY, SCHEME_DIRECT};
use quill_vault::Vault;

use crate::descriptor::{GatewayContext, ResourceDescriptor, ToolDescriptor};
use crate::error::{GatewayError, GatewayResult};
use crate::extension::ExtensionProvider;
use crate::registry::Registry;
use crate::resources::{DailyResource, DirectResource, ExtensionResource};
use crate::tools::{
    AppendDocumentTool, CompletePathTool, ListDirectoryTool, ListResourcesTool, OpenDailyNoteTool,
    ReadDocumentTool, ReplaceInDocumentTool, WriteDocumentTool,
};
use crate::types::{ResourceInfo, ToolInfo, ToolResult};

/// Builder assembling a [`Gateway`] at startup.
pub struct GatewayBuilder {
    vault: Arc<dyn Vault>,
    settings: Arc<dyn DailySettingsProvider>,
    clock: Arc<dyn Clock>,
    extensions: Vec<Arc<dyn ExtensionProvider>>,
}

impl GatewayBuilder {
    /// Start building over the given collaborators.
    #[must_use]
    pub fn new(
        vault: Arc<dyn Vault>,
        settings: Arc<dyn DailySettingsProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            vault,
            settings,
            clock,
            extensions: Vec::new(),
        }
    }

    /// Register an extension provider. Registration order is advertise
    /// order; duplicates of a scheme are rejected at build time.
    #[must_use]
    pub fn with_extension(mut self, provider: Arc<dyn ExtensionProvider>) -> Self {
        self.extensions.push(provider);
        self
    }

    /// Assemble the gateway: resolver, resource registry, tool registry.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidArguments`] when two extensions claim
    /// the same scheme, or one claims a built-in scheme.
    pub fn build(self) -> GatewayResult<Gateway> {
        let resolver = Arc::new(UriResolver::new(
            self.vault.clone(),
            self.settings.clone(),
            self.clock,
        ));

        let mut resources: Registry<ResourceDescriptor> = Registry::new();
        resources.register(ResourceDescriptor::new(
            SCHEME_DIRECT,
            "documents addressed by vault path",
            CapabilityTier::ReadOnly,
            Arc::new(DirectResource),
        ));
        resources.register(ResourceDescriptor::new(
            SCHEME_DAILY,
            "daily notes addressed by date alias",
            CapabilityTier::ReadOnly,
            Arc::new(DailyResource::new(self.settings)),
        ));

        let mut extensions: HashMap<String, Arc<dyn ExtensionProvider>> = HashMap::new();
        for provider in self.extensions {
            let scheme = provider.scheme().to_string();
            let registered = resources.register(ResourceDescriptor::new(
                scheme.clone(),
                provider.description(),
                CapabilityTier::ReadOnly,
                Arc::new(ExtensionResource::new(provider.clone())),
            ));
            if !registered {
                return Err(GatewayError::InvalidArguments {
                    reason: format!("extension scheme \"{scheme}\" is already registered"),
                });
            }
            extensions.insert(scheme, provider);
        }

        // Tool registration order is the advertise order.
        let resource_snapshot: Vec<(String, String, CapabilityTier)> = resources
            .iter()
            .map(|r| (r.scheme.clone(), r.description.clone(), r.min_tier))
            .collect();

        let mut tools: Registry<ToolDescriptor> = Registry::new();
        tools.register(ToolDescriptor::new(
            "list_resources",
            "list the resource schemes available to you",
            CapabilityTier::Restricted,
            false,
            Arc::new(ListResourcesTool::new(resource_snapshot)),
        ));
        tools.register(ToolDescriptor::new(
            "read_document",
            "read a document or list a directory by URI",
            CapabilityTier::ReadOnly,
            false,
            Arc::new(ReadDocumentTool),
        ));
        tools.register(ToolDescriptor::new(
            "list_directory",
            "list documents under a directory at a given depth",
            CapabilityTier::ReadOnly,
            false,
            Arc::new(ListDirectoryTool),
        ));
        tools.register(ToolDescriptor::new(
            "complete_path",
            "autocomplete vault paths by prefix",
            CapabilityTier::ReadOnly,
            false,
            Arc::new(CompletePathTool),
        ));
        tools.register(ToolDescriptor::new(
            "open_daily_note",
            "open the daily note for a date alias",
            CapabilityTier::ReadOnly,
            false,
            Arc::new(OpenDailyNoteTool),
        ));
        tools.register(ToolDescriptor::new(
            "write_document",
            "create or overwrite a document",
            CapabilityTier::Full,
            true,
            Arc::new(WriteDocumentTool),
        ));
        tools.register(ToolDescriptor::new(
            "append_document",
            "append content to a document, creating it if absent",
            CapabilityTier::Full,
            true,
            Arc::new(AppendDocumentTool),
        ));
        tools.register(ToolDescriptor::new(
            "replace_in_document",
            "replace exactly one occurrence of a string in a document",
            CapabilityTier::Full,
            true,
            Arc::new(ReplaceInDocumentTool),
        ));

        Ok(Gateway {
            ctx: GatewayContext {
                vault: self.vault,
                resolver,
                extensions,
            },
            tools,
            resources,
        })
    }
}

/// The capability-scoped dispatcher.
pub struct Gateway {
    ctx: GatewayContext,
    tools: Registry<ToolDescriptor>,
    resources: Registry<ResourceDescriptor>,
}

impl Gateway {
    /// Tools advertised to this token, in registration order.
    ///
    /// A pure function of (registry contents, token tier): two calls with
    /// the same token always agree.
    #[must_use]
    pub fn list_tools(&self, token: &CapabilityToken) -> Vec<ToolInfo> {
        self.tools
            .visible(token.tier)
            .map(|t| ToolInfo {
                name: t.name.clone(),
                description: t.description.clone(),
            })
            .collect()
    }

    /// Resource schemes advertised to this token, in registration order.
    #[must_use]
    pub fn list_resource_schemes(&self, token: &CapabilityToken) -> Vec<ResourceInfo> {
        self.resources
            .visible(token.tier)
            .map(|r| ResourceInfo {
                scheme: r.scheme.clone(),
                description: r.description.clone(),
            })
            .collect()
    }

    /// Dispatch a tool call. Always returns a protocol-shaped result;
    /// failures are folded into an error [`ToolResult`].
    pub async fn call_tool(
        &self,
        name: &str,
        token: &CapabilityToken,
        args: Value,
    ) -> ToolResult {
        match self.dispatch(name, token, args).await {
            Ok(result) => result,
            Err(e) => {
                debug!(tool = name, error = %e, "tool call failed");
                e.to_result()
            }
        }
    }

    async fn dispatch(
        &self,
        name: &str,
        token: &CapabilityToken,
        args: Value,
    ) -> GatewayResult<ToolResult> {
        let unknown = || GatewayError::UnknownTool {
            name: name.to_string(),
        };
        // Capability boundaries must be indistinguishable from
        // non-existence, so the gated and the missing case share one error.
        let descriptor = self.tools.get(name).ok_or_else(unknown)?;
        if token.tier < descriptor.min_tier {
            warn!(tool = name, tier = %token.tier, "tool hidden from caller");
            return Err(unknown());
        }
        debug!(tool = name, "dispatching");
        descriptor.handler.call(&self.ctx, token, args).await
    }

    /// Read a resource by URI, routing through the owning resource type.
    pub async fn read_resource(&self, uri: &str, token: &CapabilityToken) -> ToolResult {
        match self.read_resource_inner(uri, token).await {
            Ok(result) => result,
            Err(e) => {
                debug!(uri, error = %e, "resource read failed");
                e.to_result()
            }
        }
    }

    async fn read_resource_inner(
        &self,
        uri: &str,
        token: &CapabilityToken,
    ) -> GatewayResult<ToolResult> {
        let address = self
            .ctx
            .resolver
            .resolve(uri, ResolveOptions::default())
            .await?;
        let scheme = match &address.scheme {
            quill_core::AddressScheme::Direct => SCHEME_DIRECT,
            quill_core::AddressScheme::DailyAlias => SCHEME_DAILY,
            quill_core::AddressScheme::Extension { name } => name.as_str(),
        };
        let descriptor = self.lookup_resource(scheme, token)?;
        descriptor.ops.read(&self.ctx, token, &address).await
    }

    /// Enumerate the resources of one scheme visible to the token.
    ///
    /// # Errors
    ///
    /// Returns the uniform unknown-scheme error for unregistered or hidden
    /// schemes.
    pub async fn list_resources(
        &self,
        scheme: &str,
        token: &CapabilityToken,
    ) -> GatewayResult<Vec<String>> {
        let descriptor = self.lookup_resource(scheme, token)?;
        descriptor.ops.list(&self.ctx, token).await
    }

    /// Prefix completion within one scheme.
    ///
    /// # Errors
    ///
    /// Returns the uniform unknown-scheme error for unregistered or hidden
    /// schemes.
    pub async fn complete(
        &self,
        scheme: &str,
        prefix: &str,
        token: &CapabilityToken,
    ) -> GatewayResult<Vec<String>> {
        let descriptor = self.lookup_resource(scheme, token)?;
        descriptor.ops.complete(&self.ctx, token, prefix).await
    }

    fn lookup_resource(
        &self,
        scheme: &str,
        token: &CapabilityToken,
    ) -> GatewayResult<&ResourceDescriptor> {
        let unknown = || GatewayError::UnknownScheme {
            scheme: scheme.to_string(),
        };
        let descriptor = self.resources.get(scheme).ok_or_else(unknown)?;
        if token.tier < descriptor.min_tier {
            return Err(unknown());
        }
        Ok(descriptor)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("tools", &self.tools.iter().count())
            .field("resources", &self.resources.iter().count())
            .finish_non_exhaustive()
    }
}
