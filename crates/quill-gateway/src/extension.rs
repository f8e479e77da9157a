//! Extension provider contract.
//!
//! Third-party engines (structured-query, task-tracking, quick-capture,
//! time-block) surface their results as addressable resources by
//! implementing this trait and registering under their own scheme. Their
//! query semantics are their own contract; the gateway only needs
//! enablement and the scheme-to-ops mapping.

use async_trait::async_trait;

use quill_core::CapabilityToken;

use crate::error::GatewayResult;
use crate::types::ToolResult;

/// A third-party engine addressable through its own scheme.
#[async_trait]
pub trait ExtensionProvider: Send + Sync {
    /// The scheme this provider owns, e.g. `tasks`.
    fn scheme(&self) -> &str;

    /// Human-readable description for resource listings.
    fn description(&self) -> &str;

    /// Whether the provider is currently available. A disabled provider's
    /// scheme reads as unknown, not as an error naming the provider.
    fn is_enabled(&self) -> bool;

    /// Enumerate the provider's addressable entries for this token.
    async fn list(&self, token: &CapabilityToken) -> GatewayResult<Vec<String>>;

    /// Evaluate the path/query under this provider's namespace.
    async fn read(&self, path: &str, token: &CapabilityToken) -> GatewayResult<ToolResult>;
}
