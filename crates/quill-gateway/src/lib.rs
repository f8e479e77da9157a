//! Capability-scoped resource registry and tool dispatcher.
//!
//! The gateway is the single entry point for external agents: it filters
//! the advertised tools and resources by the caller's capability tier,
//! routes addresses through the resolver, enforces directory policy, and
//! only then touches the vault or an extension provider.
//!
//! Capability boundaries are indistinguishable from non-existence: a tool a
//! token cannot see fails exactly like a tool that was never registered.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Tool and resource descriptors.
pub mod descriptor;
/// The dispatcher facade.
pub mod dispatcher;
/// Gateway error types.
pub mod error;
/// Extension provider contract.
pub mod extension;
/// Directory listing.
pub mod listing;
/// Ordered descriptor registry.
pub mod registry;
/// Resource type implementations.
pub mod resources;
/// Built-in tool handlers.
pub mod tools;
/// Protocol result types.
pub mod types;

pub use descriptor::{GatewayContext, ResourceDescriptor, ResourceOps, ToolDescriptor, ToolHandler};
pub use dispatcher::{Gateway, GatewayBuilder};
pub use error::{GatewayError, GatewayResult};
pub use extension::ExtensionProvider;
pub use types::{ToolContent, ToolInfo, ToolResult};
