//! Resource type implementations.
//!
//! Three tagged variants share the [`crate::descriptor::ResourceOps`]
//! capability set: plain vault paths, daily notes, and extension-backed
//! namespaces. Selection happens by scheme at registration time.

/// Daily-note resource type.
pub mod daily;
/// Direct vault-path resource type.
pub mod direct;
/// Extension-backed resource type.
pub mod extension;

pub use daily::DailyResource;
pub use direct::DirectResource;
pub use extension::ExtensionResource;
