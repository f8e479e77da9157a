//! Document vault storage abstraction.
//!
//! The gateway addresses every document by canonical path (normalized,
//! scheme-stripped, slash-trimmed). [`Vault`] is the storage contract those
//! paths resolve against; backends provide their own write serialization,
//! the gateway never locks.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Vault error types.
pub mod error;
/// Host-filesystem backend.
pub mod host;
/// In-memory backend.
pub mod memory;

pub use error::{VaultError, VaultResult};
pub use host::HostVault;
pub use memory::MemoryVault;

use async_trait::async_trait;

/// Storage contract for a hierarchical store of text documents.
///
/// Paths are canonical relative paths (`a/b/c.md`). Backends serialize
/// concurrent writes to the same path; callers see either value, never an
/// interleaving.
#[async_trait]
pub trait Vault: Send + Sync {
    /// Whether a document exists at `path`.
    async fn exists(&self, path: &str) -> VaultResult<bool>;

    /// Read the document at `path`.
    async fn read(&self, path: &str) -> VaultResult<String>;

    /// Write (create or overwrite) the document at `path`.
    async fn write(&self, path: &str, content: &str) -> VaultResult<()>;

    /// Create the document at `path`, failing if it already exists.
    async fn create(&self, path: &str, content: &str) -> VaultResult<()>;

    /// Remove the document at `path`.
    async fn remove(&self, path: &str) -> VaultResult<()>;

    /// All document paths in the vault, lexicographically sorted.
    async fn list_all_paths(&self) -> VaultResult<Vec<String>>;

    /// Ensure the directory at `path` exists.
    async fn create_dir(&self, path: &str) -> VaultResult<()>;
}
