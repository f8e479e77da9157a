//! In-memory vault backend.
//!
//! The default backend for tests and embedding. A `BTreeMap` keeps
//! `list_all_paths` sorted for free, and the `RwLock` provides the write
//! serialization the [`Vault`] contract requires.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{VaultError, VaultResult};
use crate::Vault;

/// In-memory document store. Directories are implicit in document paths.
#[derive(Debug, Default)]
pub struct MemoryVault {
    docs: RwLock<BTreeMap<String, String>>,
}

impl MemoryVault {
    /// Create an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a vault pre-seeded with `(path, content)` pairs.
    pub fn seeded<P, C>(docs: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<String>,
        C: Into<String>,
    {
        let map = docs
            .into_iter()
            .map(|(p, c)| (p.into(), c.into()))
            .collect();
        Self {
            docs: RwLock::new(map),
        }
    }
}

#[async_trait]
impl Vault for MemoryVault {
    async fn exists(&self, path: &str) -> VaultResult<bool> {
        Ok(self.docs.read().await.contains_key(path))
    }

    async fn read(&self, path: &str) -> VaultResult<String> {
        self.docs
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| VaultError::NotFound {
                path: path.to_string(),
            })
    }

    async fn write(&self, path: &str, content: &str) -> VaultResult<()> {
        self.docs
            .write()
            .await
            .insert(path.to_string(), content.to_string());
        Ok(())
    }

    async fn create(&self, path: &str, content: &str) -> VaultResult<()> {
        let mut docs = self.docs.write().await;
        if docs.contains_key(path) {
            return Err(VaultError::AlreadyExists {
                path: path.to_string(),
            });
        }
        docs.insert(path.to_string(), content.to_string());
        Ok(())
    }

    async fn remove(&self, path: &str) -> VaultResult<()> {
        self.docs
            .write()
            .await
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| VaultError::NotFound {
                path: path.to_string(),
            })
    }

    async fn list_all_paths(&self) -> VaultResult<Vec<String>> {
        Ok(self.docs.read().await.keys().cloned().collect())
    }

    async fn create_dir(&self, _path: &str) -> VaultResult<()> {
        // Directories exist exactly when a document path implies them, so
        // there is nothing to record.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_read() {
        let vault = MemoryVault::new();
        vault.create("a/b.md", "hello").await.unwrap();
        assert!(vault.exists("a/b.md").await.unwrap());
        assert_eq!(vault.read("a/b.md").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_create_existing_fails() {
        let vault = MemoryVault::seeded([("a.md", "x")]);
        let err = vault.create("a.md", "y").await.unwrap_err();
        assert!(matches!(err, VaultError::AlreadyExists { .. }));
        // Original content untouched.
        assert_eq!(vault.read("a.md").await.unwrap(), "x");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let vault = MemoryVault::seeded([("a.md", "x")]);
        vault.write("a.md", "y").await.unwrap();
        assert_eq!(vault.read("a.md").await.unwrap(), "y");
    }

    #[tokio::test]
    async fn test_read_missing() {
        let vault = MemoryVault::new();
        let err = vault.read("missing.md").await.unwrap_err();
        assert!(matches!(err, VaultError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_sorted() {
        let vault = MemoryVault::seeded([("b.md", ""), ("a.md", ""), ("c/d.md", "")]);
        let paths = vault.list_all_paths().await.unwrap();
        assert_eq!(paths, vec!["a.md", "b.md", "c/d.md"]);
    }

    #[tokio::test]
    async fn test_create_dir_is_implicit() {
        let vault = MemoryVault::new();
        vault.create_dir("daily").await.unwrap();
        assert!(vault.list_all_paths().await.unwrap().is_empty());
        vault.create("daily/a.md", "").await.unwrap();
        assert_eq!(vault.list_all_paths().await.unwrap(), vec!["daily/a.md"]);
    }

    #[tokio::test]
    async fn test_remove() {
        let vault = MemoryVault::seeded([("a.md", "x")]);
        vault.remove("a.md").await.unwrap();
        assert!(!vault.exists("a.md").await.unwrap());
        assert!(matches!(
            vault.remove("a.md").await.unwrap_err(),
            VaultError::NotFound { .. }
        ));
    }
}
