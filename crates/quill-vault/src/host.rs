//! Host-filesystem vault backend.
//!
//! Roots every canonical path beneath a base directory. Resolution is
//! purely lexical: `..` and absolute inputs are rejected before any
//! filesystem call, so a hostile path can never escape the root.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{VaultError, VaultResult};
use crate::Vault;

/// Vault backed by a directory on the host filesystem.
#[derive(Debug, Clone)]
pub struct HostVault {
    root: PathBuf,
}

impl HostVault {
    /// Create a vault rooted at `root`. The directory must already exist.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Lexically resolve a canonical path beneath the root.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::OutsideRoot`] for absolute paths or any `..`
    /// component.
    fn resolve(&self, path: &str) -> VaultResult<PathBuf> {
        let req = Path::new(path);
        if req.is_absolute() {
            return Err(VaultError::OutsideRoot {
                path: path.to_string(),
            });
        }
        let mut resolved = self.root.clone();
        for component in req.components() {
            match component {
                Component::Normal(p) => resolved.push(p),
                Component::CurDir => {}
                _ => {
                    return Err(VaultError::OutsideRoot {
                        path: path.to_string(),
                    });
                }
            }
        }
        Ok(resolved)
    }
}

#[async_trait]
impl Vault for HostVault {
    async fn exists(&self, path: &str) -> VaultResult<bool> {
        let full = self.resolve(path)?;
        Ok(tokio::fs::try_exists(&full).await?)
    }

    async fn read(&self, path: &str) -> VaultResult<String> {
        let full = self.resolve(path)?;
        match tokio::fs::read_to_string(&full).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(VaultError::NotFound {
                path: path.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, path: &str, content: &str) -> VaultResult<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, content).await?;
        debug!(path, bytes = content.len(), "wrote document");
        Ok(())
    }

    async fn create(&self, path: &str, content: &str) -> VaultResult<()> {
        if self.exists(path).await? {
            return Err(VaultError::AlreadyExists {
                path: path.to_string(),
            });
        }
        self.write(path, content).await
    }

    async fn remove(&self, path: &str) -> VaultResult<()> {
        let full = self.resolve(path)?;
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(VaultError::NotFound {
                path: path.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_all_paths(&self) -> VaultResult<Vec<String>> {
        let mut paths = Vec::new();
        let mut pending = vec![self.root.clone()];
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let full = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(full);
                } else if let Ok(rel) = full.strip_prefix(&self.root) {
                    // Canonical paths always use forward slashes.
                    let rel = rel
                        .components()
                        .filter_map(|c| c.as_os_str().to_str())
                        .collect::<Vec<_>>()
                        .join("/");
                    paths.push(rel);
                }
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn create_dir(&self, path: &str) -> VaultResult<()> {
        let full = self.resolve(path)?;
        tokio::fs::create_dir_all(&full).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_vault() -> (tempfile::TempDir, HostVault) {
        let dir = tempfile::tempdir().unwrap();
        let vault = HostVault::new(dir.path());
        (dir, vault)
    }

    #[tokio::test]
    async fn test_write_read_roundtrip() {
        let (_dir, vault) = temp_vault();
        vault.write("notes/a.md", "content").await.unwrap();
        assert_eq!(vault.read("notes/a.md").await.unwrap(), "content");
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let (_dir, vault) = temp_vault();
        let err = vault.read("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, VaultError::OutsideRoot { .. }));
        let err = vault.read("/etc/passwd").await.unwrap_err();
        assert!(matches!(err, VaultError::OutsideRoot { .. }));
    }

    #[tokio::test]
    async fn test_list_all_paths_recursive_sorted() {
        let (_dir, vault) = temp_vault();
        vault.write("b.md", "").await.unwrap();
        vault.write("a/x.md", "").await.unwrap();
        vault.write("a/y.md", "").await.unwrap();
        let paths = vault.list_all_paths().await.unwrap();
        assert_eq!(paths, vec!["a/x.md", "a/y.md", "b.md"]);
    }

    #[tokio::test]
    async fn test_create_fails_on_existing() {
        let (_dir, vault) = temp_vault();
        vault.create("a.md", "one").await.unwrap();
        let err = vault.create("a.md", "two").await.unwrap_err();
        assert!(matches!(err, VaultError::AlreadyExists { .. }));
    }
}
