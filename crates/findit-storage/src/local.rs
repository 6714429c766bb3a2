//! Uploads kept on the local disk under a single root directory.

use std::io::ErrorKind as IoKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use findit_core::error::{AppError, ErrorKind};
use findit_core::result::AppResult;
use findit_core::traits::storage::BlobStore;

#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Open (and create if needed) the store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| disk_error(format!("Cannot create upload root {}", root.display()), e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key onto a file below the root. Only plain segments pass.
    fn locate(&self, key: &str) -> AppResult<PathBuf> {
        let relative = Path::new(key.trim_start_matches('/'));
        let mut segments = relative.components().peekable();
        let plain = segments.peek().is_some()
            && segments.all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(AppError::validation(format!("Invalid storage path: {key}")));
        }
        Ok(self.root.join(relative))
    }
}

fn disk_error(message: String, e: std::io::Error) -> AppError {
    AppError::with_source(ErrorKind::Storage, message, e)
}

/// `NotFound` for a missing file, a storage failure otherwise.
fn classify(key: &str, action: &str, e: std::io::Error) -> AppError {
    if e.kind() == IoKind::NotFound {
        AppError::not_found(format!("File not found: {key}"))
    } else {
        disk_error(format!("Cannot {action} {key}"), e)
    }
}

#[async_trait]
impl BlobStore for DiskStore {
    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        let target = self.locate(key)?;
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| disk_error(format!("Cannot create {}", dir.display()), e))?;
        }
        fs::write(&target, &data)
            .await
            .map_err(|e| classify(key, "write", e))?;
        debug!(key, size = data.len(), "Stored upload");
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        let target = self.locate(key)?;
        let data = fs::read(&target)
            .await
            .map_err(|e| classify(key, "read", e))?;
        Ok(data.into())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let target = self.locate(key)?;
        fs::remove_file(&target)
            .await
            .map_err(|e| classify(key, "delete", e))?;
        debug!(key, "Removed upload");
        Ok(())
    }

    async fn contains(&self, key: &str) -> AppResult<bool> {
        let target = self.locate(key)?;
        Ok(fs::try_exists(&target).await.unwrap_or(false))
    }
}
