//! Where uploaded bytes live.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// A flat key/value store for uploaded files.
///
/// Keys are relative, `/`-separated paths such as `profiles/<uuid>.png`.
/// Implementations must refuse keys that would escape their root.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Store `data` under `key`, replacing anything already there.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Fetch the bytes under `key`. A missing key is `NotFound`.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Drop `key`. A missing key is `NotFound`.
    async fn remove(&self, key: &str) -> AppResult<()>;

    async fn contains(&self, key: &str) -> AppResult<bool>;
}
