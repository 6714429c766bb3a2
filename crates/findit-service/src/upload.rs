//! Image upload storage: validation, naming, and best-effort cleanup.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use findit_core::config::upload::UploadConfig;
use findit_core::error::AppError;
use findit_core::traits::storage::BlobStore;

/// Sub-directory for profile photos.
pub const PROFILE_DIR: &str = "profiles";
/// Sub-directory for portfolio images.
pub const PORTFOLIO_DIR: &str = "portfolio";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// A stored file ready to be served.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File contents.
    pub data: Bytes,
    /// MIME type derived from the extension.
    pub content_type: &'static str,
}

/// Stores uploaded images and resolves their public references.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// Backend holding the files.
    storage: Arc<dyn BlobStore>,
    /// Upload configuration.
    config: UploadConfig,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(storage: Arc<dyn BlobStore>, config: UploadConfig) -> Self {
        Self { storage, config }
    }

    /// Maximum accepted size in bytes.
    pub fn max_file_size(&self) -> u64 {
        self.config.max_file_size_bytes
    }

    /// Validate and store an image, returning its public reference
    /// (`{public_path}/{subdir}/{uuid}{ext}`).
    pub async fn save_image(
        &self,
        data: Bytes,
        original_name: &str,
        content_type: Option<&str>,
        subdir: &str,
    ) -> Result<String, AppError> {
        if data.is_empty() {
            return Err(AppError::validation("No file uploaded"));
        }
        if data.len() as u64 > self.config.max_file_size_bytes {
            return Err(AppError::validation(format!(
                "File too large (max {} bytes)",
                self.config.max_file_size_bytes
            )));
        }

        let ext = image_extension(original_name).ok_or_else(|| {
            AppError::validation("Only image files are allowed (jpg, jpeg, png, gif, webp)")
        })?;
        if let Some(ct) = content_type
            && !ct.starts_with("image/")
        {
            return Err(AppError::validation(
                "Only image files are allowed (jpg, jpeg, png, gif, webp)",
            ));
        }

        let file_name = format!("{}.{ext}", Uuid::new_v4());
        let storage_path = format!("{subdir}/{file_name}");
        self.storage.put(&storage_path, data).await?;

        let reference = format!(
            "{}/{storage_path}",
            self.config.public_path.trim_end_matches('/')
        );
        info!(reference = %reference, "Image stored");
        Ok(reference)
    }

    /// Delete a previously stored file by its public reference.
    ///
    /// Failures are logged and swallowed; a missing old file never blocks
    /// the operation that replaced it.
    pub async fn delete_reference(&self, reference: &str) {
        let Some(path) = self.storage_path(reference) else {
            warn!(reference, "Ignoring delete of a reference outside the upload store");
            return;
        };
        if let Err(e) = self.storage.remove(path).await {
            warn!(reference, error = %e, "Failed to delete stored file");
        }
    }

    /// Read a stored file by its path relative to the upload root.
    pub async fn read(&self, path: &str) -> Result<UploadedFile, AppError> {
        let data = self.storage.get(path).await?;
        Ok(UploadedFile {
            data,
            content_type: content_type_for(path),
        })
    }

    /// Strip the public prefix from a reference.
    fn storage_path<'a>(&self, reference: &'a str) -> Option<&'a str> {
        let prefix = self.config.public_path.trim_end_matches('/');
        reference
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| !rest.is_empty())
    }
}

/// Lower-cased image extension of a file name, if it is an accepted type.
fn image_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// MIME type for a stored file, by extension.
pub fn content_type_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
