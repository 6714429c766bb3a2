//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded images live and how large they may be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Root directory for stored uploads.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Maximum accepted file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    /// URL prefix under which stored files are served.
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            max_file_size_bytes: default_max_file_size(),
            public_path: default_public_path(),
        }
    }
}

fn default_directory() -> String {
    "uploads".to_string()
}

fn default_max_file_size() -> u64 {
    5 * 1024 * 1024
}

fn default_public_path() -> String {
    "/uploads".to_string()
}
