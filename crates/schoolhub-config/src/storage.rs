use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Directory holding uploaded images.
    pub asset_dir: PathBuf,
    /// Public prefix the images are served under.
    pub base_url: String,
    pub max_bytes: usize,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            asset_dir: env::var("ASSET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("storage/uploads")),
            base_url: env::var("ASSET_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/files".to_string()),
            max_bytes: env::var("ASSET_MAX_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5 * 1024 * 1024), // 5MB
        }
    }
}
