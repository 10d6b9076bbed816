//! Image asset storage.
//!
//! School, teacher and student images live outside the database. The store
//! hands back a public URL together with a `public_id`, which is the handle
//! later passed to [`AssetStore::destroy`] when the image is replaced or its
//! owner deleted.
//!
//! ```ignore
//! let stored = store.upload("students", "face.png", bytes).await?;
//! store.destroy(&stored.public_id).await?;
//! ```

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use serde::Serialize;
use tokio::fs;
use uuid::Uuid;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Where an uploaded image ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAsset {
    pub url: String,
    pub public_id: String,
}

pub trait AssetStore: Send + Sync {
    /// Stores `content` under `folder` and returns its URL and handle.
    ///
    /// `file_name` is the client-supplied name; only its extension is kept.
    fn upload<'a>(
        &'a self,
        folder: &'a str,
        file_name: &'a str,
        content: &'a [u8],
    ) -> StoreFuture<'a, StoredAsset>;

    /// Removes an asset. Destroying an asset that no longer exists succeeds.
    fn destroy<'a>(&'a self, public_id: &'a str) -> StoreFuture<'a, ()>;
}

#[derive(Debug)]
pub enum StorageError {
    InvalidFileSize { max_bytes: usize },
    EmptyFile,
    IoError(std::io::Error),
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::EmptyFile => write!(f, "Uploaded file is empty"),
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::InvalidKey(msg) => write!(f, "Invalid asset id: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl StorageError {
    /// Whether the failure is the client's fault rather than the host's.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidFileSize { .. } | Self::EmptyFile)
    }
}

/// Filesystem-backed store whose files are served back under `base_url`.
#[derive(Clone)]
pub struct LocalAssetStore {
    base_dir: PathBuf,
    base_url: String,
    max_file_size: usize,
}

impl LocalAssetStore {
    pub fn new(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url,
            max_file_size,
        }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') || key.starts_with('\\') {
            return Err(StorageError::InvalidKey(
                "must not be empty, contain '..', or start with a separator".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/' || c == '.')
        {
            return Err(StorageError::InvalidKey("contains invalid characters".to_string()));
        }

        Ok(())
    }

    fn extension_of(file_name: &str) -> Option<String> {
        let (_, ext) = file_name.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        (!ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .then_some(ext)
    }

    fn public_id_for(folder: &str, file_name: &str) -> String {
        let id = Uuid::new_v4();
        match Self::extension_of(file_name) {
            Some(ext) => format!("{}/{}.{}", folder, id, ext),
            None => format!("{}/{}", folder, id),
        }
    }

    fn url_for(&self, public_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), public_id)
    }
}

impl AssetStore for LocalAssetStore {
    fn upload<'a>(
        &'a self,
        folder: &'a str,
        file_name: &'a str,
        content: &'a [u8],
    ) -> StoreFuture<'a, StoredAsset> {
        Box::pin(async move {
            if content.is_empty() {
                return Err(StorageError::EmptyFile);
            }
            if content.len() > self.max_file_size {
                return Err(StorageError::InvalidFileSize {
                    max_bytes: self.max_file_size,
                });
            }

            let public_id = Self::public_id_for(folder, file_name);
            Self::validate_key(&public_id)?;

            let file_path = self.base_dir.join(&public_id);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&file_path, content).await?;

            Ok(StoredAsset {
                url: self.url_for(&public_id),
                public_id,
            })
        })
    }

    fn destroy<'a>(&'a self, public_id: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            Self::validate_key(public_id)?;

            match fs::remove_file(self.base_dir.join(public_id)).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(max: usize) -> LocalAssetStore {
        let dir = std::env::temp_dir().join(format!("schoolhub-assets-{}", Uuid::new_v4()));
        LocalAssetStore::new(dir, "http://localhost:3000/files/".to_string(), max)
    }

    #[test]
    fn test_validate_key_rejects_path_traversal() {
        assert!(LocalAssetStore::validate_key("../../../etc/passwd").is_err());
        assert!(LocalAssetStore::validate_key("/etc/passwd").is_err());
        assert!(LocalAssetStore::validate_key("students/a b.png").is_err());
        assert!(LocalAssetStore::validate_key("students/abc-123.png").is_ok());
    }

    #[test]
    fn test_extension_is_normalized() {
        assert_eq!(LocalAssetStore::extension_of("Face.PNG").as_deref(), Some("png"));
        assert_eq!(LocalAssetStore::extension_of("noext"), None);
        assert_eq!(LocalAssetStore::extension_of("weird.p/ng"), None);
    }

    #[tokio::test]
    async fn test_upload_then_destroy() {
        let store = temp_store(1024);
        let stored = store.upload("teachers", "me.jpg", b"jpeg-bytes").await.unwrap();

        assert!(stored.public_id.starts_with("teachers/"));
        assert!(stored.public_id.ends_with(".jpg"));
        assert_eq!(
            stored.url,
            format!("http://localhost:3000/files/{}", stored.public_id)
        );
        assert!(store.base_dir().join(&stored.public_id).exists());

        store.destroy(&stored.public_id).await.unwrap();
        assert!(!store.base_dir().join(&stored.public_id).exists());

        // Second destroy is a no-op.
        store.destroy(&stored.public_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_and_empty() {
        let store = temp_store(4);
        let err = store.upload("schools", "x.png", b"12345").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidFileSize { max_bytes: 4 }));
        assert!(err.is_client_error());

        let err = store.upload("schools", "x.png", b"").await.unwrap_err();
        assert!(matches!(err, StorageError::EmptyFile));
    }
}
