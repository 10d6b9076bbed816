//! Profile image handling on top of the configured [`AssetStore`].

use schoolhub_core::{AppError, AssetStore, StorageError, StoredAsset};

use crate::forms::UploadedFile;

fn storage_error(err: StorageError) -> AppError {
    if err.is_client_error() {
        AppError::validation(err.to_string())
    } else {
        AppError::upstream(format!("Failed to store image: {}", err))
    }
}

pub async fn store_image(
    assets: &dyn AssetStore,
    folder: &str,
    file: &UploadedFile,
) -> Result<StoredAsset, AppError> {
    assets
        .upload(folder, &file.file_name, &file.bytes)
        .await
        .map_err(storage_error)
}

/// Removes an image that is no longer referenced. Failures are logged only.
pub async fn discard_image(assets: &dyn AssetStore, public_id: Option<&str>) {
    let Some(public_id) = public_id.filter(|id| !id.is_empty()) else {
        return;
    };

    if let Err(e) = assets.destroy(public_id).await {
        tracing::warn!(public_id, error = %e, "Failed to remove stale image");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::StatusCode;
    use schoolhub_core::LocalAssetStore;
    use uuid::Uuid;

    fn store(max: usize) -> LocalAssetStore {
        LocalAssetStore::new(
            std::env::temp_dir().join(format!("schoolhub-images-{}", Uuid::new_v4())),
            "http://localhost/files".to_string(),
            max,
        )
    }

    fn png(bytes: &'static [u8]) -> UploadedFile {
        UploadedFile {
            file_name: "face.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: Bytes::from_static(bytes),
        }
    }

    #[tokio::test]
    async fn test_oversized_image_is_validation_error() {
        let err = store_image(&store(2), "students", &png(b"too big"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_then_discard() {
        let assets = store(1024);
        let stored = store_image(&assets, "teachers", &png(b"png")).await.unwrap();
        assert!(assets.base_dir().join(&stored.public_id).exists());

        discard_image(&assets, Some(&stored.public_id)).await;
        assert!(!assets.base_dir().join(&stored.public_id).exists());

        // Missing and invalid ids are ignored.
        discard_image(&assets, None).await;
        discard_image(&assets, Some("../escape")).await;
    }
}
