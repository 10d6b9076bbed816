use std::sync::Arc;

use schoolhub_config::{CorsConfig, JwtConfig, StorageConfig};
use schoolhub_core::{AssetStore, LocalAssetStore};
use schoolhub_observability::PrometheusHandle;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub storage_config: StorageConfig,
    pub assets: Arc<dyn AssetStore>,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Builds state around an already-connected pool, with images kept on
    /// the local filesystem.
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        storage_config: StorageConfig,
    ) -> Self {
        let assets = LocalAssetStore::new(
            storage_config.asset_dir.clone(),
            storage_config.base_url.clone(),
            storage_config.max_bytes,
        );

        Self {
            db,
            jwt_config,
            cors_config,
            storage_config,
            assets: Arc::new(assets),
            metrics_handle: None,
        }
    }

    pub fn from_env(db: PgPool) -> Self {
        Self::new(
            db,
            JwtConfig::from_env(),
            CorsConfig::from_env(),
            StorageConfig::from_env(),
        )
    }

    pub fn with_assets(mut self, assets: Arc<dyn AssetStore>) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics_handle = handle;
        self
    }
}
