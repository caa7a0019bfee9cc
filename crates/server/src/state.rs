use crate::config::ServerConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use store::{BackendConfig, DocumentStore};
use storefront::{
    AuthService, FilesService, JwtKeys, ProductService, ReviewService, ServiceResult,
    TopPageService,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Document store shared by every service
    pub store: Arc<DocumentStore>,

    pub top_pages: TopPageService,
    pub products: ProductService,
    pub reviews: ReviewService,
    pub auth: AuthService,
    pub files: FilesService,

    /// Prometheus render handle, present once a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Open the configured store and wire the services over it.
    pub fn new(config: ServerConfig) -> ServiceResult<Self> {
        let backend = match &config.store_path {
            Some(path) => BackendConfig::redb(path.to_string_lossy().into_owned()),
            None => BackendConfig::in_memory(),
        };
        let store = Arc::new(DocumentStore::open(&backend)?);
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: ServerConfig, store: Arc<DocumentStore>) -> Self {
        let keys = JwtKeys::new(config.jwt_secret().as_bytes(), config.jwt_ttl_secs);
        Self {
            top_pages: TopPageService::new(store.clone()),
            products: ProductService::new(store.clone()),
            reviews: ReviewService::new(store.clone()),
            auth: AuthService::new(store.clone(), keys, config.bcrypt_cost),
            files: FilesService::new(config.upload_dir.clone()),
            store,
            config: Arc::new(config),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
