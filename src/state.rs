//! Application state shared across all request handlers

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::provider::CachingProvider;
use crate::remote::HttpFetcher;
use crate::service::PhotoService;

/// Handlers share the service and configuration through `Arc`s, so cloning
/// the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PhotoService>,
    pub config: Arc<Config>,
    /// Process start, reported by the health check
    pub started_at: Instant,
}

impl AppState {
    /// Wires the HTTP fetcher, the file cache and the photo service
    ///
    /// When caching is enabled the cache namespace is created up front;
    /// failing to create it is fatal.
    pub async fn init(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.external_source.clone());
        let provider = CachingProvider::new(fetcher, &config.local_cache);

        if provider.is_enabled() {
            provider.store().ensure_dir().await?;
            info!(
                dir = %provider.store().dir().display(),
                ttl_secs = config.local_cache.ttl_secs,
                "Local cache enabled"
            );
        }

        if config.api.x_api_key.is_empty() {
            warn!("API_X_API_KEY is not set, photo routes are served without an API key");
        }

        Ok(Self {
            service: Arc::new(PhotoService::new(provider)),
            config: Arc::new(config),
            started_at: Instant::now(),
        })
    }
}
