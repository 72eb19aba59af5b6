//! Fetching raw collections from the remote data source

use std::future::Future;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ExternalSourceConfig;
use crate::error::{AppError, Result};
use crate::model::ResourceKind;

/// Source of truth for the raw collections
///
/// Implementations return the response body untouched so the caching
/// provider can persist exactly what the remote source served.
pub trait RemoteFetcher: Send + Sync {
    fn fetch(&self, kind: ResourceKind) -> impl Future<Output = Result<String>> + Send;
}

/// [`RemoteFetcher`] backed by plain HTTP GET requests
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    source: ExternalSourceConfig,
}

impl HttpFetcher {
    pub fn new(source: ExternalSourceConfig) -> Self {
        Self {
            client: Client::new(),
            source,
        }
    }
}

impl RemoteFetcher for HttpFetcher {
    async fn fetch(&self, kind: ResourceKind) -> Result<String> {
        let url = self.source.url_for(kind);
        debug!(%kind, url = %url, "Fetching data from remote source");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%kind, status = %status, url = %url, "Remote source rejected request");
            return Err(AppError::RemoteFetch {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(%kind, bytes = body.len(), "Fetched collection");
        Ok(body)
    }
}
