//! Cache-aside access to the remote collections
//!
//! One [`CacheTimeMarker`] governs the whole namespace: when it expires every
//! collection is dropped at once, while inside a valid window each collection
//! is filled lazily the first time it is requested.

use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::{CacheTimeMarker, TtlCacheStore, CACHE_TIME_KEY};
use crate::config::LocalCacheConfig;
use crate::error::{AppError, Result};
use crate::model::{Album, Photo, ResourceKind, User};
use crate::remote::RemoteFetcher;

/// A record type served as one remote collection
pub trait Resource: DeserializeOwned {
    const KIND: ResourceKind;
}

impl Resource for User {
    const KIND: ResourceKind = ResourceKind::Users;
}

impl Resource for Album {
    const KIND: ResourceKind = ResourceKind::Albums;
}

impl Resource for Photo {
    const KIND: ResourceKind = ResourceKind::Photos;
}

pub struct CachingProvider<F> {
    fetcher: F,
    store: TtlCacheStore,
    enabled: bool,
    ttl_secs: i64,
}

impl<F: RemoteFetcher> CachingProvider<F> {
    pub fn new(fetcher: F, settings: &LocalCacheConfig) -> Self {
        Self {
            fetcher,
            store: TtlCacheStore::new(&settings.path),
            enabled: settings.enabled,
            ttl_secs: settings.ttl_secs,
        }
    }

    pub fn store(&self) -> &TtlCacheStore {
        &self.store
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the collection of `T`, from the cache when it is fresh
    pub async fn evaluate<T: Resource>(&self) -> Result<Vec<T>> {
        let kind = T::KIND;
        if !self.enabled {
            let body = self.fetcher.fetch(kind).await?;
            return decode(kind, &body);
        }

        if !self.needs_recovery().await? {
            if let Some(payload) = self.store.read(kind.as_str()).await {
                debug!(%kind, "Cache hit");
                return decode(kind, &payload);
            }
            debug!(%kind, "Cache not found");
        }

        self.refresh(kind).await
    }

    /// Checks the expiry marker, renewing it when it is missing or expired
    ///
    /// Returns true when the caller must go to the remote source. An expired
    /// window purges the whole namespace before the marker is rewritten.
    pub async fn needs_recovery(&self) -> Result<bool> {
        let now = Utc::now().timestamp();
        let fresh = CacheTimeMarker {
            ttl: now + self.ttl_secs,
        };

        let Some(raw) = self.store.read(CACHE_TIME_KEY).await else {
            debug!(ttl = fresh.ttl, "Cache time not found, generating a new one");
            self.store
                .write_if_absent(CACHE_TIME_KEY, &encode_marker(&fresh)?)
                .await?;
            return Ok(true);
        };

        let expired = match serde_json::from_str::<CacheTimeMarker>(&raw) {
            Ok(marker) => now > marker.ttl,
            Err(e) => {
                warn!(error = %e, "Unreadable cache time marker, treating as expired");
                true
            }
        };

        if expired {
            warn!(ttl = fresh.ttl, "Cache time expired");
            self.store.purge_all().await?;
            self.store
                .write(CACHE_TIME_KEY, &encode_marker(&fresh)?)
                .await?;
            return Ok(true);
        }

        debug!("Cache time not expired");
        Ok(false)
    }

    async fn refresh<T: Resource>(&self, kind: ResourceKind) -> Result<Vec<T>> {
        let body = self.fetcher.fetch(kind).await?;
        let items = decode(kind, &body)?;
        self.store.write(kind.as_str(), &body).await?;
        Ok(items)
    }
}

fn decode<T: DeserializeOwned>(kind: ResourceKind, payload: &str) -> Result<Vec<T>> {
    serde_json::from_str(payload).map_err(|e| AppError::decode(kind, e))
}

fn encode_marker(marker: &CacheTimeMarker) -> Result<String> {
    serde_json::to_string(marker).map_err(|e| AppError::Decode {
        kind: CACHE_TIME_KEY.to_string(),
        source: e,
    })
}
