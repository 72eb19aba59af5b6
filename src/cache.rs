//! File-backed key/value cache with a single shared expiry marker
//!
//! Every key maps to `<dir>/<key>.json`. Expiry is not tracked per key:
//! the caching provider keeps one [`CacheTimeMarker`] under
//! [`CACHE_TIME_KEY`] and purges the whole namespace when it expires.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, error, info};

use crate::error::{AppError, Result};

/// Reserved key of the expiry marker, distinct from every resource kind
pub const CACHE_TIME_KEY: &str = "cacheTime";

/// Absolute expiry of the current cache window, in epoch seconds
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTimeMarker {
    pub ttl: i64,
}

/// Key/value store over a single cache directory
#[derive(Debug, Clone)]
pub struct TtlCacheStore {
    dir: PathBuf,
}

impl TtlCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Creates the cache directory if it does not exist yet
    ///
    /// A concurrent creation ("already exists") is not an error.
    pub async fn ensure_dir(&self) -> Result<()> {
        match fs::create_dir_all(&self.dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => {
                error!(dir = %self.dir.display(), error = %e, "Failed to create cache directory");
                Err(AppError::cache_io(&self.dir, e))
            }
        }
    }

    /// Returns the payload stored under `key`
    ///
    /// Any failure, including a missing or empty file, reads as a miss.
    pub async fn read(&self, key: &str) -> Option<String> {
        let path = self.file_path(key);
        match fs::read_to_string(&path).await {
            Ok(payload) if !payload.is_empty() => Some(payload),
            Ok(_) => None,
            Err(e) => {
                debug!(key, error = %e, "Cache read miss");
                None
            }
        }
    }

    /// Persists `payload` under `key`, creating the directory if needed
    pub async fn write(&self, key: &str, payload: &str) -> Result<()> {
        self.ensure_dir().await?;
        let path = self.file_path(key);
        if let Err(e) = fs::write(&path, payload).await {
            error!(key, path = %path.display(), error = %e, "Failed to write cache file");
            return Err(AppError::cache_io(path, e));
        }
        debug!(key, bytes = payload.len(), "Cache file written");
        Ok(())
    }

    /// Reports whether `key` has a non-empty backing file without reading it
    ///
    /// A zero-length file (left behind by an interrupted write) counts as
    /// absent, matching what [`read`](Self::read) reports for it.
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.file_path(key);
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.len() > 0),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => {
                error!(key, error = %e, "Failed to stat cache file");
                Err(AppError::cache_io(path, e))
            }
        }
    }

    /// Writes `payload` only when `key` is absent; returns whether it wrote
    pub async fn write_if_absent(&self, key: &str, payload: &str) -> Result<bool> {
        if self.exists(key).await? {
            return Ok(false);
        }
        self.write(key, payload).await?;
        Ok(true)
    }

    /// Deletes the whole namespace and recreates it empty
    pub async fn purge_all(&self) -> Result<()> {
        match fs::remove_dir_all(&self.dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                error!(dir = %self.dir.display(), error = %e, "Failed to delete cache directory");
                return Err(AppError::cache_io(&self.dir, e));
            }
        }
        self.ensure_dir().await?;
        info!(dir = %self.dir.display(), "Local cache directory deleted");
        Ok(())
    }
}
