//! Service configuration loaded from environment variables

use std::env;
use std::path::PathBuf;

use crate::model::ResourceKind;

/// HTTP API settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub log_level: String,
    /// Expected `x-api-key` header value; empty disables the check
    pub x_api_key: String,
}

/// Paths of the three collections, relative to the remote base URL
#[derive(Debug, Clone)]
pub struct ExternalEndpoints {
    pub users: String,
    pub albums: String,
    pub photos: String,
}

impl ExternalEndpoints {
    pub fn path(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::Users => &self.users,
            ResourceKind::Albums => &self.albums,
            ResourceKind::Photos => &self.photos,
        }
    }
}

/// Remote data source settings
#[derive(Debug, Clone)]
pub struct ExternalSourceConfig {
    pub url: String,
    pub endpoints: ExternalEndpoints,
}

impl ExternalSourceConfig {
    /// Full URL of the collection for `kind`
    pub fn url_for(&self, kind: ResourceKind) -> String {
        format!("{}{}", self.url, self.endpoints.path(kind))
    }
}

/// File cache settings
#[derive(Debug, Clone)]
pub struct LocalCacheConfig {
    pub enabled: bool,
    pub ttl_secs: i64,
    /// Cache namespace directory
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub external_source: ExternalSourceConfig,
    pub local_cache: LocalCacheConfig,
}

impl Config {
    /// Parse configuration from environment variables
    ///
    /// Missing or unparsable values fall back to defaults. A relative
    /// `LOCAL_CACHE_PATH` is resolved under the OS temp directory.
    pub fn from_env() -> Self {
        let port = env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let log_level = env::var("API_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let x_api_key = env::var("API_X_API_KEY").unwrap_or_default();

        let url = env::var("EXTERNAL_API_URL")
            .unwrap_or_else(|_| "https://jsonplaceholder.typicode.com".to_string());
        let endpoints = ExternalEndpoints {
            users: env::var("EXTERNAL_API_USERS_ENDPOINT").unwrap_or_else(|_| "/users".to_string()),
            albums: env::var("EXTERNAL_API_ALBUMS_ENDPOINT")
                .unwrap_or_else(|_| "/albums".to_string()),
            photos: env::var("EXTERNAL_API_PHOTOS_ENDPOINT")
                .unwrap_or_else(|_| "/photos".to_string()),
        };

        let enabled = env::var("LOCAL_CACHE_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        let ttl_secs = env::var("LOCAL_CACHE_TTL")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(3600);
        let path = resolve_cache_path(
            &env::var("LOCAL_CACHE_PATH").unwrap_or_else(|_| "photo-aggregator-cache".to_string()),
        );

        Self {
            api: ApiConfig {
                port,
                log_level,
                x_api_key,
            },
            external_source: ExternalSourceConfig { url, endpoints },
            local_cache: LocalCacheConfig {
                enabled,
                ttl_secs,
                path,
            },
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn resolve_cache_path(raw: &str) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        env::temp_dir().join(path)
    }
}
