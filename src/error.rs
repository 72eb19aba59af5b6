//! Error type shared by the cache, the remote fetcher and the HTTP layer

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::model::ResourceKind;

#[derive(Debug, Error)]
pub enum AppError {
    /// The remote source answered with a non-success status
    #[error("remote source returned {status} for {url}")]
    RemoteFetch { url: String, status: u16 },

    /// The remote source could not be reached or its body could not be read
    #[error("remote request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem failure other than "not found" in the cache namespace
    #[error("cache I/O error at {}: {}", .path.display(), .source)]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A payload did not parse as the expected collection
    #[error("could not decode {kind}: {source}")]
    Decode {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AppError {
    pub fn cache_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::CacheIo {
            path: path.into(),
            source,
        }
    }

    pub fn decode(kind: ResourceKind, source: serde_json::Error) -> Self {
        AppError::Decode {
            kind: kind.to_string(),
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal Server Error" })),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
