//! HTTP request handlers for the photo API
//!
//! This module implements:
//! - Listing photos with filtering and pagination
//! - Looking up a single photo by id
//! - Liveness and health endpoints

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::AppError;
use crate::model::{ListParams, PhotoFilter};
use crate::state::AppState;

/// Lists photos, optionally filtered, one page at a time
///
/// # Query Parameters
///
/// - `title` - Substring of the photo title
/// - `album.title` - Substring of the album title
/// - `album.user.email` - Email of the album owner
/// - `limit` (optional) - Items per page (default: 25, also used for 0 or junk)
/// - `offset` (optional) - Items to skip (default: 0, also used for junk)
///
/// Filter values are lowercased before matching.
///
/// # Example Request
///
/// `GET /external-api/photos?album.title=quidem&limit=10&offset=0`
///
/// # Response
///
/// - **200 OK** - JSON array of photos, with `x-pagination-limit`,
///   `x-pagination-offset`, `x-pagination-total` and `x-pagination-pages` headers
/// - **204 No Content** - The requested page is empty (body `[]`)
/// - **500 Internal Server Error** - The remote source or the cache failed
pub async fn list_photos(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let limit = params.limit();
    let offset = params.offset();

    let criteria = PhotoFilter::normalized(
        params.title.as_deref().unwrap_or_default(),
        params.album_title.as_deref().unwrap_or_default(),
        params.user_email.as_deref().unwrap_or_default(),
    );

    let page = state
        .service
        .filtering_photos(&criteria, limit, offset)
        .await?;

    if page.result.is_empty() {
        return Ok(no_content());
    }

    let pagination = page.pagination;
    let mut headers = HeaderMap::new();
    headers.insert("x-pagination-limit", HeaderValue::from(pagination.limit));
    headers.insert("x-pagination-offset", HeaderValue::from(pagination.offset));
    headers.insert("x-pagination-total", HeaderValue::from(pagination.total));
    headers.insert("x-pagination-pages", HeaderValue::from(pagination.pages));

    Ok((StatusCode::OK, headers, Json(page.result)).into_response())
}

/// Returns a single photo by id
///
/// # Response
///
/// - **200 OK** - The joined photo
/// - **204 No Content** - No photo has this id (body `[]`)
pub async fn get_photo(
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
) -> Result<Response, AppError> {
    // A non-numeric id cannot match any photo
    let Ok(id) = photo_id.parse::<i64>() else {
        return Ok(no_content());
    };

    match state.service.photo_with_id(id).await? {
        Some(photo) => Ok((StatusCode::OK, Json(photo)).into_response()),
        None => Ok(no_content()),
    }
}

pub async fn ping() -> &'static str {
    "PONG!"
}

/// Reports seconds elapsed since the service started
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "uptime": state.started_at.elapsed().as_secs_f64() }))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Resource not Found" })),
    )
}

fn no_content() -> Response {
    (StatusCode::NO_CONTENT, Json(json!([]))).into_response()
}
