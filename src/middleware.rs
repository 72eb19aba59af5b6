use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::state::AppState;

/// Middleware to check the `x-api-key` header
///
/// When `API_X_API_KEY` is configured, the request must carry an
/// `x-api-key` header with exactly that value, otherwise it is rejected
/// with 403 Forbidden.
///
/// If no key is configured, the check is skipped.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let expected = state.config.api.x_api_key.as_str();

    if !expected.is_empty() {
        let provided = headers
            .get("x-api-key")
            .and_then(|value| value.to_str().ok());

        if provided != Some(expected) {
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Invalid API key" })),
            )
                .into_response());
        }
    }

    Ok(next.run(request).await)
}
