//! Route definitions for the photo API
//!
//! This module configures all HTTP routes and maps them to their respective handlers.
//! It creates the Axum router with the application state.

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handler::{get_photo, health_check, list_photos, not_found, ping};
use crate::middleware::api_key_middleware;
use crate::state::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /ping` - Liveness check
/// - `GET /health-check` - Process uptime
/// - `GET /external-api/photos` - Filtered, paginated photo listing (API key)
/// - `GET /external-api/photos/{photo_id}` - Single photo lookup (API key)
///
/// Every route is also served under `/v1`. Anything else answers 404.
pub fn create_app(state: AppState) -> Router {
    // Photo routes require the API key; route_layer keeps unknown paths at 404
    let photo_routes = Router::new()
        .route("/external-api/photos", get(list_photos))
        .route("/external-api/photos/{photo_id}", get(get_photo))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ));

    let api_routes = Router::new()
        .route("/ping", get(ping))
        .route("/health-check", get(health_check))
        .merge(photo_routes);

    Router::new()
        .merge(api_routes.clone())
        .nest("/v1", api_routes)
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
