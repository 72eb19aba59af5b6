//! Integration tests for the photo API
//!
//! These tests verify the entire application stack including:
//! - HTTP routing
//! - Filtering and pagination
//! - The file cache in front of the remote source
//! - Error handling
//!
//! The remote source is a small axum server bound to an ephemeral port.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::{get, MethodRouter},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

use photo_aggregator::config::{
    ApiConfig, Config, ExternalEndpoints, ExternalSourceConfig, LocalCacheConfig,
};
use photo_aggregator::route::create_app;
use photo_aggregator::state::AppState;

const USERS: &str = include_str!("fixtures/users.json");
const ALBUMS: &str = include_str!("fixtures/albums.json");
const PHOTOS: &str = include_str!("fixtures/photos.json");

fn serve_json(hits: Arc<AtomicUsize>, body: &'static str) -> MethodRouter {
    get(move || {
        hits.fetch_add(1, Ordering::SeqCst);
        async move { ([(header::CONTENT_TYPE, "application/json")], body) }
    })
}

/// Starts the fake remote source; returns its base URL and a hit counter
async fn spawn_remote() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let remote = Router::new()
        .route("/users", serve_json(hits.clone(), USERS))
        .route("/albums", serve_json(hits.clone(), ALBUMS))
        .route("/photos", serve_json(hits.clone(), PHOTOS))
        .route("/broken", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, remote).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

fn test_config(remote_url: &str, cache_dir: &Path, cache_enabled: bool) -> Config {
    Config {
        api: ApiConfig {
            port: 0,
            log_level: "debug".to_string(),
            x_api_key: String::new(),
        },
        external_source: ExternalSourceConfig {
            url: remote_url.to_string(),
            endpoints: ExternalEndpoints {
                users: "/users".to_string(),
                albums: "/albums".to_string(),
                photos: "/photos".to_string(),
            },
        },
        local_cache: LocalCacheConfig {
            enabled: cache_enabled,
            ttl_secs: 3600,
            path: cache_dir.join("cache"),
        },
    }
}

/// Helper function to create a test application against a fresh remote
async fn setup_test_app(cache_enabled: bool) -> (axum::Router, Arc<AtomicUsize>, TempDir) {
    let (remote_url, hits) = spawn_remote().await;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(&remote_url, temp_dir.path(), cache_enabled);
    let state = AppState::init(config)
        .await
        .expect("Failed to initialize state");
    (create_app(state), hits, temp_dir)
}

async fn get_request(app: axum::Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Helper function to parse response body as JSON
async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

fn header_value(response: &axum::response::Response, name: &str) -> String {
    response.headers()[name].to_str().unwrap().to_string()
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("body should be an array")
        .iter()
        .map(|photo| photo["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_ping() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/ping").await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"PONG!");
}

#[tokio::test]
async fn test_health_check_reports_uptime() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/health-check").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_list_all_photos() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/external-api/photos").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, "x-pagination-limit"), "25");
    assert_eq!(header_value(&response, "x-pagination-offset"), "0");
    assert_eq!(header_value(&response, "x-pagination-total"), "3");
    assert_eq!(header_value(&response, "x-pagination-pages"), "1");

    let body = response_json(response.into_body()).await;
    assert_eq!(ids(&body), vec![1, 2, 3]);
    assert_eq!(body[2]["album"]["title"], "sunt qui excepturi placeat culpa");
    assert_eq!(body[2]["album"]["user"]["username"], "Antonette");
}

#[tokio::test]
async fn test_pagination_slices_results() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/external-api/photos?limit=2&offset=1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, "x-pagination-total"), "3");
    assert_eq!(header_value(&response, "x-pagination-pages"), "2");
    let body = response_json(response.into_body()).await;
    assert_eq!(ids(&body), vec![2, 3]);
}

#[tokio::test]
async fn test_malformed_paging_falls_back_to_defaults() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/external-api/photos?limit=abc&offset=-1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, "x-pagination-limit"), "25");
    assert_eq!(header_value(&response, "x-pagination-offset"), "0");
    let body = response_json(response.into_body()).await;
    assert_eq!(ids(&body), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_offset_past_end_is_no_content() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/external-api/photos?limit=2&offset=3").await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_filter_by_title() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/external-api/photos?title=Accusamus%20Beatae").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(ids(&body), vec![1]);
    assert_eq!(body[0]["thumbnailUrl"], "https://via.placeholder.com/150/92c952");
    assert_eq!(body[0]["album"]["title"], "quidem molestiae enim");
    assert_eq!(body[0]["album"]["user"]["email"], "Sincere@april.biz");
    assert_eq!(body[0]["album"]["user"]["company"]["catchPhrase"], "Multi-layered client-server neural-net");
}

#[tokio::test]
async fn test_filter_by_album_title() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/external-api/photos?album.title=quidem").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(ids(&body), vec![1, 2]);
}

#[tokio::test]
async fn test_filter_by_album_title_without_match() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/external-api/photos?album.title=nomatch").await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_filter_by_user_email_is_case_insensitive() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/external-api/photos?album.user.email=SINCERE@april.biz").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(ids(&body), vec![1]);
}

#[tokio::test]
async fn test_album_title_takes_precedence_over_user_email() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(
        app,
        "/external-api/photos?album.title=sunt&album.user.email=sincere@april.biz",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(ids(&body), vec![3]);
}

#[tokio::test]
async fn test_get_photo_by_id() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/external-api/photos/2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["album"]["id"], 1);
}

#[tokio::test]
async fn test_get_missing_photo_is_no_content() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app.clone(), "/external-api/photos/999").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_request(app, "/external-api/photos/not-a-number").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_routes_are_served_under_v1() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app.clone(), "/v1/ping").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_request(app, "/v1/external-api/photos/1").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _hits, _temp_dir) = setup_test_app(false).await;

    let response = get_request(app, "/nothing/here").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Resource not Found");
}

#[tokio::test]
async fn test_remote_failure_is_internal_error() {
    let (remote_url, _hits) = spawn_remote().await;
    let temp_dir = TempDir::new().unwrap();
    let mut config = test_config(&remote_url, temp_dir.path(), false);
    config.external_source.endpoints.photos = "/broken".to_string();
    let app = create_app(AppState::init(config).await.unwrap());

    let response = get_request(app, "/external-api/photos").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn test_cache_shields_remote_source() {
    let (app, hits, temp_dir) = setup_test_app(true).await;

    let response = get_request(app.clone(), "/external-api/photos").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 3);

    let response = get_request(app, "/external-api/photos?title=officia").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 3);

    let cache_dir = temp_dir.path().join("cache");
    for file in ["users.json", "albums.json", "photos.json", "cacheTime.json"] {
        assert!(cache_dir.join(file).exists(), "{} should be cached", file);
    }
}

#[tokio::test]
async fn test_without_cache_every_request_hits_remote() {
    let (app, hits, _temp_dir) = setup_test_app(false).await;

    get_request(app.clone(), "/external-api/photos").await;
    get_request(app, "/external-api/photos/1").await;

    assert_eq!(hits.load(Ordering::SeqCst), 6);
}
