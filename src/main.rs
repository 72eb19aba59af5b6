//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Prepares the local cache and the remote client
//! - Starts the HTTP server with graceful shutdown support

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use photo_aggregator::config::Config;
use photo_aggregator::route::create_app;
use photo_aggregator::state::AppState;

/// Application entry point
///
/// # Environment Variables
///
/// - `API_PORT` - Server port number (default: 8080)
/// - `API_LOG_LEVEL` - Log level for the service (default: info)
/// - `API_X_API_KEY` - Required `x-api-key` value, empty to disable
/// - `EXTERNAL_API_URL` and `EXTERNAL_API_{USERS,ALBUMS,PHOTOS}_ENDPOINT` - Remote source
/// - `LOCAL_CACHE_ENABLED`, `LOCAL_CACHE_TTL`, `LOCAL_CACHE_PATH` - File cache
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    let config = Config::from_env();

    let level = &config.api.log_level;
    let filter = EnvFilter::try_new(format!("photo_aggregator={level},tower_http={level}"))
        .unwrap_or_else(|_| EnvFilter::new("photo_aggregator=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let port = config.api.port;
    let state = AppState::init(config)
        .await
        .expect("Failed to initialize local cache");

    let app = create_app(state).layer(TraceLayer::new_for_http());

    // Bind to all network interfaces on the specified port
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    info!(port, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// Resolves when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server");
}
