//! Driveboard application entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Build the GitHub-backed document store and catalog service
//! 3. Build router with API routes + static file serving
//! 4. Apply security headers middleware
//! 5. Start Axum server

use driveboard::{
    auth::middleware::AppState, catalog::CatalogService, config::Config,
    middleware::security_headers, routes, storage::github::GitHubStore,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config from environment
    let config = Config::from_env().expect("Failed to load config");
    tracing::info!("Starting driveboard on {}", config.bind_addr);

    // Missing credentials or repository access are not fatal: the affected
    // operations fail closed per request. Flag them at startup anyway.
    if !config.admin_configured() {
        tracing::warn!("Admin credentials not set; login is disabled");
    }
    if !config.github_configured() {
        tracing::warn!("GitHub repository access not configured; link endpoints will fail");
    }

    let store = GitHubStore::from_config(&config).expect("Failed to build GitHub client");

    // Build shared state
    let state = AppState {
        catalog: CatalogService::new(Arc::new(store)),
        config: Arc::new(config.clone()),
    };

    // Build router:
    // - API routes (with state)
    // - Static file serving (fallback)
    // - Security headers middleware
    // Explicit CORS: deny all cross-origin requests (single-origin deployment).
    // CorsLayer::new() with no allowed origins rejects all CORS preflight requests.
    let cors = CorsLayer::new();

    let app = routes::api_router()
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .layer(axum::middleware::from_fn(security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Bind to configured address
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
