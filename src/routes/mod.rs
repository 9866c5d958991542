//! API route handlers.

pub mod auth;
pub mod links;

use crate::auth::middleware::AppState;
use axum::{routing::get, routing::post, Router};

/// Build the API router with all endpoints.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Link endpoints (GET is public, mutations are cookie-gated)
        .route(
            "/api/drive-links",
            get(links::list_links)
                .post(links::create_link)
                .delete(links::delete_link),
        )
        // Auth endpoints
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/check", get(auth::check_session))
}
