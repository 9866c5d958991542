//! Axum state and the session-cookie auth gate.

use crate::auth::session::validate_token;
use crate::catalog::CatalogService;
use crate::config::Config;
use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use time::Duration;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "admin_session";

/// Cookie lifetime; the only expiry the session scheme has.
const SESSION_MAX_AGE: Duration = Duration::days(7);

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub config: Arc<Config>,
}

/// Admin session extractor.
///
/// Validates the `admin_session` cookie against the configured secret and
/// rejects with 401, using distinct messages for a missing cookie versus a
/// failing one. List it first in mutating handlers so the auth check runs
/// before body or query parsing.
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::Unauthorized("No session token".to_string()))?;

        // No configured secret means no token can be valid
        let valid = state
            .config
            .admin_password
            .as_deref()
            .is_some_and(|secret| validate_token(&token, secret));

        if !valid {
            tracing::warn!(action = "session_rejected", "Invalid session token presented");
            return Err(AppError::Unauthorized("Invalid session token".to_string()));
        }

        Ok(AdminSession)
    }
}

/// Session cookie carrying a freshly issued token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(SESSION_MAX_AGE)
        .path("/")
        .build()
}

/// Expired empty cookie that clears the session on the client.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .path("/")
        .build()
}
