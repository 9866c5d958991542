//! Auth API endpoints.

use crate::auth::middleware::{clear_session_cookie, session_cookie, AppState, SESSION_COOKIE};
use crate::auth::session::{issue_token, validate_token};
use crate::auth::verify_credentials;
use crate::error::AppError;
use crate::models::{AuthCheckResponse, LoginRequest, MessageResponse};
use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;

/// POST /api/auth/login — Verify credentials and set the session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = req.username.as_deref().unwrap_or("");
    let password = req.password.as_deref().unwrap_or("");
    if username.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    if !verify_credentials(&state.config, username, password)? {
        tracing::warn!(action = "login_failed", "Invalid admin credentials presented");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    // The shared password doubles as the token secret
    let secret = state
        .config
        .admin_password
        .as_deref()
        .ok_or_else(|| AppError::Config("Admin credentials are not configured".to_string()))?;
    let token = issue_token(secret);

    tracing::info!(action = "login", "Administrator logged in");

    Ok((
        jar.add(session_cookie(token, state.config.cookie_secure)),
        Json(MessageResponse::new("Login successful")),
    ))
}

/// POST /api/auth/logout — Clear the session cookie
///
/// Not gated; clearing an absent session is harmless and idempotent.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    tracing::info!(action = "logout", "Administrator logged out");
    (
        jar.add(clear_session_cookie()),
        Json(MessageResponse::new("Logout successful")),
    )
}

/// GET /api/auth/check — Report whether the request carries a valid session
///
/// Always 200; a missing or malformed cookie is `authenticated: false`,
/// never an error.
pub async fn check_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Json<AuthCheckResponse> {
    let authenticated = match (jar.get(SESSION_COOKIE), state.config.admin_password.as_deref()) {
        (Some(cookie), Some(secret)) => validate_token(cookie.value(), secret),
        _ => false,
    };
    Json(AuthCheckResponse { authenticated })
}
