//! Drive-link API endpoints.

use crate::auth::middleware::{AdminSession, AppState};
use crate::error::AppError;
use crate::models::{CreateLinkRequest, CreateLinkResponse, DeleteLinkParams, MessageResponse};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

/// Public list responses may be cached by the CDN for five minutes and
/// served stale for up to an hour while revalidating.
const LIST_CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=3600";

/// GET /api/drive-links — Public catalog listing
pub async fn list_links(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog.list().await?;
    Ok(([(header::CACHE_CONTROL, LIST_CACHE_CONTROL)], Json(catalog)))
}

/// POST /api/drive-links — Add a link (admin only)
pub async fn create_link(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(req): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let title = req.title.unwrap_or_default();
    let url = req.url.unwrap_or_default();

    let link = state.catalog.append(&title, &url).await?;

    tracing::info!(action = "link_created", link_id = %link.id, "Drive link added");

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            success: true,
            link,
        }),
    ))
}

/// DELETE /api/drive-links?id={id} — Remove a link (admin only)
pub async fn delete_link(
    _session: AdminSession,
    State(state): State<AppState>,
    Query(params): Query<DeleteLinkParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Link ID is required".to_string()))?;

    state.catalog.remove(&id).await?;

    tracing::info!(action = "link_deleted", link_id = %id, "Drive link removed");

    Ok(Json(MessageResponse::new("Link deleted successfully")))
}
