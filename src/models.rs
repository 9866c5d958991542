//! Request, response, and persisted-document models for the API.
//!
//! All models use serde for serialization/deserialization.
//! `DriveLink` and `LinkCatalog` define the on-disk JSON committed to the
//! GitHub repository, so their field names are part of the stored format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Catalog Models (persisted format)
// ============================================================================

/// A single curated Google Drive link.
///
/// Serialized with camelCase keys (`createdAt`) to stay compatible with the
/// document format already committed to the data repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveLink {
    /// `link-{unix_millis}-{random suffix}`, assigned at creation.
    pub id: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// The whole persisted document: an ordered list of links.
///
/// Insertion order is display order. An empty catalog is valid and
/// serializes to `{"links": []}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkCatalog {
    #[serde(default)]
    pub links: Vec<DriveLink>,
}

// ============================================================================
// Auth Models
// ============================================================================

/// Request body for admin login.
///
/// Fields are optional so that missing keys produce a 400 with a clear
/// message instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response for the session check endpoint.
#[derive(Debug, Serialize)]
pub struct AuthCheckResponse {
    pub authenticated: bool,
}

// ============================================================================
// Link API Models
// ============================================================================

/// Request body for creating a link.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Response after creating a link.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub success: bool,
    pub link: DriveLink,
}

/// Query parameters for deleting a link.
#[derive(Debug, Deserialize)]
pub struct DeleteLinkParams {
    pub id: Option<String>,
}

/// Generic success acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            success: true,
            message: message.to_string(),
        }
    }
}
