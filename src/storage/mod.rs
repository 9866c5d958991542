//! Remote document storage for the link catalog.
//!
//! The catalog is a single JSON file committed to a GitHub repository and
//! accessed through the Contents API ([`github::GitHubStore`]). The
//! [`DocumentStore`] trait abstracts the backend so unit tests and local
//! development can run against [`memory::InMemoryStore`] instead.

pub mod github;
pub mod memory;

use crate::models::LinkCatalog;
use async_trait::async_trait;

/// A fetched document plus the revision needed to write it back.
#[derive(Debug, Clone)]
pub struct RemoteDocument {
    pub catalog: LinkCatalog,
    /// Backend revision of the fetched content (the GitHub blob SHA).
    /// `None` means the file does not exist yet.
    pub revision: Option<String>,
}

/// Failures from a document store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("GitHub repository access is not configured")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Revision conflict: {0}")]
    Conflict(String),
}

/// Backend holding the persisted link catalog.
///
/// One document per store. Mutations follow fetch, modify, write; the write
/// re-reads the current revision as its precondition, so a concurrent
/// commit shows up as [`StoreError::Conflict`] rather than a silent
/// overwrite.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the document. A missing file yields the empty catalog with no
    /// revision, not an error.
    async fn fetch(&self) -> Result<RemoteDocument, StoreError>;

    /// Current revision of the document, `None` when it does not exist.
    async fn fetch_revision(&self) -> Result<Option<String>, StoreError>;

    /// Persist the catalog, creating the file when absent.
    async fn write(&self, catalog: &LinkCatalog) -> Result<(), StoreError>;
}
