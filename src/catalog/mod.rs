//! Link catalog operations over a [`DocumentStore`].
//!
//! Every mutation is a full read-modify-write of the persisted document:
//! fetch the catalog, change the in-memory list, write the whole document
//! back. Validation happens before the fetch so nothing is written for
//! rejected input.

pub mod drive;

use crate::models::{DriveLink, LinkCatalog};
use crate::storage::{DocumentStore, StoreError};
use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};
use std::sync::Arc;

/// Length of the random id suffix.
const ID_SUFFIX_LEN: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("Link not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Catalog operations shared across handlers.
///
/// Holds the store behind `Arc<dyn DocumentStore>` so handlers stay
/// backend-agnostic.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        CatalogService { store }
    }

    /// The full catalog in insertion order.
    pub async fn list(&self) -> Result<LinkCatalog, CatalogError> {
        Ok(self.store.fetch().await?.catalog)
    }

    /// Validate and append a new link, returning the created record.
    pub async fn append(&self, title: &str, url: &str) -> Result<DriveLink, CatalogError> {
        let title = title.trim();
        let url = url.trim();

        if title.is_empty() || url.is_empty() {
            return Err(CatalogError::Validation(
                "Title and URL are required".to_string(),
            ));
        }
        if drive::extract_file_id(url).is_none() {
            return Err(CatalogError::Validation(
                "Invalid Google Drive URL".to_string(),
            ));
        }

        let mut doc = self.store.fetch().await?;

        let link = DriveLink {
            id: new_link_id(),
            title: title.to_string(),
            url: url.to_string(),
            created_at: Utc::now(),
        };
        doc.catalog.links.push(link.clone());

        self.store.write(&doc.catalog).await?;

        tracing::debug!(link_id = %link.id, total = doc.catalog.links.len(), "Link appended");
        Ok(link)
    }

    /// Remove the link with the given id.
    ///
    /// Nothing is written when the id is absent. Every record carrying the
    /// id is removed, so a duplicated id cannot survive a delete.
    pub async fn remove(&self, id: &str) -> Result<(), CatalogError> {
        let mut doc = self.store.fetch().await?;

        let before = doc.catalog.links.len();
        doc.catalog.links.retain(|link| link.id != id);
        if doc.catalog.links.len() == before {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        self.store.write(&doc.catalog).await?;

        tracing::debug!(link_id = %id, remaining = doc.catalog.links.len(), "Link removed");
        Ok(())
    }
}

/// `link-{unix_millis}-{random suffix}`; the suffix separates
/// same-millisecond creations.
fn new_link_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("link-{}-{}", Utc::now().timestamp_millis(), suffix)
}
