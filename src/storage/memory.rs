//! In-process [`DocumentStore`] for tests and local development.

use super::{DocumentStore, RemoteDocument, StoreError};
use crate::models::LinkCatalog;
use async_trait::async_trait;
use std::sync::Mutex;

/// Holds the serialized document behind a mutex, with a counter standing in
/// for the blob SHA so revisions move on every write like the real
/// backend's.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    document: Option<String>,
    version: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing catalog, as if previously written.
    pub fn with_catalog(catalog: &LinkCatalog) -> Result<Self, StoreError> {
        let store = Self::new();
        {
            let mut state = store.lock();
            state.document = Some(serde_json::to_string_pretty(catalog)?);
            state.version = 1;
        }
        Ok(store)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn fetch(&self) -> Result<RemoteDocument, StoreError> {
        let state = self.lock();
        match &state.document {
            Some(json) => Ok(RemoteDocument {
                catalog: serde_json::from_str(json)?,
                revision: Some(state.version.to_string()),
            }),
            None => Ok(RemoteDocument {
                catalog: LinkCatalog::default(),
                revision: None,
            }),
        }
    }

    async fn fetch_revision(&self) -> Result<Option<String>, StoreError> {
        let state = self.lock();
        Ok(state.document.as_ref().map(|_| state.version.to_string()))
    }

    async fn write(&self, catalog: &LinkCatalog) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(catalog)?;
        let mut state = self.lock();
        state.document = Some(json);
        state.version += 1;
        Ok(())
    }
}
