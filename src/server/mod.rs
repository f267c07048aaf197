pub mod handlers;
pub mod routes;

use std::sync::Arc;

use crate::config::Config;
use crate::ingest::IngestClient;
use crate::storage::StationStore;

/// Shared application state injected into all handlers via axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: StationStore,
    /// Remote ingestion endpoint; `None` routes submissions to the local store.
    pub ingest: Option<Arc<IngestClient>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: StationStore, ingest: Option<IngestClient>, config: Config) -> Self {
        Self {
            store,
            ingest: ingest.map(Arc::new),
            config: Arc::new(config),
        }
    }
}
