//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::{AnalysisPipeline, SnapshotStore};
use crate::sources::DataSource;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Currently published snapshot
    pub store: Arc<SnapshotStore>,
    /// Pipeline used by reloads
    pub pipeline: Arc<AnalysisPipeline>,
    /// Where reloads read their input from
    pub source: Arc<dyn DataSource>,
}

impl AppState {
    pub fn new(
        store: Arc<SnapshotStore>,
        pipeline: AnalysisPipeline,
        source: Arc<dyn DataSource>,
    ) -> Self {
        Self {
            store,
            pipeline: Arc::new(pipeline),
            source,
        }
    }
}
