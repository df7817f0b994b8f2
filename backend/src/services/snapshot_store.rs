//! Published snapshot with atomic replacement.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::AnalysisError;
use crate::services::pipeline::AnalysisPipeline;
use crate::services::snapshot::Snapshot;
use crate::sources::DataSource;

/// Holds the snapshot served to readers.
///
/// Readers clone the inner `Arc` and keep using it for as long as they
/// like; a publish swaps the pointer and never touches the old snapshot.
/// Reloads are serialized so two runs never race to publish.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
    reload_lock: Mutex<()>,
}

impl SnapshotStore {
    /// A store serving the empty placeholder snapshot.
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::empty())
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    /// Replace the served snapshot.
    pub fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write() = Arc::clone(&snapshot);
        snapshot
    }

    /// Recompute from `source` and publish the result.
    ///
    /// On error the previously published snapshot stays in place.
    pub fn reload(
        &self,
        pipeline: &AnalysisPipeline,
        source: &dyn DataSource,
    ) -> Result<Arc<Snapshot>, AnalysisError> {
        let _guard = self.reload_lock.lock();

        match pipeline.run(source) {
            Ok(snapshot) => {
                let published = self.publish(snapshot);
                info!(
                    reports = published.reports.len(),
                    anomalies = published.anomalies.len(),
                    "Published new snapshot"
                );
                Ok(published)
            }
            Err(err) => {
                warn!(error = %err, "Reload failed; keeping previous snapshot");
                Err(err)
            }
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::models::{Port, PositionReport};
    use crate::sources::InMemorySource;
    use std::thread;

    fn source() -> InMemorySource {
        InMemorySource::new(
            vec![PositionReport::new(42, "2024-01-01T09:00:00", 0.0, 1.0, 0.5, 0.0)],
            vec![Port::new("A", 0.0, 0.0)],
        )
    }

    #[test]
    fn test_new_store_serves_empty_snapshot() {
        let store = SnapshotStore::new();
        let snapshot = store.current();
        assert!(!snapshot.is_published());
        assert!(snapshot.reports.is_empty());
    }

    #[test]
    fn test_reload_publishes() {
        let store = SnapshotStore::new();
        let pipeline = AnalysisPipeline::new(AnalysisConfig::default());

        let published = store.reload(&pipeline, &source()).unwrap();
        assert_eq!(published.reports.len(), 1);
        assert!(Arc::ptr_eq(&published, &store.current()));
    }

    #[test]
    fn test_failed_reload_keeps_previous_snapshot() {
        let store = SnapshotStore::new();
        let good = AnalysisPipeline::new(AnalysisConfig::default());
        let before = store.reload(&good, &source()).unwrap();

        let mut bad_config = AnalysisConfig::default();
        bad_config.speed_threshold_knots = f64::INFINITY;
        let bad = AnalysisPipeline::new(bad_config);

        assert!(store.reload(&bad, &source()).is_err());
        assert!(Arc::ptr_eq(&before, &store.current()));
    }

    #[test]
    fn test_readers_keep_their_snapshot_across_publish() {
        let store = SnapshotStore::new();
        let held = store.current();

        let data = source();
        store
            .reload(&AnalysisPipeline::new(AnalysisConfig::default()), &data)
            .unwrap();

        assert!(held.reports.is_empty());
        assert_eq!(store.current().reports.len(), 1);
    }

    #[test]
    fn test_concurrent_reloads_and_reads() {
        let store = Arc::new(SnapshotStore::new());
        let data = Arc::new(source());
        let pipeline = AnalysisPipeline::new(AnalysisConfig::default());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                let data = Arc::clone(&data);
                let pipeline = pipeline.clone();
                thread::spawn(move || {
                    store.reload(&pipeline, data.as_ref()).unwrap();
                    let snapshot = store.current();
                    assert_eq!(snapshot.reports.len(), 1);
                    assert_eq!(snapshot.anomalies.len(), 1);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
