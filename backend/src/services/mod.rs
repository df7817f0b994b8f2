//! Service layer: analysis runs and snapshot publication.
//!
//! This module sits between the data sources and the HTTP layer. The
//! pipeline orchestrates the algorithms into an immutable [`Snapshot`];
//! the store publishes it to readers.

pub mod pipeline;
pub mod snapshot;
pub mod snapshot_store;


pub use pipeline::{analyze, annotate_reports, AnalysisPipeline};
pub use snapshot::{Snapshot, SnapshotSummary};
pub use snapshot_store::SnapshotStore;
