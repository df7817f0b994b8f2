//! The immutable result of one analysis run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::algorithms::DistanceMode;
use crate::config::AnalysisConfig;
use crate::models::{PositionReport, RunDiagnostics};

/// Annotated reports plus everything needed to explain how they were produced.
///
/// Snapshots are never mutated after construction; a reload builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// `None` for the placeholder served before the first successful run
    pub generated_at: Option<DateTime<Utc>>,
    /// Every report with its derived fields, in input order
    pub reports: Vec<PositionReport>,
    /// Latest report of each vessel that has at least one anomaly, by vessel id
    pub anomalies: Vec<PositionReport>,
    pub port_count: usize,
    pub config: AnalysisConfig,
    pub diagnostics: RunDiagnostics,
}

impl Snapshot {
    /// Placeholder with no data.
    pub fn empty() -> Self {
        Self {
            generated_at: None,
            reports: Vec::new(),
            anomalies: Vec::new(),
            port_count: 0,
            config: AnalysisConfig::default(),
            diagnostics: RunDiagnostics::default(),
        }
    }

    pub fn is_published(&self) -> bool {
        self.generated_at.is_some()
    }

    pub fn summary(&self) -> SnapshotSummary {
        let vessel_count = self
            .reports
            .iter()
            .map(|r| r.vessel_id)
            .collect::<HashSet<_>>()
            .len();

        SnapshotSummary {
            generated_at: self.generated_at,
            report_count: self.reports.len(),
            vessel_count,
            port_count: self.port_count,
            loitering_count: self.reports.iter().filter(|r| r.is_loitering).count(),
            dark_count: self.reports.iter().filter(|r| r.is_dark).count(),
            anomalous_count: self.reports.iter().filter(|r| r.is_anomalous).count(),
            anomalous_vessel_count: self.anomalies.len(),
            distance_mode: self.config.distance_mode,
            config: self.config.clone(),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Counts and provenance of a snapshot, without the report lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    pub generated_at: Option<DateTime<Utc>>,
    pub report_count: usize,
    pub vessel_count: usize,
    pub port_count: usize,
    pub loitering_count: usize,
    pub dark_count: usize,
    pub anomalous_count: usize,
    pub anomalous_vessel_count: usize,
    pub distance_mode: DistanceMode,
    pub config: AnalysisConfig,
    pub diagnostics: RunDiagnostics,
}
