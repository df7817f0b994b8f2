//! Run diagnostics: the non-fatal degradations observed while building a snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two input collections the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Positions,
    Ports,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Positions => write!(f, "positions"),
            Dataset::Ports => write!(f, "ports"),
        }
    }
}

/// A condition that reduced the quality of a run without aborting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// Source missing or unreadable; the collection was treated as empty.
    SourceUnavailable { dataset: Dataset, message: String },
    /// Required columns absent; the collection was treated as empty.
    SchemaMismatch {
        dataset: Dataset,
        missing_columns: Vec<String>,
    },
    /// Reports whose timestamp could not be parsed. They stay in the
    /// snapshot with an indeterminate gap.
    InvalidTimestamps { count: usize },
    /// No ports available; every distance is infinite and loitering falls
    /// back to speed only.
    EmptyDistanceIndex,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::SourceUnavailable { dataset, message } => {
                write!(f, "{} source unavailable: {}", dataset, message)
            }
            Degradation::SchemaMismatch {
                dataset,
                missing_columns,
            } => write!(
                f,
                "{} source is missing columns: {}",
                dataset,
                missing_columns.join(", ")
            ),
            Degradation::InvalidTimestamps { count } => {
                write!(f, "{} report(s) with unparseable timestamps", count)
            }
            Degradation::EmptyDistanceIndex => {
                write!(f, "port registry is empty; loitering uses speed only")
            }
        }
    }
}

/// Counters and degradations collected by one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunDiagnostics {
    /// Position rows dropped because a required field was missing, non-finite
    /// or (for speed) negative
    pub dropped_position_rows: usize,
    /// Port rows dropped because a field was missing or out of range
    pub dropped_port_rows: usize,
    /// Reports removed by the row limit
    pub sampled_out_reports: usize,
    /// Vessels removed by the activity pre-filter
    pub inactive_vessels_removed: usize,
    pub degradations: Vec<Degradation>,
}

impl RunDiagnostics {
    pub fn record(&mut self, degradation: Degradation) {
        self.degradations.push(degradation);
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}
