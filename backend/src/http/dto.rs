//! Data Transfer Objects for the HTTP API.
//!
//! Report lists are served as [`PositionReport`](crate::models::PositionReport)
//! records directly; the types here cover everything else.

use serde::{Deserialize, Serialize};

pub use crate::services::SnapshotSummary;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Whether a computed snapshot has been published yet
    pub snapshot_available: bool,
    /// Generation time of the served snapshot, RFC 3339
    pub snapshot_generated_at: Option<String>,
    /// Number of degradations recorded by the run behind the served snapshot
    pub degradations: usize,
}

/// Query parameters for the vessel list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VesselQuery {
    /// Only reports from this MMSI
    #[serde(default)]
    pub mmsi: Option<i64>,
    /// Only reports flagged anomalous
    #[serde(default)]
    pub anomalous_only: Option<bool>,
}
