//! HTTP handlers for the REST API.
//!
//! Read handlers only clone the current snapshot pointer; the reload handler
//! runs the pipeline on a blocking thread.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::dto::{HealthResponse, SnapshotSummary, VesselQuery};
use super::error::AppError;
use super::state::AppState;
use crate::models::PositionReport;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let snapshot = state.store.current();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        snapshot_available: snapshot.is_published(),
        snapshot_generated_at: snapshot.generated_at.map(|t| t.to_rfc3339()),
        degradations: snapshot.diagnostics.degradations.len(),
    }))
}

// =============================================================================
// Queries
// =============================================================================

/// GET /api/vessels
///
/// Every report of the current snapshot with its derived fields. `[]` when
/// nothing has been computed yet.
pub async fn list_vessels(
    State(state): State<AppState>,
    Query(query): Query<VesselQuery>,
) -> HandlerResult<Vec<PositionReport>> {
    let snapshot = state.store.current();
    let anomalous_only = query.anomalous_only.unwrap_or(false);

    let reports = snapshot
        .reports
        .iter()
        .filter(|r| query.mmsi.map_or(true, |mmsi| r.vessel_id.value() == mmsi))
        .filter(|r| !anomalous_only || r.is_anomalous)
        .cloned()
        .collect();

    Ok(Json(reports))
}

/// GET /api/anomalies
///
/// Latest report of every vessel with at least one anomaly, by MMSI.
pub async fn list_anomalies(State(state): State<AppState>) -> HandlerResult<Vec<PositionReport>> {
    Ok(Json(state.store.current().anomalies.clone()))
}

/// GET /api/snapshot
pub async fn get_snapshot_summary(State(state): State<AppState>) -> HandlerResult<SnapshotSummary> {
    Ok(Json(state.store.current().summary()))
}

// =============================================================================
// Reload
// =============================================================================

/// POST /api/reload
///
/// Recompute from the configured source and publish. On failure the
/// previous snapshot keeps being served and an error body is returned.
pub async fn reload_snapshot(State(state): State<AppState>) -> HandlerResult<SnapshotSummary> {
    let store = Arc::clone(&state.store);
    let pipeline = Arc::clone(&state.pipeline);
    let source = Arc::clone(&state.source);

    let snapshot = tokio::task::spawn_blocking(move || store.reload(&pipeline, source.as_ref()))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(snapshot.summary()))
}
