//! HTTP server module for the MANTA backend.
//!
//! This module exposes the published snapshot as a small read-only REST API,
//! plus an explicit reload endpoint.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing, JSON serialization                      │
//! │  - CORS, compression, tracing, error mapping              │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  SnapshotStore                                            │
//! │  - Atomically published, immutable snapshot               │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │ reload
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  AnalysisPipeline + DataSource                            │
//! │  - CSV loading, port index, detectors, aggregation        │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
