//! # MANTA Rust Backend
//!
//! Maritime anomaly detection over AIS vessel position reports.
//!
//! The engine flags individual reports using two independent signals:
//!
//! - **Loitering**: moving slower than a speed threshold while farther than a
//!   distance threshold from every known port
//! - **Going dark**: a gap since the vessel's previous report longer than the
//!   expected reporting cadence
//!
//! and surfaces the most recent report of every vessel that shows either.
//!
//! ## Architecture
//!
//! - [`models`]: position reports, ports, run diagnostics
//! - [`algorithms`]: port index, detectors, aggregation
//! - [`transformations`]: row limiting and the activity pre-filter
//! - [`parsing`]: polars-based CSV readers
//! - [`sources`]: the [`DataSource`](sources::DataSource) seam
//! - [`services`]: analysis pipeline and snapshot publication
//! - [`config`]: TOML and environment configuration
//! - [`http`]: axum REST API (feature `http-server`)
//!
//! ## Example
//!
//! ```
//! use manta_rust::config::AnalysisConfig;
//! use manta_rust::models::{Port, PositionReport};
//! use manta_rust::services::analyze;
//!
//! let ports = vec![Port::new("A", 0.0, 0.0)];
//! let reports = vec![
//!     PositionReport::new(42, "2024-01-01T09:00:00", 0.0, 1.0, 0.5, 0.0),
//!     PositionReport::new(42, "2024-01-01T09:05:00", 0.0, 1.0, 0.5, 0.0),
//! ];
//!
//! let annotated = analyze(reports, ports, &AnalysisConfig::default()).unwrap();
//! assert!(annotated.iter().all(|r| r.is_loitering && r.is_anomalous));
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod services;
pub mod sources;
pub mod transformations;

#[cfg(feature = "http-server")]
pub mod http;
