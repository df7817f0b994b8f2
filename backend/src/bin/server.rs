//! MANTA HTTP Server Binary
//!
//! Loads configuration, computes the first snapshot, and serves the
//! anomaly queries over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Uses ./manta.toml when present, otherwise defaults
//! cargo run --bin manta-server
//!
//! # Explicit inputs
//! MANTA_POSITIONS_CSV=data/AIS_2024_01_01.csv MANTA_PORTS_CSV=data/ports.csv \
//!   cargo run --bin manta-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `MANTA_CONFIG`: Path to a TOML configuration file
//! - `MANTA_*`: Per-option overrides (see `manta_rust::config`)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use manta_rust::config::MantaConfig;
use manta_rust::http::{create_router, AppState};
use manta_rust::services::{AnalysisPipeline, SnapshotStore};
use manta_rust::sources::{CsvDataSource, DataSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting MANTA HTTP Server");

    let config = MantaConfig::load().context("Failed to load configuration")?;
    info!(
        speed_threshold_knots = config.analysis.speed_threshold_knots,
        distance_threshold_nm = config.analysis.distance_threshold_nm,
        time_gap_threshold_seconds = config.analysis.time_gap_threshold_seconds,
        distance_mode = %config.analysis.distance_mode,
        "Configuration loaded"
    );

    let source: Arc<dyn DataSource> = Arc::new(CsvDataSource::from_settings(&config.sources));
    let pipeline = AnalysisPipeline::from_config(&config);
    let store = Arc::new(SnapshotStore::new());

    // The first run happens before binding; a failure leaves the empty
    // snapshot in place and can be retried with POST /api/reload.
    let initial = {
        let store = Arc::clone(&store);
        let pipeline = pipeline.clone();
        let source = Arc::clone(&source);
        tokio::task::spawn_blocking(move || store.reload(&pipeline, source.as_ref()))
            .await
            .context("Initial analysis task failed")?
    };
    if let Err(e) = initial {
        warn!(error = %e, "Initial analysis failed; serving an empty snapshot");
    }

    let state = AppState::new(store, pipeline, source);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
