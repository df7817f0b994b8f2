//! Example running one analysis over CSV files and printing the anomalies
//!
//! This example shows how to:
//! 1. Load configuration (file + `MANTA_*` overrides)
//! 2. Point a CSV data source at an AIS file and a port registry
//! 3. Run the pipeline once
//! 4. Inspect diagnostics and the latest anomaly per vessel
//!
//! To run this example:
//! ```bash
//! cargo run --example detect_anomalies -- data/AIS_2024_01_01.csv data/ports.csv
//! ```

use std::env;

use manta_rust::config::MantaConfig;
use manta_rust::services::AnalysisPipeline;
use manta_rust::sources::CsvDataSource;

fn main() -> anyhow::Result<()> {
    let mut config = MantaConfig::load()?;

    let mut args = env::args().skip(1);
    if let Some(positions) = args.next() {
        config.sources.positions_path = Some(positions.into());
    }
    if let Some(ports) = args.next() {
        config.sources.ports_path = Some(ports.into());
    }

    println!("=== MANTA anomaly run ===\n");

    let source = CsvDataSource::from_settings(&config.sources);
    let snapshot = AnalysisPipeline::from_config(&config).run(&source)?;
    let summary = snapshot.summary();

    println!(
        "{} reports from {} vessels against {} ports ({} distance)",
        summary.report_count, summary.vessel_count, summary.port_count, summary.distance_mode
    );
    println!(
        "loitering: {}, dark: {}, anomalous: {}\n",
        summary.loitering_count, summary.dark_count, summary.anomalous_count
    );

    for degradation in &summary.diagnostics.degradations {
        println!("degraded: {}", degradation);
    }

    println!("\nLatest anomaly per vessel:");
    for report in &snapshot.anomalies {
        let distance = if report.distance_to_nearest_port_nm.is_finite() {
            format!("{:.1} nm", report.distance_to_nearest_port_nm)
        } else {
            "n/a".to_string()
        };
        println!(
            "  {:>10}  {}  sog={:.1}  port={} ({})  gap={:.0}s  loitering={} dark={}",
            report.vessel_id.value(),
            report.base_date_time,
            report.speed_over_ground,
            report.nearest_port.as_deref().unwrap_or("-"),
            distance,
            report.time_gap_seconds,
            report.is_loitering,
            report.is_dark,
        );
    }

    Ok(())
}
