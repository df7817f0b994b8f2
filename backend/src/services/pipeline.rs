//! End-to-end analysis run: load, prepare, index, detect, aggregate.

use chrono::Utc;
use std::thread;
use tracing::{debug, info, warn};

use crate::algorithms::{
    apply_combined_flags, latest_anomalies_per_vessel, LoiteringDetector, PortIndex,
    TemporalGapAnalyzer,
};
use crate::config::{AnalysisConfig, MantaConfig};
use crate::error::{AnalysisError, ConfigError, SourceError};
use crate::models::{Degradation, Port, PositionReport, RunDiagnostics};
use crate::services::snapshot::Snapshot;
use crate::sources::DataSource;
use crate::transformations::{
    limit_rows, retain_valid_ports, retain_valid_reports, ActivityFilter,
};

/// Builds snapshots from a [`DataSource`] with a fixed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    max_reports: Option<usize>,
}

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            max_reports: None,
        }
    }

    pub fn from_config(config: &MantaConfig) -> Self {
        Self::new(config.analysis.clone()).with_max_reports(config.sources.max_reports)
    }

    pub fn with_max_reports(mut self, max_reports: Option<usize>) -> Self {
        self.max_reports = max_reports;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn max_reports(&self) -> Option<usize> {
        self.max_reports
    }

    /// Run the whole analysis.
    ///
    /// Source problems are recorded as degradations and the run continues
    /// with an empty collection. Only invalid configuration is an error.
    pub fn run(&self, source: &dyn DataSource) -> Result<Snapshot, AnalysisError> {
        self.validate()?;

        info!(source = %source.describe(), "Starting anomaly analysis");
        let mut diagnostics = RunDiagnostics::default();

        let reports = match source.load_reports() {
            Ok(parsed) => {
                diagnostics.dropped_position_rows = parsed.dropped_rows;
                parsed.rows
            }
            Err(err) => {
                record_source_failure(&mut diagnostics, &err);
                Vec::new()
            }
        };

        let ports = match source.load_ports() {
            Ok(parsed) => {
                diagnostics.dropped_port_rows = parsed.dropped_rows;
                parsed.rows
            }
            Err(err) => {
                record_source_failure(&mut diagnostics, &err);
                Vec::new()
            }
        };

        let reports = retain_valid_reports(reports);
        let ports = retain_valid_ports(ports);
        if reports.removed > 0 || ports.removed > 0 {
            warn!(
                reports = reports.removed,
                ports = ports.removed,
                "Dropped rows outside the data model"
            );
        }
        diagnostics.dropped_position_rows += reports.removed;
        diagnostics.dropped_port_rows += ports.removed;
        let (reports, ports) = (reports.kept, ports.kept);

        debug!(
            reports = reports.len(),
            ports = ports.len(),
            dropped_position_rows = diagnostics.dropped_position_rows,
            dropped_port_rows = diagnostics.dropped_port_rows,
            "Loaded input collections"
        );

        let reports = self.prepare(reports, &mut diagnostics);

        let invalid_timestamps = reports.iter().filter(|r| !r.has_valid_timestamp()).count();
        if invalid_timestamps > 0 {
            warn!(count = invalid_timestamps, "Reports with unparseable timestamps");
            diagnostics.record(Degradation::InvalidTimestamps {
                count: invalid_timestamps,
            });
        }

        let port_count = ports.len();
        let index = PortIndex::build_with_mode(ports, self.config.distance_mode);
        if index.is_empty() {
            warn!("Port registry is empty; loitering falls back to speed only");
            diagnostics.record(Degradation::EmptyDistanceIndex);
        }

        let reports = annotate_reports(reports, &index, &self.config)?;
        let anomalies = latest_anomalies_per_vessel(&reports);

        info!(
            reports = reports.len(),
            ports = port_count,
            anomalous_vessels = anomalies.len(),
            degradations = diagnostics.degradations.len(),
            "Anomaly analysis complete"
        );

        Ok(Snapshot {
            generated_at: Some(Utc::now()),
            reports,
            anomalies,
            port_count,
            config: self.config.clone(),
            diagnostics,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        if self.max_reports == Some(0) {
            return Err(ConfigError::invalid("max_reports", "must be at least 1"));
        }
        Ok(())
    }

    /// Row limit, then the optional activity filter.
    fn prepare(
        &self,
        reports: Vec<PositionReport>,
        diagnostics: &mut RunDiagnostics,
    ) -> Vec<PositionReport> {
        let reports = match self.max_reports {
            Some(max) => {
                let before = reports.len();
                let limited = limit_rows(reports, max);
                diagnostics.sampled_out_reports = before - limited.len();
                if diagnostics.sampled_out_reports > 0 {
                    debug!(kept = limited.len(), total = before, "Applied row limit");
                }
                limited
            }
            None => reports,
        };

        match self.config.min_position_std_deg {
            Some(threshold) => {
                let outcome = ActivityFilter::new(threshold).apply(reports);
                diagnostics.inactive_vessels_removed = outcome.removed_vessels;
                debug!(
                    threshold,
                    removed_vessels = outcome.removed_vessels,
                    "Applied activity filter"
                );
                outcome.kept
            }
            None => reports,
        }
    }
}

fn record_source_failure(diagnostics: &mut RunDiagnostics, err: &SourceError) {
    warn!(dataset = %err.dataset(), error = %err, "Source degraded; continuing with no rows");
    diagnostics.record(Degradation::from(err));
}

/// Attach every derived field to `reports` against an already built index.
///
/// The loitering and gap stages read the same reports and share no mutable
/// state, so they run on two scoped threads; their outcomes are merged by
/// position afterwards. Input order is preserved.
pub fn annotate_reports(
    mut reports: Vec<PositionReport>,
    index: &PortIndex,
    config: &AnalysisConfig,
) -> Result<Vec<PositionReport>, AnalysisError> {
    let loitering = LoiteringDetector::from_config(config);
    let gaps = TemporalGapAnalyzer::from_config(config);

    let (loitering_outcomes, gap_outcomes) = thread::scope(|scope| {
        let loitering_stage = scope.spawn(|| loitering.evaluate_all(&reports, index));
        let gap_stage = scope.spawn(|| gaps.compute_gaps(&reports));
        (loitering_stage.join(), gap_stage.join())
    });

    let loitering_outcomes =
        loitering_outcomes.map_err(|_| AnalysisError::StagePanicked { stage: "loitering" })?;
    let gap_outcomes =
        gap_outcomes.map_err(|_| AnalysisError::StagePanicked { stage: "temporal_gaps" })?;

    for ((report, loitering), gap) in reports
        .iter_mut()
        .zip(loitering_outcomes)
        .zip(gap_outcomes)
    {
        loitering.apply_to(report);
        gap.apply_to(report);
    }

    apply_combined_flags(&mut reports);
    Ok(reports)
}

/// Annotate in-memory collections without a data source.
///
/// Reports and ports outside the data model are dropped first, as in
/// [`AnalysisPipeline::run`]; the returned vector holds only valid reports.
pub fn analyze(
    reports: Vec<PositionReport>,
    ports: Vec<Port>,
    config: &AnalysisConfig,
) -> Result<Vec<PositionReport>, AnalysisError> {
    config.validate()?;
    let reports = retain_valid_reports(reports).kept;
    let ports = retain_valid_ports(ports).kept;
    let index = PortIndex::build_with_mode(ports, config.distance_mode);
    annotate_reports(reports, &index, config)
}
