//! Loitering classification: slow vessels far away from any known port.

use serde::Serialize;

use super::port_index::PortIndex;
use crate::config::AnalysisConfig;
use crate::models::PositionReport;

/// Per-report output of the loitering stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoiteringOutcome {
    pub distance_to_nearest_port_nm: f64,
    pub nearest_port: Option<String>,
    pub is_loitering: bool,
}

impl LoiteringOutcome {
    pub fn apply_to(self, report: &mut PositionReport) {
        report.distance_to_nearest_port_nm = self.distance_to_nearest_port_nm;
        report.nearest_port = self.nearest_port;
        report.is_loitering = self.is_loitering;
    }
}

/// Flags reports moving slower than `speed_threshold_knots` while more than
/// `distance_threshold_nm` away from the nearest port.
///
/// With an empty port registry every distance is `+∞`, so the distance test
/// always passes and the detector reduces to a speed-only check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoiteringDetector {
    speed_threshold_knots: f64,
    distance_threshold_nm: f64,
}

impl LoiteringDetector {
    pub fn new(speed_threshold_knots: f64, distance_threshold_nm: f64) -> Self {
        Self {
            speed_threshold_knots,
            distance_threshold_nm,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.speed_threshold_knots, config.distance_threshold_nm)
    }

    /// The loitering rule applied to an already computed port distance.
    pub fn classify(&self, speed_over_ground: f64, distance_nm: f64) -> bool {
        speed_over_ground < self.speed_threshold_knots && distance_nm > self.distance_threshold_nm
    }

    pub fn is_loitering(&self, report: &PositionReport, index: &PortIndex) -> bool {
        self.evaluate(report, index).is_loitering
    }

    pub fn evaluate(&self, report: &PositionReport, index: &PortIndex) -> LoiteringOutcome {
        let nearest = index.nearest(report.latitude, report.longitude);
        let distance = nearest
            .map(|n| n.distance_nm)
            .unwrap_or(f64::INFINITY);

        LoiteringOutcome {
            distance_to_nearest_port_nm: distance,
            nearest_port: nearest.map(|n| n.port.name.clone()),
            is_loitering: self.classify(report.speed_over_ground, distance),
        }
    }

    /// Evaluate every report; the result is aligned with `reports` by position.
    pub fn evaluate_all(&self, reports: &[PositionReport], index: &PortIndex) -> Vec<LoiteringOutcome> {
        reports.iter().map(|r| self.evaluate(r, index)).collect()
    }

    /// Evaluate and write the outcome into each report.
    pub fn annotate(&self, reports: &mut [PositionReport], index: &PortIndex) {
        for report in reports.iter_mut() {
            let outcome = self.evaluate(report, index);
            outcome.apply_to(report);
        }
    }
}
