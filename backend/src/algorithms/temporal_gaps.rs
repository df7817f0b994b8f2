//! Per-vessel reporting gap analysis ("going dark").

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::models::{seconds_between, PositionReport, VesselId};

/// Per-report output of the gap stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GapOutcome {
    pub time_gap_seconds: f64,
    pub is_dark: bool,
}

impl GapOutcome {
    pub fn apply_to(self, report: &mut PositionReport) {
        report.time_gap_seconds = self.time_gap_seconds;
        report.is_dark = self.is_dark;
    }
}

/// Group report positions by vessel. Indices inside each group keep input order.
pub fn group_by_vessel(reports: &[PositionReport]) -> BTreeMap<VesselId, Vec<usize>> {
    let mut groups: BTreeMap<VesselId, Vec<usize>> = BTreeMap::new();
    for (i, report) in reports.iter().enumerate() {
        groups.entry(report.vessel_id).or_default().push(i);
    }
    groups
}

/// Stable chronological order; reports with invalid timestamps go last.
fn sort_chronologically(reports: &[PositionReport], indices: &mut [usize]) {
    indices.sort_by_key(|&i| (reports[i].timestamp.is_none(), reports[i].timestamp));
}

/// Computes the time since each vessel's previous report and flags gaps
/// longer than `time_gap_threshold_seconds`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalGapAnalyzer {
    time_gap_threshold_seconds: f64,
}

impl TemporalGapAnalyzer {
    pub fn new(time_gap_threshold_seconds: f64) -> Self {
        Self {
            time_gap_threshold_seconds,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.time_gap_threshold_seconds)
    }

    /// Gap outcomes aligned with `reports` by position.
    ///
    /// A vessel's first report in time has a gap of 0. A gap touching an
    /// invalid timestamp (either side) is indeterminate and also reported as 0.
    pub fn compute_gaps(&self, reports: &[PositionReport]) -> Vec<GapOutcome> {
        let mut outcomes = vec![GapOutcome::default(); reports.len()];

        for mut indices in group_by_vessel(reports).into_values() {
            sort_chronologically(reports, &mut indices);

            let mut previous: Option<DateTime<Utc>> = None;
            for i in indices {
                let current = reports[i].timestamp;
                let gap = match (previous, current) {
                    (Some(prev), Some(cur)) => seconds_between(prev, cur),
                    _ => 0.0,
                };
                outcomes[i] = GapOutcome {
                    time_gap_seconds: gap,
                    is_dark: gap > self.time_gap_threshold_seconds,
                };
                previous = current;
            }
        }

        outcomes
    }

    /// Fill in `time_gap_seconds` and `is_dark` on every report. Input order is preserved.
    pub fn annotate_gaps(&self, mut reports: Vec<PositionReport>) -> Vec<PositionReport> {
        let outcomes = self.compute_gaps(&reports);
        for (report, outcome) in reports.iter_mut().zip(outcomes) {
            outcome.apply_to(report);
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn report(mmsi: i64, time: &str) -> PositionReport {
        PositionReport::new(mmsi, time, 0.0, 1.0, 0.5, 0.0)
    }

    #[test]
    fn test_first_report_has_zero_gap() {
        let analyzer = TemporalGapAnalyzer::new(600.0);
        let reports = analyzer.annotate_gaps(vec![report(42, "2024-01-01T09:00:00")]);

        assert_eq!(reports[0].time_gap_seconds, 0.0);
        assert!(!reports[0].is_dark);
    }

    #[test]
    fn test_short_gap_is_not_dark() {
        let analyzer = TemporalGapAnalyzer::new(600.0);
        let reports = analyzer.annotate_gaps(vec![
            report(42, "2024-01-01T09:00:00"),
            report(42, "2024-01-01T09:05:00"),
        ]);

        assert_eq!(reports[1].time_gap_seconds, 300.0);
        assert!(!reports[0].is_dark);
        assert!(!reports[1].is_dark);
    }

    #[test]
    fn test_long_gap_is_dark() {
        let analyzer = TemporalGapAnalyzer::new(600.0);
        let reports = analyzer.annotate_gaps(vec![
            report(42, "2024-01-01T09:00:00"),
            report(42, "2024-01-01T10:00:00"),
        ]);

        assert_eq!(reports[1].time_gap_seconds, 3600.0);
        assert!(!reports[0].is_dark);
        assert!(reports[1].is_dark);
    }

    #[test]
    fn test_gap_equal_to_threshold_is_not_dark() {
        let analyzer = TemporalGapAnalyzer::new(300.0);
        let reports = analyzer.annotate_gaps(vec![
            report(1, "2024-01-01T09:00:00"),
            report(1, "2024-01-01T09:05:00"),
        ]);
        assert!(!reports[1].is_dark);
    }

    #[test]
    fn test_gaps_follow_time_not_input_order() {
        let analyzer = TemporalGapAnalyzer::new(600.0);
        let reports = analyzer.annotate_gaps(vec![
            report(42, "2024-01-01T10:00:00"),
            report(42, "2024-01-01T09:00:00"),
            report(42, "2024-01-01T09:10:00"),
        ]);

        // Input order is preserved in the output
        assert_eq!(reports[0].base_date_time, "2024-01-01T10:00:00");
        assert_eq!(reports[0].time_gap_seconds, 3000.0);
        assert_eq!(reports[1].time_gap_seconds, 0.0);
        assert_eq!(reports[2].time_gap_seconds, 600.0);
        assert!(reports[0].is_dark);
        assert!(!reports[2].is_dark);
    }

    #[test]
    fn test_vessels_are_independent() {
        let analyzer = TemporalGapAnalyzer::new(600.0);
        let reports = analyzer.annotate_gaps(vec![
            report(1, "2024-01-01T09:00:00"),
            report(2, "2024-01-01T12:00:00"),
            report(1, "2024-01-01T09:01:00"),
            report(2, "2024-01-01T12:30:00"),
        ]);

        assert_eq!(reports[0].time_gap_seconds, 0.0);
        assert_eq!(reports[1].time_gap_seconds, 0.0);
        assert_eq!(reports[2].time_gap_seconds, 60.0);
        assert_eq!(reports[3].time_gap_seconds, 1800.0);
        assert!(reports[3].is_dark);
    }

    #[test]
    fn test_invalid_timestamps_are_indeterminate() {
        let analyzer = TemporalGapAnalyzer::new(60.0);
        let reports = analyzer.annotate_gaps(vec![
            report(42, "2024-01-01T09:00:00"),
            report(42, "not-a-time"),
            report(42, "2024-01-01T11:00:00"),
            report(42, ""),
        ]);

        assert_eq!(reports[0].time_gap_seconds, 0.0);
        assert_eq!(reports[2].time_gap_seconds, 7200.0);
        assert!(reports[2].is_dark);
        // Invalid rows sort after valid ones and never produce a gap
        assert_eq!(reports[1].time_gap_seconds, 0.0);
        assert_eq!(reports[3].time_gap_seconds, 0.0);
        assert!(!reports[1].is_dark);
        assert!(!reports[3].is_dark);
    }

    #[test]
    fn test_identical_timestamps_have_zero_gap() {
        let analyzer = TemporalGapAnalyzer::new(0.0);
        let reports = analyzer.annotate_gaps(vec![
            report(5, "2024-01-01T09:00:00"),
            report(5, "2024-01-01T09:00:00"),
        ]);
        assert!(reports.iter().all(|r| r.time_gap_seconds == 0.0 && !r.is_dark));
    }

    #[test]
    fn test_empty_input() {
        let analyzer = TemporalGapAnalyzer::new(600.0);
        assert!(analyzer.annotate_gaps(vec![]).is_empty());
    }

    #[test]
    fn test_group_by_vessel_keeps_input_order() {
        let reports = vec![report(2, "a"), report(1, "b"), report(2, "c")];
        let groups = group_by_vessel(&reports);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&VesselId::new(1)], vec![1]);
        assert_eq!(groups[&VesselId::new(2)], vec![0, 2]);
    }

    proptest! {
        #[test]
        fn prop_earliest_report_has_zero_gap(
            offsets in prop::collection::vec((1i64..4, 0i64..86_400), 1..30),
        ) {
            let base = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
            let reports: Vec<PositionReport> = offsets
                .iter()
                .map(|(mmsi, secs)| {
                    let t = base + chrono::Duration::seconds(*secs);
                    report(*mmsi, &t.to_rfc3339())
                })
                .collect();

            let annotated = TemporalGapAnalyzer::new(600.0).annotate_gaps(reports);

            for indices in group_by_vessel(&annotated).values() {
                let earliest = indices
                    .iter()
                    .map(|&i| annotated[i].timestamp.unwrap())
                    .min()
                    .unwrap();
                for &i in indices {
                    prop_assert!(annotated[i].time_gap_seconds >= 0.0);
                    if annotated[i].timestamp.unwrap() == earliest {
                        // Only ties with the earliest instant can sit first; all have gap 0
                        prop_assert_eq!(annotated[i].time_gap_seconds, 0.0);
                    }
                }
            }
        }
    }
}
