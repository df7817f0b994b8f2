//! Flag aggregation and the operator-facing "latest anomaly per vessel" view.

use super::temporal_gaps::group_by_vessel;
use crate::models::PositionReport;

/// A report is anomalous when it is loitering or dark.
pub fn combine(report: &PositionReport) -> bool {
    report.is_loitering || report.is_dark
}

/// Store [`combine`] into `is_anomalous` for every report.
pub fn apply_combined_flags(reports: &mut [PositionReport]) {
    for report in reports.iter_mut() {
        report.is_anomalous = combine(report);
    }
}

/// For every vessel with at least one anomalous report, return that vessel's
/// most recent report overall (not just its most recent anomalous one).
///
/// The most recent report is the one with the maximum valid timestamp; equal
/// maxima resolve to the earliest in input order. A qualifying vessel without
/// any valid timestamp contributes its first report in input order. Results
/// are ordered by vessel id. Empty input yields an empty result.
pub fn latest_anomalies_per_vessel(reports: &[PositionReport]) -> Vec<PositionReport> {
    group_by_vessel(reports)
        .into_values()
        .filter(|indices| indices.iter().any(|&i| reports[i].is_anomalous))
        .filter_map(|indices| {
            indices.into_iter().reduce(|best, i| {
                // `None < Some(_)`, so invalid timestamps never win over valid ones
                if reports[i].timestamp > reports[best].timestamp {
                    i
                } else {
                    best
                }
            })
        })
        .map(|i| reports[i].clone())
        .collect()
}
