use crate::algorithms::group_by_vessel;
use crate::models::PositionReport;

/// Result of applying [`ActivityFilter`].
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityFilterOutcome {
    pub kept: Vec<PositionReport>,
    pub removed_vessels: usize,
}

/// Keeps only vessels whose positions actually vary.
///
/// A vessel passes when the population standard deviation of its latitude
/// or of its longitude is strictly greater than `min_position_std_deg`.
/// Single-report vessels have zero spread and are removed for any
/// non-negative threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityFilter {
    min_position_std_deg: f64,
}

impl ActivityFilter {
    pub fn new(min_position_std_deg: f64) -> Self {
        Self {
            min_position_std_deg,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.min_position_std_deg
    }

    pub fn apply(&self, reports: Vec<PositionReport>) -> ActivityFilterOutcome {
        let groups = group_by_vessel(&reports);
        let mut keep = vec![false; reports.len()];
        let mut removed_vessels = 0;

        for indices in groups.values() {
            let lat_std = population_std(indices.iter().map(|&i| reports[i].latitude));
            let lon_std = population_std(indices.iter().map(|&i| reports[i].longitude));

            if lat_std > self.min_position_std_deg || lon_std > self.min_position_std_deg {
                for &i in indices {
                    keep[i] = true;
                }
            } else {
                removed_vessels += 1;
            }
        }

        let kept = reports
            .into_iter()
            .zip(keep)
            .filter_map(|(report, keep)| keep.then_some(report))
            .collect();

        ActivityFilterOutcome {
            kept,
            removed_vessels,
        }
    }
}

fn population_std(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let n = values.clone().count();
    if n == 0 {
        return 0.0;
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    variance.sqrt()
}
