use crate::models::{Port, PositionReport};

/// Rows kept by a validation pass and how many were removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRows<T> {
    pub kept: Vec<T>,
    pub removed: usize,
}

/// Drop reports with a non-finite field or a negative speed over ground.
///
/// Every source goes through this, so the detectors only ever see reports
/// whose distance and speed comparisons are meaningful.
pub fn retain_valid_reports(reports: Vec<PositionReport>) -> ValidatedRows<PositionReport> {
    retain(reports, PositionReport::has_valid_fields)
}

/// Drop ports outside `[-90, 90] x [-180, 180]` or with non-finite coordinates.
pub fn retain_valid_ports(ports: Vec<Port>) -> ValidatedRows<Port> {
    retain(ports, Port::has_valid_coordinates)
}

fn retain<T>(rows: Vec<T>, is_valid: impl Fn(&T) -> bool) -> ValidatedRows<T> {
    let total = rows.len();
    let kept: Vec<T> = rows.into_iter().filter(|row| is_valid(row)).collect();
    ValidatedRows {
        removed: total - kept.len(),
        kept,
    }
}
