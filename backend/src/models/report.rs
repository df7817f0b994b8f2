use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::time::parse_timestamp;

/// Maritime Mobile Service Identity. Serializes as a bare number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VesselId(pub i64);

impl VesselId {
    pub fn new(mmsi: i64) -> Self {
        VesselId(mmsi)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VesselId {
    fn from(mmsi: i64) -> Self {
        VesselId(mmsi)
    }
}

/// A single AIS position report together with the fields derived by the
/// anomaly engine.
///
/// Raw fields serialize under the AIS column names (`MMSI`, `BaseDateTime`,
/// `LAT`, `LON`, `SOG`, `COG`) so dashboard records look like the source
/// rows; derived fields use snake_case. An infinite port distance (empty
/// port registry) serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionReport {
    #[serde(rename = "MMSI")]
    pub vessel_id: VesselId,
    /// Timestamp text exactly as received
    #[serde(rename = "BaseDateTime")]
    pub base_date_time: String,
    /// Parsed instant; `None` when `base_date_time` could not be parsed
    #[serde(skip)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "LAT")]
    pub latitude: f64,
    #[serde(rename = "LON")]
    pub longitude: f64,
    /// Speed over ground in knots
    #[serde(rename = "SOG")]
    pub speed_over_ground: f64,
    /// Course over ground in degrees
    #[serde(rename = "COG")]
    pub course_over_ground: f64,

    pub distance_to_nearest_port_nm: f64,
    pub nearest_port: Option<String>,
    pub time_gap_seconds: f64,
    pub is_loitering: bool,
    pub is_dark: bool,
    pub is_anomalous: bool,
}

impl PositionReport {
    /// Build an unannotated report, parsing `base_date_time` on the way in.
    pub fn new(
        mmsi: i64,
        base_date_time: impl Into<String>,
        latitude: f64,
        longitude: f64,
        speed_over_ground: f64,
        course_over_ground: f64,
    ) -> Self {
        let base_date_time = base_date_time.into();
        let timestamp = parse_timestamp(&base_date_time);
        Self {
            vessel_id: VesselId::new(mmsi),
            base_date_time,
            timestamp,
            latitude,
            longitude,
            speed_over_ground,
            course_over_ground,
            distance_to_nearest_port_nm: f64::INFINITY,
            nearest_port: None,
            time_gap_seconds: 0.0,
            is_loitering: false,
            is_dark: false,
            is_anomalous: false,
        }
    }

    pub fn has_valid_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Finite position and course, and a finite non-negative speed.
    pub fn has_valid_fields(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.course_over_ground.is_finite()
            && self.speed_over_ground.is_finite()
            && self.speed_over_ground >= 0.0
    }
}
