//! Anomaly-detection algorithms.
//!
//! This module holds the analytical core of the engine: the nearest-port
//! spatial index, the two independent detectors and the aggregation policy.
//!
//! # Components
//!
//! - [`port_index`]: R-tree nearest-port distance (planar or great-circle)
//! - [`loitering`]: slow vessels far from any port
//! - [`temporal_gaps`]: per-vessel reporting gaps ("going dark")
//! - [`aggregation`]: combined anomaly flag and latest anomaly per vessel
//!
//! # Example
//!
//! ```
//! use manta_rust::algorithms::{LoiteringDetector, PortIndex};
//! use manta_rust::models::{Port, PositionReport};
//!
//! let index = PortIndex::build(vec![Port::new("A", 0.0, 0.0)]);
//! let report = PositionReport::new(42, "2024-01-01T09:00:00", 0.0, 1.0, 0.5, 0.0);
//! assert!(LoiteringDetector::new(1.0, 50.0).is_loitering(&report, &index));
//! ```

pub mod aggregation;
pub mod loitering;
pub mod port_index;
pub mod temporal_gaps;

pub use aggregation::{apply_combined_flags, combine, latest_anomalies_per_vessel};
pub use loitering::{LoiteringDetector, LoiteringOutcome};
pub use port_index::{
    great_circle_distance_nm, planar_distance_nm, DistanceMode, NearestPort, PortIndex,
    EARTH_RADIUS_NM, NM_PER_DEGREE,
};
pub use temporal_gaps::{group_by_vessel, GapOutcome, TemporalGapAnalyzer};
