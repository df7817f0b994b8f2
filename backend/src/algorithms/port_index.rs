//! Nearest-port spatial index.
//!
//! Ports are bulk-loaded into an R-tree once per run. Two distance modes are
//! supported:
//!
//! - [`DistanceMode::Planar`] (default): latitude/longitude are treated as a
//!   flat 2-D plane and the Euclidean distance in degrees is scaled by 60 nm
//!   per degree. Exact along meridians and near the equator; overstates the
//!   east-west component by `1 / cos(latitude)` elsewhere.
//! - [`DistanceMode::GreatCircle`]: ports are stored as unit vectors on the
//!   sphere. Chord length is monotonic in central angle, so the nearest chord
//!   neighbor is also the nearest great-circle neighbor; the chord is then
//!   converted to an arc length in nautical miles.

use rstar::primitives::GeomWithData;
use rstar::{PointDistance, RTree};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::Port;

/// Nautical miles per degree of arc (one nautical mile per arc minute).
pub const NM_PER_DEGREE: f64 = 60.0;

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// How distances between coordinates are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMode {
    /// Flat lat/lon plane scaled by [`NM_PER_DEGREE`]
    #[default]
    Planar,
    /// Great-circle distance on a spherical Earth
    GreatCircle,
}

impl DistanceMode {
    /// Distance in nautical miles between two coordinates under this mode.
    pub fn distance_nm(self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        match self {
            DistanceMode::Planar => planar_distance_nm(lat1, lon1, lat2, lon2),
            DistanceMode::GreatCircle => great_circle_distance_nm(lat1, lon1, lat2, lon2),
        }
    }
}

impl fmt::Display for DistanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMode::Planar => write!(f, "planar"),
            DistanceMode::GreatCircle => write!(f, "great_circle"),
        }
    }
}

impl FromStr for DistanceMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planar" | "approximate" => Ok(DistanceMode::Planar),
            "great_circle" | "great-circle" | "geodesic" | "haversine" => {
                Ok(DistanceMode::GreatCircle)
            }
            other => Err(ConfigError::invalid(
                "distance_mode",
                format!("unsupported mode '{}'. Use planar or great_circle.", other),
            )),
        }
    }
}

/// Flat-plane distance in nautical miles.
pub fn planar_distance_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    (lat2 - lat1).hypot(lon2 - lon1) * NM_PER_DEGREE
}

/// Great-circle (haversine) distance in nautical miles.
pub fn great_circle_distance_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    EARTH_RADIUS_NM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

fn unit_vector(lat: f64, lon: f64) -> [f64; 3] {
    let (lat, lon) = (lat.to_radians(), lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

fn chord_to_nm(chord: f64) -> f64 {
    // Clamp guards asin against rounding just above the antipodal chord of 2.
    2.0 * (chord / 2.0).min(1.0).asin() * EARTH_RADIUS_NM
}

type PlanarEntry = GeomWithData<[f64; 2], usize>;
type SphereEntry = GeomWithData<[f64; 3], usize>;

enum SpatialTree {
    Planar(RTree<PlanarEntry>),
    GreatCircle(RTree<SphereEntry>),
}

/// Result of a nearest-port query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPort<'a> {
    pub port: &'a Port,
    pub distance_nm: f64,
}

/// Immutable nearest-neighbor index over a port registry.
pub struct PortIndex {
    ports: Vec<Port>,
    tree: SpatialTree,
    mode: DistanceMode,
}

impl PortIndex {
    /// Build a planar index (the default approximation).
    pub fn build(ports: Vec<Port>) -> Self {
        Self::build_with_mode(ports, DistanceMode::Planar)
    }

    /// Build an index measuring distances with `mode`.
    ///
    /// An empty registry produces an index whose queries all return `+∞`.
    pub fn build_with_mode(ports: Vec<Port>, mode: DistanceMode) -> Self {
        let tree = match mode {
            DistanceMode::Planar => SpatialTree::Planar(RTree::bulk_load(
                ports
                    .iter()
                    .enumerate()
                    .map(|(i, p)| PlanarEntry::new([p.latitude, p.longitude], i))
                    .collect(),
            )),
            DistanceMode::GreatCircle => SpatialTree::GreatCircle(RTree::bulk_load(
                ports
                    .iter()
                    .enumerate()
                    .map(|(i, p)| SphereEntry::new(unit_vector(p.latitude, p.longitude), i))
                    .collect(),
            )),
        };

        Self { ports, tree, mode }
    }

    pub fn mode(&self) -> DistanceMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Nearest port to the query point, or `None` when the registry is empty
    /// or the query coordinates are not finite.
    pub fn nearest(&self, lat: f64, lon: f64) -> Option<NearestPort<'_>> {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }

        match &self.tree {
            SpatialTree::Planar(tree) => {
                let query = [lat, lon];
                tree.nearest_neighbor(&query).map(|entry| NearestPort {
                    port: &self.ports[entry.data],
                    distance_nm: entry.distance_2(&query).sqrt() * NM_PER_DEGREE,
                })
            }
            SpatialTree::GreatCircle(tree) => {
                let query = unit_vector(lat, lon);
                tree.nearest_neighbor(&query).map(|entry| NearestPort {
                    port: &self.ports[entry.data],
                    distance_nm: chord_to_nm(entry.distance_2(&query).sqrt()),
                })
            }
        }
    }

    /// Distance in nautical miles to the nearest port, `+∞` if there is none.
    pub fn nearest_distance_nm(&self, lat: f64, lon: f64) -> f64 {
        self.nearest(lat, lon)
            .map(|nearest| nearest.distance_nm)
            .unwrap_or(f64::INFINITY)
    }
}

impl fmt::Debug for PortIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortIndex")
            .field("ports", &self.ports.len())
            .field("mode", &self.mode)
            .finish()
    }
}
