//! Engine configuration: TOML file support plus environment overrides.
//!
//! Resolution order, later steps winning:
//!
//! 1. Built-in defaults
//! 2. `manta.toml` (path from `MANTA_CONFIG`, else the first file found in the
//!    standard locations)
//! 3. `MANTA_*` environment variables, one per option
//!
//! ```toml
//! [analysis]
//! speed_threshold_knots = 1.0
//! distance_threshold_nm = 50.0
//! time_gap_threshold_seconds = 3600.0
//! distance_mode = "planar"          # or "great_circle"
//! min_position_std_deg = 0.001      # optional activity pre-filter
//!
//! [sources]
//! positions_path = "data/AIS_2024_01_01.csv"
//! ports_path = "data/ports.csv"
//! max_reports = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithms::DistanceMode;
use crate::error::ConfigError;

pub const ENV_CONFIG_PATH: &str = "MANTA_CONFIG";
pub const ENV_SPEED_THRESHOLD: &str = "MANTA_SPEED_THRESHOLD_KNOTS";
pub const ENV_DISTANCE_THRESHOLD: &str = "MANTA_DISTANCE_THRESHOLD_NM";
pub const ENV_TIME_GAP_THRESHOLD: &str = "MANTA_TIME_GAP_THRESHOLD_SECONDS";
pub const ENV_DISTANCE_MODE: &str = "MANTA_DISTANCE_MODE";
pub const ENV_MIN_POSITION_STD: &str = "MANTA_MIN_POSITION_STD_DEG";
pub const ENV_POSITIONS_CSV: &str = "MANTA_POSITIONS_CSV";
pub const ENV_PORTS_CSV: &str = "MANTA_PORTS_CSV";
pub const ENV_MAX_REPORTS: &str = "MANTA_MAX_REPORTS";

/// Detector thresholds and distance policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Speed over ground below which a vessel counts as stationary
    pub speed_threshold_knots: f64,
    /// Distance from the nearest port beyond which stationarity is suspicious
    pub distance_threshold_nm: f64,
    /// Longest expected silence between two reports of the same vessel
    pub time_gap_threshold_seconds: f64,
    pub distance_mode: DistanceMode,
    /// Activity pre-filter threshold; `None` disables the filter
    pub min_position_std_deg: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            speed_threshold_knots: 1.0,
            distance_threshold_nm: 50.0,
            time_gap_threshold_seconds: 3600.0,
            distance_mode: DistanceMode::Planar,
            min_position_std_deg: None,
        }
    }
}

impl AnalysisConfig {
    /// Reject thresholds that would make a run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("speed_threshold_knots", self.speed_threshold_knots)?;
        check_non_negative("distance_threshold_nm", self.distance_threshold_nm)?;
        check_non_negative("time_gap_threshold_seconds", self.time_gap_threshold_seconds)?;
        if let Some(std) = self.min_position_std_deg {
            check_non_negative("min_position_std_deg", std)?;
        }
        Ok(())
    }
}

fn check_non_negative(key: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::invalid(
            key,
            format!("must be a finite, non-negative number (got {})", value),
        ));
    }
    Ok(())
}

/// Where the two input collections come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// AIS position CSV (`MMSI, BaseDateTime, LAT, LON, SOG, COG`)
    pub positions_path: Option<PathBuf>,
    /// Port registry CSV (`PORT_NAME, LATITUDE, LONGITUDE`)
    pub ports_path: Option<PathBuf>,
    /// Row limit applied after cleaning; `None` keeps every row
    pub max_reports: Option<usize>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            positions_path: Some(PathBuf::from("AIS_2024_01_01.csv")),
            ports_path: Some(PathBuf::from("ports.csv")),
            max_reports: None,
        }
    }
}

impl SourceSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_reports == Some(0) {
            return Err(ConfigError::invalid("max_reports", "must be at least 1"));
        }
        Ok(())
    }
}

/// Complete configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MantaConfig {
    pub analysis: AnalysisConfig,
    pub sources: SourceSettings,
}

impl MantaConfig {
    /// Parse configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from the first `manta.toml` found in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from("manta.toml"),
            PathBuf::from("backend/manta.toml"),
            PathBuf::from("../manta.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Resolve the effective configuration: file, then environment, then validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(ENV_CONFIG_PATH) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?.unwrap_or_default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        self.sources.validate()
    }

    /// Override individual options from `MANTA_*` environment variables.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Override individual options through `lookup`, which maps a variable
    /// name to its value. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_SPEED_THRESHOLD) {
            self.analysis.speed_threshold_knots = parse_value(ENV_SPEED_THRESHOLD, &v)?;
        }
        if let Some(v) = get(ENV_DISTANCE_THRESHOLD) {
            self.analysis.distance_threshold_nm = parse_value(ENV_DISTANCE_THRESHOLD, &v)?;
        }
        if let Some(v) = get(ENV_TIME_GAP_THRESHOLD) {
            self.analysis.time_gap_threshold_seconds = parse_value(ENV_TIME_GAP_THRESHOLD, &v)?;
        }
        if let Some(v) = get(ENV_DISTANCE_MODE) {
            self.analysis.distance_mode = v.parse()?;
        }
        if let Some(v) = get(ENV_MIN_POSITION_STD) {
            self.analysis.min_position_std_deg = match v.trim().to_lowercase().as_str() {
                "off" | "none" | "disabled" => None,
                _ => Some(parse_value(ENV_MIN_POSITION_STD, &v)?),
            };
        }
        if let Some(v) = get(ENV_POSITIONS_CSV) {
            self.sources.positions_path = Some(PathBuf::from(v));
        }
        if let Some(v) = get(ENV_PORTS_CSV) {
            self.sources.ports_path = Some(PathBuf::from(v));
        }
        if let Some(v) = get(ENV_MAX_REPORTS) {
            self.sources.max_reports = match v.trim().to_lowercase().as_str() {
                "all" | "none" | "unlimited" => None,
                _ => Some(parse_value(ENV_MAX_REPORTS, &v)?),
            };
        }

        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(key, format!("'{}': {}", raw, e)))
}
