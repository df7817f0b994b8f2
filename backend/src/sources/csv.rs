use std::path::{Path, PathBuf};

use super::DataSource;
use crate::config::SourceSettings;
use crate::error::{SourceError, SourceResult};
use crate::models::{Dataset, Port, PositionReport};
use crate::parsing::{parse_ports_csv, parse_positions_csv, ParsedRows};

/// Reads both collections from CSV files on every load.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvDataSource {
    positions_path: Option<PathBuf>,
    ports_path: Option<PathBuf>,
}

impl CsvDataSource {
    pub fn new(positions_path: impl Into<PathBuf>, ports_path: impl Into<PathBuf>) -> Self {
        Self {
            positions_path: Some(positions_path.into()),
            ports_path: Some(ports_path.into()),
        }
    }

    /// Build from configuration. An unset path makes that collection unavailable.
    pub fn from_settings(settings: &SourceSettings) -> Self {
        Self {
            positions_path: settings.positions_path.clone(),
            ports_path: settings.ports_path.clone(),
        }
    }

    pub fn positions_path(&self) -> Option<&Path> {
        self.positions_path.as_deref()
    }

    pub fn ports_path(&self) -> Option<&Path> {
        self.ports_path.as_deref()
    }
}

fn configured(path: Option<&Path>, dataset: Dataset) -> SourceResult<&Path> {
    path.ok_or_else(|| SourceError::unavailable(dataset, "no file configured"))
}

impl DataSource for CsvDataSource {
    fn load_reports(&self) -> SourceResult<ParsedRows<PositionReport>> {
        parse_positions_csv(configured(self.positions_path(), Dataset::Positions)?)
    }

    fn load_ports(&self) -> SourceResult<ParsedRows<Port>> {
        parse_ports_csv(configured(self.ports_path(), Dataset::Ports)?)
    }

    fn describe(&self) -> String {
        let show = |p: Option<&Path>| {
            p.map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unset>".to_string())
        };
        format!(
            "csv(positions={}, ports={})",
            show(self.positions_path()),
            show(self.ports_path())
        )
    }
}
