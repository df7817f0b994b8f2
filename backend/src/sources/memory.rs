use parking_lot::RwLock;

use super::DataSource;
use crate::error::{SourceError, SourceResult};
use crate::models::{Port, PositionReport};
use crate::parsing::ParsedRows;

/// Holds both collections in memory.
///
/// Contents can be replaced between loads, and either collection can be
/// made to fail, which is how reload and degradation paths are exercised.
#[derive(Debug)]
pub struct InMemorySource {
    reports: RwLock<SourceResult<Vec<PositionReport>>>,
    ports: RwLock<SourceResult<Vec<Port>>>,
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl InMemorySource {
    pub fn new(reports: Vec<PositionReport>, ports: Vec<Port>) -> Self {
        Self {
            reports: RwLock::new(Ok(reports)),
            ports: RwLock::new(Ok(ports)),
        }
    }

    pub fn set_reports(&self, reports: Vec<PositionReport>) {
        *self.reports.write() = Ok(reports);
    }

    pub fn set_ports(&self, ports: Vec<Port>) {
        *self.ports.write() = Ok(ports);
    }

    /// Make subsequent report loads fail with `err`.
    pub fn fail_reports(&self, err: SourceError) {
        *self.reports.write() = Err(err);
    }

    /// Make subsequent port loads fail with `err`.
    pub fn fail_ports(&self, err: SourceError) {
        *self.ports.write() = Err(err);
    }
}

impl DataSource for InMemorySource {
    fn load_reports(&self) -> SourceResult<ParsedRows<PositionReport>> {
        self.reports.read().clone().map(|rows| ParsedRows {
            rows,
            dropped_rows: 0,
        })
    }

    fn load_ports(&self) -> SourceResult<ParsedRows<Port>> {
        self.ports.read().clone().map(|rows| ParsedRows {
            rows,
            dropped_rows: 0,
        })
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
