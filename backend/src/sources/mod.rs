//! Input seams for the analysis pipeline.
//!
//! A [`DataSource`] yields the two collections a run needs: position
//! reports and the port registry. Each load is independent, so one failing
//! collection never hides the other.
//!
//! - [`CsvDataSource`]: AIS and port CSV files on disk
//! - [`InMemorySource`]: collections held in memory (tests, embedding)

pub mod csv;
pub mod memory;

pub use csv::CsvDataSource;
pub use memory::InMemorySource;

use crate::error::SourceResult;
use crate::models::{Port, PositionReport};
use crate::parsing::ParsedRows;

/// Provider of the input collections for one analysis run.
///
/// Loads are blocking; async callers should run them on a blocking thread.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single source can be shared
/// by the HTTP state and reload tasks.
pub trait DataSource: Send + Sync {
    /// Load every position report, with the number of rows dropped while cleaning.
    fn load_reports(&self) -> SourceResult<ParsedRows<PositionReport>>;

    /// Load the port registry, with the number of rows dropped while cleaning.
    fn load_ports(&self) -> SourceResult<ParsedRows<Port>>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}
