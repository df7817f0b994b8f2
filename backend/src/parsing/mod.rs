//! Readers for the AIS position file and the port registry.
//!
//! Both readers are tolerant: rows with missing fields are counted and
//! dropped, never fatal. Only a missing or unreadable file, or a header
//! lacking required columns, produces a [`SourceError`](crate::error::SourceError).
//!
//! # Example
//!
//! ```no_run
//! use manta_rust::parsing::parse_ports_csv;
//! use std::path::Path;
//!
//! let parsed = parse_ports_csv(Path::new("ports.csv")).expect("Failed to read ports");
//! println!("{} ports, {} rows dropped", parsed.rows.len(), parsed.dropped_rows);
//! ```

pub mod csv_parser;

#[cfg(test)]
mod csv_parser_tests;

pub use csv_parser::{
    parse_ports_csv, parse_positions_csv, ParsedRows, PORT_COLUMN_ALIASES, POSITION_COLUMNS,
};
