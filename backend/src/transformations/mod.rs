//! Dataset preparation stages applied before the detectors run.
//!
//! Validation always runs; row limiting and the activity filter are
//! optional. None of them changes the derived fields of the reports they keep.
//!
//! # Modules
//!
//! - [`validation`]: drop rows outside the data model, whatever their source
//! - [`sampling`]: deterministic row limiting
//! - [`activity`]: drop vessels whose position barely varies

pub mod activity;
pub mod sampling;
pub mod validation;

pub use activity::{ActivityFilter, ActivityFilterOutcome};
pub use sampling::limit_rows;
pub use validation::{retain_valid_ports, retain_valid_reports, ValidatedRows};
