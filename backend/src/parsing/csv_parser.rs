use polars::prelude::*;
use std::path::Path;
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::models::{Dataset, Port, PositionReport};

/// Required AIS columns, in the order they are read.
pub const POSITION_COLUMNS: [&str; 6] = ["MMSI", "BaseDateTime", "LAT", "LON", "SOG", "COG"];

/// Canonical port columns and the header names accepted for each.
/// Matching is exact first, then case-insensitive.
pub const PORT_COLUMN_ALIASES: [(&str, &[&str]); 3] = [
    ("PORT_NAME", &["PORT_NAME", "name", "port"]),
    ("LATITUDE", &["LATITUDE", "lat"]),
    ("LONGITUDE", &["LONGITUDE", "lon", "lng"]),
];

/// Rows that survived cleaning plus the number that did not.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRows<T> {
    pub rows: Vec<T>,
    pub dropped_rows: usize,
}

/// Parse an AIS position file into unannotated reports.
///
/// Rows with a missing or non-numeric required field are dropped.
/// `BaseDateTime` is kept verbatim even when it cannot be parsed.
pub fn parse_positions_csv(path: &Path) -> SourceResult<ParsedRows<PositionReport>> {
    let dataset = Dataset::Positions;
    let df = read_frame(path, dataset)?;
    let columns = resolve_columns(
        &df,
        dataset,
        POSITION_COLUMNS
            .iter()
            .map(|c| (*c, std::slice::from_ref(c))),
    )?;

    let mmsi = int_column(&df, &columns[0], dataset)?;
    let times = str_column(&df, &columns[1], dataset)?;
    let lat = float_column(&df, &columns[2], dataset)?;
    let lon = float_column(&df, &columns[3], dataset)?;
    let sog = float_column(&df, &columns[4], dataset)?;
    let cog = float_column(&df, &columns[5], dataset)?;

    let finite = |v: Option<f64>| v.filter(|x| x.is_finite());

    let mut rows = Vec::with_capacity(df.height());
    let mut dropped_rows = 0;

    for i in 0..df.height() {
        match (
            mmsi.get(i),
            times.get(i),
            finite(lat.get(i)),
            finite(lon.get(i)),
            finite(sog.get(i)),
            finite(cog.get(i)),
        ) {
            (Some(mmsi), Some(time), Some(lat), Some(lon), Some(sog), Some(cog)) => {
                rows.push(PositionReport::new(mmsi, time.trim(), lat, lon, sog, cog));
            }
            _ => dropped_rows += 1,
        }
    }

    debug!(
        path = %path.display(),
        kept = rows.len(),
        dropped = dropped_rows,
        "Parsed position reports"
    );

    Ok(ParsedRows { rows, dropped_rows })
}

/// Parse a port registry file.
///
/// Rows with a missing name, missing coordinates, or coordinates outside
/// `[-90, 90] x [-180, 180]` are dropped.
pub fn parse_ports_csv(path: &Path) -> SourceResult<ParsedRows<Port>> {
    let dataset = Dataset::Ports;
    let df = read_frame(path, dataset)?;
    let columns = resolve_columns(
        &df,
        dataset,
        PORT_COLUMN_ALIASES
            .iter()
            .map(|(name, aliases)| (*name, *aliases)),
    )?;

    let names = str_column(&df, &columns[0], dataset)?;
    let lat = float_column(&df, &columns[1], dataset)?;
    let lon = float_column(&df, &columns[2], dataset)?;

    let mut rows = Vec::with_capacity(df.height());
    let mut dropped_rows = 0;

    for i in 0..df.height() {
        let name = names.get(i).map(str::trim).filter(|n| !n.is_empty());
        let port = match (name, lat.get(i), lon.get(i)) {
            (Some(name), Some(lat), Some(lon)) => Some(Port::new(name, lat, lon)),
            _ => None,
        };

        match port.filter(Port::has_valid_coordinates) {
            Some(port) => rows.push(port),
            None => dropped_rows += 1,
        }
    }

    debug!(
        path = %path.display(),
        kept = rows.len(),
        dropped = dropped_rows,
        "Parsed port registry"
    );

    Ok(ParsedRows { rows, dropped_rows })
}

fn read_frame(path: &Path, dataset: Dataset) -> SourceResult<DataFrame> {
    if !path.exists() {
        return Err(SourceError::unavailable(
            dataset,
            format!("{} does not exist", path.display()),
        ));
    }

    // Infer over the whole file: AIS columns often look integral for the
    // first few hundred rows.
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.into()))
        .and_then(|reader| reader.finish())
        .map_err(|e| SourceError::unavailable(dataset, format!("{}: {}", path.display(), e)))
}

/// Map each wanted column to the header actually present in `df`.
fn resolve_columns<'a>(
    df: &DataFrame,
    dataset: Dataset,
    wanted: impl IntoIterator<Item = (&'a str, &'a [&'a str])>,
) -> SourceResult<Vec<String>> {
    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut resolved = Vec::new();
    let mut missing_columns = Vec::new();

    for (canonical, aliases) in wanted {
        match resolve_column(&available, aliases) {
            Some(name) => resolved.push(name),
            None => missing_columns.push(canonical.to_string()),
        }
    }

    if !missing_columns.is_empty() {
        return Err(SourceError::SchemaMismatch {
            dataset,
            missing_columns,
        });
    }

    Ok(resolved)
}

fn resolve_column(available: &[String], aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|alias| available.iter().find(|c| c.as_str() == *alias))
        .or_else(|| {
            aliases
                .iter()
                .find_map(|alias| available.iter().find(|c| c.trim().eq_ignore_ascii_case(alias)))
        })
        .cloned()
}

fn polars_error(dataset: Dataset, err: PolarsError) -> SourceError {
    SourceError::unavailable(dataset, err.to_string())
}

fn float_column(df: &DataFrame, name: &str, dataset: Dataset) -> SourceResult<Float64Chunked> {
    df.column(name)
        .and_then(|c| c.cast(&DataType::Float64))
        .and_then(|c| c.f64().cloned())
        .map_err(|e| polars_error(dataset, e))
}

fn int_column(df: &DataFrame, name: &str, dataset: Dataset) -> SourceResult<Int64Chunked> {
    df.column(name)
        .and_then(|c| c.cast(&DataType::Int64))
        .and_then(|c| c.i64().cloned())
        .map_err(|e| polars_error(dataset, e))
}

fn str_column(df: &DataFrame, name: &str, dataset: Dataset) -> SourceResult<StringChunked> {
    df.column(name)
        .and_then(|c| c.cast(&DataType::String))
        .and_then(|c| c.str().cloned())
        .map_err(|e| polars_error(dataset, e))
}
