use crate::error::SourceError;
use crate::models::Dataset;
use crate::parsing::csv_parser::{parse_ports_csv, parse_positions_csv};
use std::io::Write;
use tempfile::NamedTempFile;

/// Helper to create a temp CSV file
fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

const AIS_HEADER: &str = "MMSI,BaseDateTime,LAT,LON,SOG,COG\n";

#[test]
fn test_parse_positions_basic() {
    let csv = format!(
        "{}367000001,2024-01-01T09:00:00,0.0,1.0,0.5,90.0\n367000002,2024-01-01T09:05:00,10.25,-70.5,12.3,180.0\n",
        AIS_HEADER
    );
    let file = create_temp_csv(&csv);

    let parsed = parse_positions_csv(file.path()).unwrap();
    assert_eq!(parsed.rows.len(), 2);
    assert_eq!(parsed.dropped_rows, 0);

    let first = &parsed.rows[0];
    assert_eq!(first.vessel_id.value(), 367000001);
    assert_eq!(first.base_date_time, "2024-01-01T09:00:00");
    assert!(first.has_valid_timestamp());
    assert_eq!(first.latitude, 0.0);
    assert_eq!(first.longitude, 1.0);
    assert_eq!(first.speed_over_ground, 0.5);
    assert!(first.distance_to_nearest_port_nm.is_infinite());
}

#[test]
fn test_parse_positions_drops_rows_with_missing_fields() {
    let csv = format!(
        "{}1,2024-01-01T09:00:00,0.0,1.0,,90.0\n2,2024-01-01T09:00:00,0.0,1.0,3.0,90.0\n3,,0.0,1.0,3.0,90.0\n",
        AIS_HEADER
    );
    let file = create_temp_csv(&csv);

    let parsed = parse_positions_csv(file.path()).unwrap();
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.dropped_rows, 2);
    assert_eq!(parsed.rows[0].vessel_id.value(), 2);
}

#[test]
fn test_parse_positions_keeps_unparseable_timestamp() {
    let csv = format!("{}5,not-a-date,1.0,1.0,3.0,0.0\n", AIS_HEADER);
    let file = create_temp_csv(&csv);

    let parsed = parse_positions_csv(file.path()).unwrap();
    assert_eq!(parsed.rows.len(), 1);
    assert!(!parsed.rows[0].has_valid_timestamp());
    assert_eq!(parsed.rows[0].base_date_time, "not-a-date");
}

#[test]
fn test_parse_positions_accepts_integral_columns() {
    // Every SOG/COG value is integral, so the reader infers Int64
    let csv = format!(
        "{}7,2024-01-01 09:00:00,45,-120,0,0\n7,2024-01-01 10:00:00,46,-121,12,270\n",
        AIS_HEADER
    );
    let file = create_temp_csv(&csv);

    let parsed = parse_positions_csv(file.path()).unwrap();
    assert_eq!(parsed.rows.len(), 2);
    assert_eq!(parsed.rows[1].speed_over_ground, 12.0);
    assert_eq!(parsed.rows[1].course_over_ground, 270.0);
    assert!(parsed.rows[1].has_valid_timestamp());
}

#[test]
fn test_parse_positions_non_numeric_value_is_dropped() {
    let csv = format!(
        "{}8,2024-01-01T09:00:00,abc,1.0,3.0,0.0\n8,2024-01-01T09:10:00,2.5,1.0,3.0,0.0\n",
        AIS_HEADER
    );
    let file = create_temp_csv(&csv);

    let parsed = parse_positions_csv(file.path()).unwrap();
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.dropped_rows, 1);
    assert_eq!(parsed.rows[0].latitude, 2.5);
}

#[test]
fn test_parse_positions_missing_columns() {
    let file = create_temp_csv("MMSI,BaseDateTime,LAT,LON\n1,2024-01-01T09:00:00,0.0,1.0\n");

    let err = parse_positions_csv(file.path()).unwrap_err();
    assert_eq!(
        err,
        SourceError::SchemaMismatch {
            dataset: Dataset::Positions,
            missing_columns: vec!["SOG".to_string(), "COG".to_string()],
        }
    );
}

#[test]
fn test_parse_positions_missing_file() {
    let err = parse_positions_csv(std::path::Path::new("/no/such/AIS.csv")).unwrap_err();
    assert!(matches!(
        err,
        SourceError::Unavailable {
            dataset: Dataset::Positions,
            ..
        }
    ));
}

#[test]
fn test_parse_positions_empty_file_is_an_error() {
    let file = create_temp_csv("");
    assert!(parse_positions_csv(file.path()).is_err());
}

#[test]
fn test_parse_ports_canonical_columns() {
    let file = create_temp_csv("PORT_NAME,LATITUDE,LONGITUDE\nRotterdam,51.95,4.14\nSingapore,1.26,103.84\n");

    let parsed = parse_ports_csv(file.path()).unwrap();
    assert_eq!(parsed.rows.len(), 2);
    assert_eq!(parsed.rows[0].name, "Rotterdam");
    assert_eq!(parsed.rows[1].longitude, 103.84);
}

#[test]
fn test_parse_ports_alias_columns() {
    let file = create_temp_csv("name,lat,lon\nA,0.0,0.0\n");
    let parsed = parse_ports_csv(file.path()).unwrap();
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.rows[0].name, "A");

    let file = create_temp_csv("Port,Lat,Lng\nB,10.0,20.0\n");
    let parsed = parse_ports_csv(file.path()).unwrap();
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.rows[0].latitude, 10.0);
    assert_eq!(parsed.rows[0].longitude, 20.0);
}

#[test]
fn test_parse_ports_drops_incomplete_and_out_of_range_rows() {
    let file = create_temp_csv(
        "PORT_NAME,LATITUDE,LONGITUDE\nGood,1.0,1.0\n,2.0,2.0\nNoLat,,3.0\nNorth,95.0,0.0\nEast,0.0,190.0\n",
    );

    let parsed = parse_ports_csv(file.path()).unwrap();
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.dropped_rows, 4);
    assert_eq!(parsed.rows[0].name, "Good");
}

#[test]
fn test_parse_ports_missing_columns_lists_canonical_names() {
    let file = create_temp_csv("city,lat\nX,1.0\n");

    match parse_ports_csv(file.path()).unwrap_err() {
        SourceError::SchemaMismatch {
            dataset,
            missing_columns,
        } => {
            assert_eq!(dataset, Dataset::Ports);
            assert_eq!(
                missing_columns,
                vec!["PORT_NAME".to_string(), "LONGITUDE".to_string()]
            );
        }
        other => panic!("Expected schema mismatch, got {:?}", other),
    }
}
