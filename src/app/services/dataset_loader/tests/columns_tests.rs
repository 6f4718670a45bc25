//! Tests for column-role detection

use super::make_raw;
use crate::Error;
use crate::app::services::dataset_loader::columns::ColumnRoles;

#[test]
fn detects_named_columns() {
    let raw = make_raw(
        &["Date", "City", "AQI", "AQI_Bucket"],
        &[&["2020-01-01", "Delhi", "310", "Very Poor"]],
    );
    let roles = ColumnRoles::detect(&raw, 20).unwrap();

    assert_eq!(roles.date, 0);
    assert_eq!(roles.city, Some(1));
    assert_eq!(roles.aqi, 2);
}

#[test]
fn bucket_column_is_never_the_measure() {
    // AQI_Bucket precedes AQI in column order but must be skipped
    let raw = make_raw(
        &["Date", "AQI_Bucket", "AQI"],
        &[&["2020-01-01", "Poor", "310"]],
    );
    let roles = ColumnRoles::detect(&raw, 20).unwrap();
    assert_eq!(roles.aqi, 2);
}

#[test]
fn first_match_in_column_order_wins() {
    let raw = make_raw(
        &["record_date", "sample_date", "city_name", "aqi_value", "aqi_raw"],
        &[&["2020-01-01", "2020-01-02", "Delhi", "100", "101"]],
    );
    let roles = ColumnRoles::detect(&raw, 20).unwrap();

    assert_eq!(roles.date, 0);
    assert_eq!(roles.city, Some(2));
    assert_eq!(roles.aqi, 3);
}

#[test]
fn date_defaults_to_first_column() {
    let raw = make_raw(&["when", "aqi"], &[&["2020-01-01", "100"]]);
    let roles = ColumnRoles::detect(&raw, 20).unwrap();
    assert_eq!(roles.date, 0);
    assert_eq!(roles.city, None);
}

#[test]
fn numeric_fallback_picks_first_mostly_numeric_column() {
    let raw = make_raw(
        &["Date", "City", "Station", "PM25"],
        &[
            &["2020-01-01", "Delhi", "Anand Vihar", "182.0"],
            &["2020-01-02", "Delhi", "Anand Vihar", "171.5"],
            &["2020-01-03", "Delhi", "Anand Vihar", ""],
        ],
    );
    let roles = ColumnRoles::detect(&raw, 20).unwrap();
    assert_eq!(roles.aqi, 3);
}

#[test]
fn unrecognizable_schema_fails() {
    let raw = make_raw(
        &["Date", "City", "Remarks"],
        &[&["2020-01-01", "Delhi", "hazy"]],
    );
    let result = ColumnRoles::detect(&raw, 20);
    assert!(matches!(result, Err(Error::SchemaNotRecognized { .. })));
}

#[test]
fn empty_table_fails() {
    let raw = make_raw(&[], &[]);
    assert!(ColumnRoles::detect(&raw, 20).is_err());
}
