//! Tests for raw CSV reading

use super::write_csv;
use crate::Error;
use crate::app::services::dataset_loader::reader::read_raw_table;
use std::path::Path;

#[test]
fn reads_headers_and_rows() {
    let file = write_csv("Date,City,AQI\n2020-01-01,Delhi,310\n2020-01-02,Delhi,295\n");
    let raw = read_raw_table(file.path()).unwrap();

    assert_eq!(raw.headers, vec!["Date", "City", "AQI"]);
    assert_eq!(raw.rows.len(), 2);
    assert_eq!(raw.cell(0, 2), Some("310"));
}

#[test]
fn tolerates_ragged_rows() {
    let file = write_csv("Date,City,AQI\n2020-01-01,Delhi\n2020-01-02,Delhi,295,extra\n");
    let raw = read_raw_table(file.path()).unwrap();

    assert_eq!(raw.rows.len(), 2);
    assert_eq!(raw.cell(0, 2), None);
    assert_eq!(raw.cell(1, 2), Some("295"));
}

#[test]
fn missing_file_is_dataset_missing() {
    let result = read_raw_table(Path::new("/nonexistent/aqi/city_day.csv"));
    assert!(matches!(result, Err(Error::DatasetMissing { .. })));
}
