//! Tests for the dataset loader
//!
//! Covers raw reading, column-role detection, normalization semantics and
//! the initialize-once cache.

pub mod columns_tests;
pub mod reader_tests;

use crate::app::services::dataset_loader::reader::RawTable;
use std::io::Write;
use tempfile::NamedTempFile;

/// Build a raw table from string literals
pub fn make_raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    }
}

/// A small city_day-style raw table covering two cities
pub fn city_day_raw() -> RawTable {
    make_raw(
        &["Date", "City", "AQI", "AQI_Bucket"],
        &[
            &["2020-01-01", "Delhi", "310.5", "Very Poor"],
            &["2020-01-02", "Delhi", "295.0", "Poor"],
            &["2020-01-01", "Chennai", "82.0", "Satisfactory"],
            &["2020-01-02", "Chennai", "", ""],
        ],
    )
}

/// Write a CSV file usable by the reader and cache tests
pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}
