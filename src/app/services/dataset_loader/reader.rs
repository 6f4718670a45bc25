//! Raw CSV reading
//!
//! Reads a tabular CSV into headers and string cells without interpreting
//! any column. Ragged rows are tolerated; short rows are padded downstream
//! by indexing with `get`.

use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Uninterpreted tabular data: one header row plus string cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Cell at (row, column), `None` when the row is short
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }
}

/// Read a CSV file into a [`RawTable`].
///
/// Fails with [`Error::DatasetMissing`] when the file does not exist, and
/// with an I/O or CSV error otherwise.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(Error::dataset_missing(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            Error::csv_parsing(format!("failed to open {}", path.display()), Some(e))
        })?;

    let headers = reader
        .headers()
        .map_err(|e| Error::csv_parsing("failed to read header row", Some(e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| Error::csv_parsing("failed to read data row", Some(e)))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    debug!(
        "Read {} columns x {} rows from {}",
        headers.len(),
        rows.len(),
        path.display()
    );

    Ok(RawTable { headers, rows })
}
