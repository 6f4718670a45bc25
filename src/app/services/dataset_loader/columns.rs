//! Column-role detection
//!
//! Assigns the date, city and AQI roles to raw columns by case-insensitive
//! header substrings, always taking the first match in column order. The
//! AQI role falls back to sample-based numeric detection when no header
//! matches.

use super::reader::RawTable;
use crate::constants::sniffing;
use crate::{Error, Result};
use tracing::debug;

/// Resolved column indices for the canonical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    /// Date column index
    pub date: usize,
    /// City column index, absent when the source has no city dimension
    pub city: Option<usize>,
    /// AQI measure column index
    pub aqi: usize,
}

impl ColumnRoles {
    /// Detect column roles from headers, sampling up to `sample_size` data
    /// rows when numeric fallback detection is needed.
    ///
    /// Fails with [`Error::SchemaNotRecognized`] when no AQI-like column
    /// can be identified.
    pub fn detect(raw: &RawTable, sample_size: usize) -> Result<Self> {
        if raw.headers.is_empty() {
            return Err(Error::schema_not_recognized("dataset has no columns"));
        }

        let date = find_header(&raw.headers, sniffing::DATE_TOKEN).unwrap_or(0);
        let city = find_header(&raw.headers, sniffing::CITY_TOKEN);

        let aqi = match find_aqi_header(&raw.headers) {
            Some(index) => index,
            None => detect_numeric_column(raw, date, city, sample_size).ok_or_else(|| {
                Error::schema_not_recognized(
                    "no AQI-like header and no numeric measure column found",
                )
            })?,
        };

        let roles = Self { date, city, aqi };
        debug!(
            "Detected column roles: date={:?} city={:?} aqi={:?}",
            raw.headers.get(date),
            city.and_then(|i| raw.headers.get(i)),
            raw.headers.get(aqi),
        );
        Ok(roles)
    }
}

/// First header containing `token`, case-insensitively
fn find_header(headers: &[String], token: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.to_lowercase().contains(token))
}

/// First header containing the AQI token but not the bucket exclusion
fn find_aqi_header(headers: &[String]) -> Option<usize> {
    headers.iter().position(|h| {
        let lower = h.to_lowercase();
        lower.contains(sniffing::AQI_TOKEN) && !lower.contains(sniffing::AQI_EXCLUDE_TOKEN)
    })
}

/// First column (excluding the date/city roles) whose sampled non-empty
/// cells are mostly numeric
fn detect_numeric_column(
    raw: &RawTable,
    date: usize,
    city: Option<usize>,
    sample_size: usize,
) -> Option<usize> {
    let sample = raw.rows.iter().take(sample_size.max(1));
    let sampled: Vec<&Vec<String>> = sample.collect();

    (0..raw.headers.len()).find(|&col| {
        if col == date || Some(col) == city {
            return false;
        }

        let mut non_empty = 0usize;
        let mut numeric = 0usize;
        for row in &sampled {
            let Some(cell) = row.get(col) else { continue };
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            non_empty += 1;
            if cell.parse::<f64>().is_ok() {
                numeric += 1;
            }
        }

        non_empty > 0
            && numeric as f64 / non_empty as f64 >= sniffing::NUMERIC_FRACTION_THRESHOLD
    })
}
