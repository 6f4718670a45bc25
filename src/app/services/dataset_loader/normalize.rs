//! Pure canonicalization of raw tables
//!
//! Coerces the detected columns into `{date, city, aqi}` records: rows with
//! unparseable dates are dropped, unusable AQI cells become missing values
//! for the series preparer to fill, and the output is stably sorted by
//! (city, date).

use super::columns::ColumnRoles;
use super::reader::RawTable;
use crate::app::models::{CanonicalTable, MeasurementRecord};
use crate::constants::{ALL_CITIES_LABEL, DATE_FORMATS};
use crate::{Error, Result};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;

/// Parse statistics accumulated during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Rows in the raw table
    pub total_rows: usize,
    /// Rows surviving into the canonical table
    pub parsed_rows: usize,
    /// Rows dropped for an unparseable or absent date
    pub dropped_dates: usize,
    /// Surviving rows whose AQI cell was unusable and carried as missing
    pub missing_aqi: usize,
}

/// A canonical table together with its parse statistics.
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    pub table: CanonicalTable,
    pub stats: NormalizeStats,
}

/// Normalize a raw table into the canonical `{date, city, aqi}` schema.
///
/// Fails with [`Error::DatasetUnparseable`] when no row survives.
pub fn normalize(raw: &RawTable, roles: &ColumnRoles) -> Result<NormalizeOutcome> {
    let mut stats = NormalizeStats {
        total_rows: raw.rows.len(),
        ..Default::default()
    };

    let mut records = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        let Some(date) = row.get(roles.date).and_then(|c| parse_date(c)) else {
            stats.dropped_dates += 1;
            continue;
        };

        let city = match roles.city {
            Some(index) => row
                .get(index)
                .map(|c| c.trim().to_string())
                .unwrap_or_default(),
            None => ALL_CITIES_LABEL.to_string(),
        };

        let aqi = row.get(roles.aqi).and_then(|c| parse_aqi(c));
        if aqi.is_none() {
            stats.missing_aqi += 1;
        }

        records.push(MeasurementRecord { date, city, aqi });
    }

    stats.parsed_rows = records.len();
    if records.is_empty() {
        return Err(Error::dataset_unparseable(format!(
            "no usable rows ({} rows dropped for bad dates)",
            stats.dropped_dates
        )));
    }

    // Stable sort preserves source row order within each (city, date) key,
    // which the preparer's keep-first deduplication relies on.
    records.sort_by(|a, b| (&a.city, a.date).cmp(&(&b.city, b.date)));

    let cities: Vec<String> = records
        .iter()
        .filter(|r| !r.city.is_empty())
        .map(|r| r.city.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    debug!(
        "Normalized {} of {} rows ({} bad dates, {} missing AQI cells)",
        stats.parsed_rows, stats.total_rows, stats.dropped_dates, stats.missing_aqi
    );

    Ok(NormalizeOutcome {
        table: CanonicalTable {
            records,
            cities,
            has_city_column: roles.city.is_some(),
        },
        stats,
    })
}

/// Parse a date cell, truncating any time-of-day suffix first
fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    // Datetime cells ("2020-01-01 14:00:00", ISO "T" separator) reduce to
    // their date prefix.
    let date_part = cell
        .split_once(|c| c == ' ' || c == 'T')
        .map(|(prefix, _)| prefix)
        .unwrap_or(cell);

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Parse an AQI cell; unusable values become missing
fn parse_aqi(cell: &str) -> Option<f64> {
    let value = cell.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}
