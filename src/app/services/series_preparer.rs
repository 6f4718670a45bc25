//! Series preparation: city filtering, gap-filling and deduplication
//!
//! Turns the canonical table into a per-request prepared table with every
//! AQI present. Missing values are filled per city group by carrying the
//! most recent prior value forward, then remaining leading gaps backward
//! from the next available value; anything still missing (a city with no
//! valid readings at all) takes the mean over the whole filtered table.
//! Duplicates per (city, date) keep their first occurrence in canonical
//! order, and the output is sorted ascending by date.

use crate::app::models::{CanonicalTable, CityFilter, MeasurementRecord, PreparedRecord, PreparedTable};
use crate::{Error, Result};
use std::collections::HashSet;
use tracing::debug;

/// Counters describing one preparation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareStats {
    pub input_rows: usize,
    pub filtered_rows: usize,
    pub forward_filled: usize,
    pub backward_filled: usize,
    pub mean_filled: usize,
    pub duplicates_dropped: usize,
    pub output_rows: usize,
}

/// A prepared table together with its preparation statistics.
#[derive(Debug, Clone)]
pub struct PrepareOutcome {
    pub table: PreparedTable,
    pub stats: PrepareStats,
}

/// Filter, gap-fill and deduplicate the canonical table.
///
/// Fails with [`Error::NoDataForCity`] when the filter matches no rows, or
/// when the filtered table contains no usable AQI value to fill from.
pub fn prepare(table: &CanonicalTable, filter: &CityFilter) -> Result<PrepareOutcome> {
    let mut stats = PrepareStats {
        input_rows: table.records.len(),
        ..Default::default()
    };

    // Canonical order is (city, date), so each city forms one contiguous run.
    let mut rows: Vec<MeasurementRecord> = table
        .records
        .iter()
        .filter(|r| filter.matches(&r.city))
        .cloned()
        .collect();

    if rows.is_empty() {
        return Err(Error::no_data_for_city(filter.label()));
    }
    stats.filtered_rows = rows.len();

    forward_fill(&mut rows, &mut stats);
    backward_fill(&mut rows, &mut stats);
    mean_fill(&mut rows, &mut stats, filter)?;

    // Keep the first occurrence per (city, date) in canonical order
    let mut seen: HashSet<(String, chrono::NaiveDate)> = HashSet::new();
    let before = rows.len();
    rows.retain(|r| seen.insert((r.city.clone(), r.date)));
    stats.duplicates_dropped = before - rows.len();

    // Date is the only remaining sort key; the sort is stable so canonical
    // order survives within a date.
    rows.sort_by_key(|r| r.date);

    let records: Vec<PreparedRecord> = rows
        .into_iter()
        .map(|r| PreparedRecord {
            date: r.date,
            city: r.city,
            // mean_fill guarantees every AQI is present
            aqi: r.aqi.unwrap_or_default(),
        })
        .collect();

    stats.output_rows = records.len();
    debug!(
        "Prepared {} rows for '{}' ({} ffill, {} bfill, {} mean, {} duplicates dropped)",
        stats.output_rows,
        filter.label(),
        stats.forward_filled,
        stats.backward_filled,
        stats.mean_filled,
        stats.duplicates_dropped
    );

    Ok(PrepareOutcome {
        table: PreparedTable {
            records,
            city_label: filter.label(),
        },
        stats,
    })
}

/// Carry the most recent prior in-city value into missing cells
fn forward_fill(rows: &mut [MeasurementRecord], stats: &mut PrepareStats) {
    let mut current_city: Option<String> = None;
    let mut last_value: Option<f64> = None;

    for row in rows.iter_mut() {
        if current_city.as_deref() != Some(row.city.as_str()) {
            current_city = Some(row.city.clone());
            last_value = None;
        }
        match row.aqi {
            Some(value) => last_value = Some(value),
            None => {
                if let Some(value) = last_value {
                    row.aqi = Some(value);
                    stats.forward_filled += 1;
                }
            }
        }
    }
}

/// Fill remaining leading gaps from the next available in-city value
fn backward_fill(rows: &mut [MeasurementRecord], stats: &mut PrepareStats) {
    let mut current_city: Option<String> = None;
    let mut next_value: Option<f64> = None;

    for row in rows.iter_mut().rev() {
        if current_city.as_deref() != Some(row.city.as_str()) {
            current_city = Some(row.city.clone());
            next_value = None;
        }
        match row.aqi {
            Some(value) => next_value = Some(value),
            None => {
                if let Some(value) = next_value {
                    row.aqi = Some(value);
                    stats.backward_filled += 1;
                }
            }
        }
    }
}

/// Fill anything still missing with the mean over the filtered table
fn mean_fill(
    rows: &mut [MeasurementRecord],
    stats: &mut PrepareStats,
    filter: &CityFilter,
) -> Result<()> {
    let present: Vec<f64> = rows.iter().filter_map(|r| r.aqi).collect();
    if present.is_empty() {
        return Err(Error::no_data_for_city(filter.label()));
    }

    let mean = present.iter().sum::<f64>() / present.len() as f64;
    for row in rows.iter_mut() {
        if row.aqi.is_none() {
            row.aqi = Some(mean);
            stats.mean_filled += 1;
        }
    }
    Ok(())
}
