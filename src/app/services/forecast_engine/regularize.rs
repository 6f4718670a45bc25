//! Daily series regularization
//!
//! Reindexes a daily series onto the complete calendar grid spanning its
//! min..max date. Dates without an observed mean carry the prior day's
//! value forward; still-missing leading entries fill backward from the
//! first available value.

use crate::app::models::DailySeries;
use crate::{Error, Result};
use chrono::{Days, NaiveDate};
use std::collections::HashMap;

/// A gap-free daily series: one value per calendar day from `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularSeries {
    pub start: NaiveDate,
    pub values: Vec<f64>,
}

impl RegularSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Date of the i-th grid entry
    pub fn date_at(&self, index: usize) -> NaiveDate {
        self.start + Days::new(index as u64)
    }

    /// Date of the final grid entry
    pub fn last_date(&self) -> NaiveDate {
        self.date_at(self.len().saturating_sub(1))
    }
}

/// Regularize a daily series onto its full calendar grid.
///
/// Fails with [`Error::InsufficientData`] when fewer than `min_days`
/// regularized days exist (including an empty input).
pub fn regularize(series: &DailySeries, min_days: usize) -> Result<RegularSeries> {
    if series.is_empty() {
        return Err(Error::insufficient_data(0, min_days));
    }

    let observed: HashMap<NaiveDate, f64> =
        series.points.iter().map(|p| (p.date, p.aqi)).collect();

    let start = series.points.first().expect("non-empty series").date;
    let end = series.points.last().expect("non-empty series").date;
    let total_days = (end - start).num_days() as usize + 1;

    if total_days < min_days {
        return Err(Error::insufficient_data(total_days, min_days));
    }

    let mut values: Vec<Option<f64>> = Vec::with_capacity(total_days);
    let mut carried: Option<f64> = None;
    for offset in 0..total_days {
        let date = start + Days::new(offset as u64);
        match observed.get(&date) {
            Some(&aqi) => {
                carried = Some(aqi);
                values.push(Some(aqi));
            }
            None => values.push(carried),
        }
    }

    // The grid starts at an observed date, so backward filling only matters
    // for callers handing in pre-built partial grids; kept for symmetry with
    // the preparer's fill order.
    let mut next: Option<f64> = None;
    for value in values.iter_mut().rev() {
        match value {
            Some(v) => next = Some(*v),
            None => *value = next,
        }
    }

    Ok(RegularSeries {
        start,
        values: values
            .into_iter()
            .map(|v| v.expect("regularized grid has no remaining gaps"))
            .collect(),
    })
}
