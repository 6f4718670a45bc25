//! Daily and monthly aggregation of prepared measurements
//!
//! Both aggregations are pure functions over a prepared table: the daily
//! series takes the mean per calendar date, the monthly series the mean per
//! (year, month) dated the 1st of the month. Neither synthesizes dates for
//! calendar gaps; the forecast engine regularizes onto a gap-free grid
//! itself.

use crate::app::models::{DailySeries, MonthlySeries, PreparedTable, SeriesPoint};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Mean AQI per calendar date, strictly increasing unique dates
pub fn daily(prepared: &PreparedTable) -> DailySeries {
    let mut groups: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for record in &prepared.records {
        let entry = groups.entry(record.date).or_insert((0.0, 0));
        entry.0 += record.aqi;
        entry.1 += 1;
    }

    DailySeries {
        points: groups
            .into_iter()
            .map(|(date, (sum, count))| SeriesPoint {
                date,
                aqi: sum / count as f64,
            })
            .collect(),
    }
}

/// Mean AQI per (year, month), dated the 1st, sorted ascending
pub fn monthly(prepared: &PreparedTable) -> MonthlySeries {
    let mut groups: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for record in &prepared.records {
        let key = (record.date.year(), record.date.month());
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += record.aqi;
        entry.1 += 1;
    }

    MonthlySeries {
        points: groups
            .into_iter()
            .map(|((year, month), (sum, count))| SeriesPoint {
                // The 1st of any present (year, month) always exists
                date: NaiveDate::from_ymd_opt(year, month, 1).expect("valid month start"),
                aqi: sum / count as f64,
            })
            .collect(),
    }
}
