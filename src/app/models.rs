//! Core data structures for AQI analysis and forecasting.
//!
//! Defines the canonical measurement schema, the derived series types
//! produced by each pipeline stage, and presentation payloads. Every
//! derived table is a fresh value owned by its caller; nothing here is
//! mutated in place across pipeline stages.

use crate::constants::ALL_CITIES_LABEL;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One city-day measurement after normalization.
///
/// `aqi` is `None` when the source cell was missing, unparseable, negative
/// or non-finite; the series preparer fills these before aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub date: NaiveDate,
    pub city: String,
    pub aqi: Option<f64>,
}

/// The normalized full dataset: records sorted by (city, date) with stable
/// order, plus the distinct non-blank city labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalTable {
    pub records: Vec<MeasurementRecord>,
    /// Sorted distinct non-blank city labels
    pub cities: Vec<String>,
    /// Whether the source carried a real city column
    pub has_city_column: bool,
}

/// One measurement after gap-filling; the AQI is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedRecord {
    pub date: NaiveDate,
    pub city: String,
    pub aqi: f64,
}

/// Filtered, gap-filled, deduplicated measurements sorted ascending by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedTable {
    pub records: Vec<PreparedRecord>,
    /// Resolved city label ("All Cities" when unfiltered)
    pub city_label: String,
}

/// A single (date, mean AQI) aggregate point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub aqi: f64,
}

/// Mean AQI per calendar date, strictly increasing unique dates.
///
/// Calendar gaps are not synthesized here; the forecast engine regularizes
/// onto a gap-free grid itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub points: Vec<SeriesPoint>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dates formatted as `YYYY-MM-DD` for presentation
    pub fn dates(&self) -> Vec<String> {
        self.points.iter().map(|p| p.date.to_string()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.aqi).collect()
    }
}

/// Mean AQI per (year, month), dated the 1st of the month, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub points: Vec<SeriesPoint>,
}

impl MonthlySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<String> {
        self.points.iter().map(|p| p.date.to_string()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.aqi).collect()
    }
}

/// One forecast step with its 95% confidence band.
///
/// Invariant: `0 <= lower_bound <= aqi <= upper_bound <= 500`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub aqi: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Forecast for consecutive calendar days starting the day after the last
/// historical date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<String> {
        self.points.iter().map(|p| p.date.to_string()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.aqi).collect()
    }

    pub fn lower_bounds(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.lower_bound).collect()
    }

    pub fn upper_bounds(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.upper_bound).collect()
    }
}

/// Historical daily series bundled with its forecast for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub city: String,
    pub historical: DailySeries,
    pub forecast: ForecastSeries,
}

/// Summary statistics over a prepared table's AQI values.
///
/// `std` is the sample standard deviation (n-1 divisor), 0.0 when fewer
/// than two values are present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AqiStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
}

impl AqiStats {
    /// Compute statistics over a non-empty slice of values
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let std = if values.len() > 1 {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };

        Some(Self {
            mean,
            min,
            max,
            std,
        })
    }
}

/// Inclusive date range, `YYYY-MM-DD` at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Payload of the load-data endpoint: prepared-table statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub city: String,
    pub date_range: DateRange,
    pub aqi_stats: AqiStats,
}

/// ARIMA model order (p, d, q).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaOrder {
    /// Autoregressive order
    pub p: usize,
    /// Degree of differencing
    pub d: usize,
    /// Moving-average order
    pub q: usize,
}

impl std::fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.p, self.d, self.q)
    }
}

/// City selection for a request.
///
/// Matching is case-insensitive after whitespace trimming; the sentinel
/// "All Cities" (or an absent filter) disables filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityFilter {
    All,
    Named(String),
}

impl CityFilter {
    /// Build a filter from an optional request parameter
    pub fn from_request(city: Option<&str>) -> Self {
        match city {
            Some(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CITIES_LABEL) {
                    Self::All
                } else {
                    Self::Named(trimmed.to_string())
                }
            }
            None => Self::All,
        }
    }

    /// Whether a record's city label passes this filter
    pub fn matches(&self, city: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => city.trim().eq_ignore_ascii_case(name),
        }
    }

    /// Resolved label for presentation
    pub fn label(&self) -> String {
        match self {
            Self::All => ALL_CITIES_LABEL.to_string(),
            Self::Named(name) => name.clone(),
        }
    }
}
