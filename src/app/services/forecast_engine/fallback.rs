//! Deterministic trend/seasonal fallback forecast
//!
//! Used whenever the ARIMA ladder is empty or exhausted. The point
//! forecast extrapolates the recent-window mean along an OLS trend slope,
//! nudged toward the day-of-year seasonal pattern when at least a year of
//! history exists. The confidence range is `1.96 * recent_std`, replaced
//! by `0.2 * recent_mean` when the standard deviation is undefined
//! (single-point window).

use super::regularize::RegularSeries;
use crate::app::models::{ForecastPoint, ForecastSeries};
use crate::constants::{AQI_MAX, AQI_MIN, CONFIDENCE_Z_SCORE, fallback};
use chrono::{Datelike, Days};
use std::collections::HashMap;
use tracing::debug;

/// Forecast `horizon_days` ahead of a regularized series.
///
/// Never fails: the engine only calls this with a series that passed the
/// minimum-history check.
pub(crate) fn forecast(series: &RegularSeries, horizon_days: u32) -> ForecastSeries {
    let recent_window = series
        .values
        .len()
        .min(fallback::RECENT_WINDOW_DAYS)
        .max(1);
    let recent = &series.values[series.values.len() - recent_window..];
    let recent_mean = mean(recent);
    let recent_std = sample_std(recent, recent_mean);

    let trend_window = series.values.len().min(fallback::TREND_WINDOW_DAYS);
    let trend_slope = ols_slope(&series.values[series.values.len() - trend_window..]);

    let seasonal = seasonal_pattern(series);

    let confidence_range = match recent_std {
        Some(std) => CONFIDENCE_Z_SCORE * std,
        None => fallback::RELATIVE_RANGE_FACTOR * recent_mean,
    };

    debug!(
        "Fallback forecast: recent_mean={:.2} slope={:.4} range={:.2} seasonal={}",
        recent_mean,
        trend_slope,
        confidence_range,
        seasonal.is_some()
    );

    let first_date = series.last_date() + Days::new(1);
    let points = (0..horizon_days)
        .map(|i| {
            let date = first_date + Days::new(u64::from(i));
            let mut base = recent_mean + trend_slope * f64::from(i + 1);

            if let Some(pattern) = &seasonal
                && let Some(&seasonal_mean) = pattern.get(&date.ordinal())
            {
                base += fallback::SEASONAL_WEIGHT * (seasonal_mean - recent_mean);
            }

            let base = base.clamp(AQI_MIN, AQI_MAX);
            ForecastPoint {
                date,
                aqi: base,
                lower_bound: (base - confidence_range).max(AQI_MIN),
                upper_bound: (base + confidence_range).min(AQI_MAX),
            }
        })
        .collect();

    ForecastSeries { points }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 divisor); undefined for one point
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// OLS slope of values against their 0-based index; 0 for fewer than 2 points
fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);

    let mut covariance = 0.0;
    let mut x_variance = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        covariance += dx * (y - y_mean);
        x_variance += dx * dx;
    }
    covariance / x_variance
}

/// Mean AQI per day-of-year (1..=366) when at least a year of history exists
fn seasonal_pattern(series: &RegularSeries) -> Option<HashMap<u32, f64>> {
    if series.values.len() < fallback::SEASONAL_MIN_HISTORY_DAYS {
        return None;
    }

    let mut sums: HashMap<u32, (f64, usize)> = HashMap::new();
    for (i, &value) in series.values.iter().enumerate() {
        let day_of_year = series.date_at(i).ordinal();
        let entry = sums.entry(day_of_year).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    Some(
        sums.into_iter()
            .map(|(day, (sum, count))| (day, sum / count as f64))
            .collect(),
    )
}
