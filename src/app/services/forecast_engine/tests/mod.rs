//! Tests for the forecast engine
//!
//! Covers regularization, ARIMA fitting, the deterministic fallback, and
//! ladder orchestration with bounds clamping.


use crate::app::models::{DailySeries, ForecastSeries, SeriesPoint};
use chrono::{Days, NaiveDate};

/// First day of the fixture calendar
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// Daily series with one point per consecutive day from the fixture start
pub fn daily_series(values: &[f64]) -> DailySeries {
    DailySeries {
        points: values
            .iter()
            .enumerate()
            .map(|(i, &aqi)| SeriesPoint {
                date: start_date() + Days::new(i as u64),
                aqi,
            })
            .collect(),
    }
}

/// Assert the [0, 500] envelope and bound ordering on every point
pub fn assert_envelope(forecast: &ForecastSeries) {
    for point in &forecast.points {
        assert!(
            point.lower_bound >= 0.0
                && point.lower_bound <= point.aqi
                && point.aqi <= point.upper_bound
                && point.upper_bound <= 500.0,
            "envelope violated at {}: lower={} aqi={} upper={}",
            point.date,
            point.lower_bound,
            point.aqi,
            point.upper_bound
        );
    }
}

/// Assert dates are exactly consecutive days starting the day after `last`
pub fn assert_consecutive_dates(forecast: &ForecastSeries, last_historical: NaiveDate) {
    for (i, point) in forecast.points.iter().enumerate() {
        let expected = last_historical + Days::new(i as u64 + 1);
        assert_eq!(point.date, expected);
    }
}
