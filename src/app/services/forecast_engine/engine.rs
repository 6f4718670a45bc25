//! Forecast engine: ladder orchestration and bounds clamping

use super::arima;
use super::fallback;
use super::regularize::{RegularSeries, regularize};
use crate::Result;
use crate::app::models::{ArimaOrder, DailySeries, ForecastPoint, ForecastSeries};
use crate::config::ForecastConfig;
use crate::constants::{AQI_MAX, AQI_MIN, CONFIDENCE_Z_SCORE};
use chrono::Days;
use tracing::debug;

/// Produces N-day forecasts from a daily series.
///
/// Holds the ordered ARIMA ladder; an empty ladder models structural
/// unavailability of the primary model and routes every forecast through
/// the deterministic fallback.
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    ladder: Vec<ArimaOrder>,
    min_history_days: usize,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(&ForecastConfig::default())
    }
}

impl ForecastEngine {
    /// Create an engine from forecast configuration
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            ladder: config.arima_ladder.clone(),
            min_history_days: config.min_history_days,
        }
    }

    /// Create an engine with the primary model disabled
    pub fn without_primary_model() -> Self {
        Self {
            ladder: Vec::new(),
            ..Self::default()
        }
    }

    /// Forecast `horizon_days` ahead of a daily series.
    ///
    /// Fails only with [`crate::Error::InsufficientData`]; every model-fit
    /// failure falls through the ladder to the deterministic fallback.
    pub fn forecast(&self, series: &DailySeries, horizon_days: u32) -> Result<ForecastSeries> {
        let regular = regularize(series, self.min_history_days)?;
        if horizon_days == 0 {
            return Ok(ForecastSeries::default());
        }

        for order in &self.ladder {
            match self.try_order(&regular, *order, horizon_days) {
                Ok(forecast) => {
                    debug!("ARIMA{} fit succeeded", order);
                    return Ok(forecast);
                }
                Err(reason) => {
                    debug!("ARIMA{} rejected: {}", order, reason);
                }
            }
        }

        debug!("ARIMA ladder exhausted, using deterministic fallback");
        Ok(fallback::forecast(&regular, horizon_days))
    }

    fn try_order(
        &self,
        regular: &RegularSeries,
        order: ArimaOrder,
        horizon_days: u32,
    ) -> std::result::Result<ForecastSeries, arima::ModelFitError> {
        let fitted = arima::fit(&regular.values, order)?;
        let forecast = fitted.forecast(horizon_days as usize)?;

        let first_date = regular.last_date() + Days::new(1);
        let points = forecast
            .point
            .iter()
            .zip(forecast.std_error.iter())
            .enumerate()
            .map(|(i, (&point, &std_error))| {
                let date = first_date + Days::new(i as u64);
                let aqi = point.clamp(AQI_MIN, AQI_MAX);
                let half_width = CONFIDENCE_Z_SCORE * std_error;
                ForecastPoint {
                    date,
                    aqi,
                    lower_bound: (point - half_width).clamp(AQI_MIN, aqi),
                    upper_bound: (point + half_width).clamp(aqi, AQI_MAX),
                }
            })
            .collect();

        Ok(ForecastSeries { points })
    }
}
