//! Hand-rolled ARIMA fitting and interval forecasting
//!
//! AR coefficients come from the Yule-Walker equations solved with
//! Levinson-Durbin recursion, MA coefficients from residual
//! autocorrelations, and the intercept is the mean of the differenced
//! series. Forecast standard errors accumulate psi weights of the fitted
//! process (cumulated once per differencing order), scaled by the
//! in-sample residual variance.
//!
//! Fit failures stay inside the engine: [`ModelFitError`] never appears in
//! the public error taxonomy.

use crate::app::models::ArimaOrder;

/// Extra observations required beyond the raw order terms
const MIN_EXTRA_OBSERVATIONS: usize = 10;

/// Variance below which a (differenced) series is treated as degenerate
const DEGENERATE_VARIANCE: f64 = 1e-10;

/// Reasons a single ladder order can fail; absorbed by the engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub(crate) enum ModelFitError {
    #[error("series too short: {actual} observations, {required} required")]
    TooShort { required: usize, actual: usize },

    #[error("differenced series is degenerate (near-zero variance)")]
    Degenerate,

    #[error("estimated AR part is non-stationary")]
    NonStationary,

    #[error("estimation produced non-finite values")]
    NonFinite,
}

/// A fitted ARIMA model ready to forecast.
#[derive(Debug, Clone)]
pub(crate) struct FittedArima {
    order: ArimaOrder,
    ar: Vec<f64>,
    ma: Vec<f64>,
    intercept: f64,
    residual_variance: f64,
    last_observation: f64,
    differenced: Vec<f64>,
    residuals: Vec<f64>,
}

/// Point forecasts with per-step standard errors.
#[derive(Debug, Clone)]
pub(crate) struct ArimaForecast {
    pub point: Vec<f64>,
    pub std_error: Vec<f64>,
}

/// Fit an ARIMA model of the given order to a regularized series.
pub(crate) fn fit(values: &[f64], order: ArimaOrder) -> Result<FittedArima, ModelFitError> {
    let required = order.p + order.d + order.q + MIN_EXTRA_OBSERVATIONS;
    if values.len() < required {
        return Err(ModelFitError::TooShort {
            required,
            actual: values.len(),
        });
    }

    let differenced = difference(values, order.d);
    let n = differenced.len();

    let intercept = differenced.iter().sum::<f64>() / n as f64;
    let variance = differenced
        .iter()
        .map(|v| (v - intercept).powi(2))
        .sum::<f64>()
        / n as f64;
    if variance < DEGENERATE_VARIANCE {
        return Err(ModelFitError::Degenerate);
    }

    let ar = estimate_ar(&differenced, intercept, order.p)?;
    // Stationarity guard: sufficient for p = 1 and conservative above
    if ar.iter().map(|c| c.abs()).sum::<f64>() >= 1.0 {
        return Err(ModelFitError::NonStationary);
    }

    // In-sample one-step residuals from the AR part
    let mut residuals = vec![0.0; n];
    for i in order.p..n {
        let mut prediction = intercept;
        for (j, &phi) in ar.iter().enumerate() {
            prediction += phi * (differenced[i - j - 1] - intercept);
        }
        residuals[i] = differenced[i] - prediction;
    }

    let ma = estimate_ma(&residuals[order.p..], order.q);
    if ma.iter().any(|c| !c.is_finite()) {
        return Err(ModelFitError::NonFinite);
    }

    let effective = (n - order.p).max(1);
    let residual_variance =
        residuals[order.p..].iter().map(|r| r * r).sum::<f64>() / effective as f64;
    if !residual_variance.is_finite() {
        return Err(ModelFitError::NonFinite);
    }

    Ok(FittedArima {
        order,
        ar,
        ma,
        intercept,
        residual_variance,
        last_observation: *values.last().expect("non-empty series"),
        differenced,
        residuals,
    })
}

impl FittedArima {
    /// Forecast `steps` ahead with per-step standard errors.
    pub(crate) fn forecast(&self, steps: usize) -> Result<ArimaForecast, ModelFitError> {
        if steps == 0 {
            return Ok(ArimaForecast {
                point: Vec::new(),
                std_error: Vec::new(),
            });
        }

        // Recursion on the differenced scale; future shocks are zero
        let mut extended = self.differenced.clone();
        let mut shocks = self.residuals.clone();
        let n = extended.len();

        for _ in 0..steps {
            let mut forecast = self.intercept;
            for (j, &phi) in self.ar.iter().enumerate() {
                let index = extended.len() - j - 1;
                forecast += phi * (extended[index] - self.intercept);
            }
            for (j, &theta) in self.ma.iter().enumerate() {
                if shocks.len() > j {
                    let index = shocks.len() - j - 1;
                    forecast += theta * shocks[index];
                }
            }
            extended.push(forecast);
            shocks.push(0.0);
        }

        let point = self.integrate(&extended[n..]);
        if point.iter().any(|v| !v.is_finite()) {
            return Err(ModelFitError::NonFinite);
        }

        let std_error = self.standard_errors(steps);
        Ok(ArimaForecast { point, std_error })
    }

    /// Undo differencing: cumulative sums anchored at the last observation
    fn integrate(&self, forecasts: &[f64]) -> Vec<f64> {
        if self.order.d == 0 {
            return forecasts.to_vec();
        }

        let mut result = forecasts.to_vec();
        for _ in 0..self.order.d {
            let mut level = self.last_observation;
            for value in result.iter_mut() {
                level += *value;
                *value = level;
            }
        }
        result
    }

    /// Forecast error standard deviation per step from accumulated psi
    /// weights of the (integrated) process
    fn standard_errors(&self, steps: usize) -> Vec<f64> {
        let mut psi = vec![0.0; steps];
        psi[0] = 1.0;
        for j in 1..steps {
            let mut weight = if j <= self.ma.len() {
                self.ma[j - 1]
            } else {
                0.0
            };
            for (i, &phi) in self.ar.iter().enumerate() {
                if j > i {
                    weight += phi * psi[j - i - 1];
                }
            }
            psi[j] = weight;
        }

        // Each differencing order integrates the psi weights once
        for _ in 0..self.order.d {
            for j in 1..steps {
                psi[j] += psi[j - 1];
            }
        }

        let mut cumulative = 0.0;
        psi.iter()
            .map(|w| {
                cumulative += w * w;
                (self.residual_variance * cumulative).sqrt()
            })
            .collect()
    }
}

/// Apply d-order differencing
fn difference(values: &[f64], d: usize) -> Vec<f64> {
    let mut result = values.to_vec();
    for _ in 0..d {
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// AR coefficients via Yule-Walker solved with Levinson-Durbin
fn estimate_ar(
    differenced: &[f64],
    mean: f64,
    p: usize,
) -> Result<Vec<f64>, ModelFitError> {
    if p == 0 {
        return Ok(Vec::new());
    }

    let n = differenced.len();
    let centered: Vec<f64> = differenced.iter().map(|v| v - mean).collect();

    let mut autocovariance = vec![0.0; p + 1];
    for (k, cov) in autocovariance.iter_mut().enumerate() {
        let mut sum = 0.0;
        for i in k..n {
            sum += centered[i] * centered[i - k];
        }
        *cov = sum / n as f64;
    }

    if autocovariance[0].abs() < DEGENERATE_VARIANCE {
        return Err(ModelFitError::Degenerate);
    }

    let mut coefficients = vec![0.0; p];
    coefficients[0] = autocovariance[1] / autocovariance[0];
    for k in 1..p {
        let mut numerator = autocovariance[k + 1];
        for j in 0..k {
            numerator -= coefficients[j] * autocovariance[k - j];
        }

        let mut denominator = autocovariance[0];
        for j in 0..k {
            denominator -= coefficients[j] * autocovariance[j + 1];
        }

        if denominator.abs() > DEGENERATE_VARIANCE {
            let reflection = numerator / denominator;
            let previous = coefficients.clone();
            coefficients[k] = reflection;
            for j in 0..k {
                coefficients[j] = previous[j] - reflection * previous[k - 1 - j];
            }
        }
    }

    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(ModelFitError::NonFinite);
    }
    Ok(coefficients)
}

/// MA coefficients from residual autocorrelations, bounded for stability
fn estimate_ma(residuals: &[f64], q: usize) -> Vec<f64> {
    if q == 0 || residuals.is_empty() {
        return vec![0.0; q];
    }

    let n = residuals.len();
    let mean = residuals.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = residuals.iter().map(|r| r - mean).collect();
    let variance = centered.iter().map(|r| r * r).sum::<f64>() / n as f64;

    let mut coefficients = vec![0.0; q];
    if variance.abs() > DEGENERATE_VARIANCE {
        for (k, coeff) in coefficients.iter_mut().enumerate() {
            let mut sum = 0.0;
            for i in (k + 1)..n {
                sum += centered[i] * centered[i - k - 1];
            }
            *coeff = ((sum / n as f64) / variance).clamp(-0.99, 0.99);
        }
    }
    coefficients
}
