//! Multi-day AQI forecasting with uncertainty bounds
//!
//! The engine regularizes a daily series onto a gap-free calendar grid and
//! then walks an explicit ladder of ARIMA orders, taking the first
//! successful fit. When the ladder is empty or every order fails, a
//! deterministic trend/seasonal model produces the forecast instead.
//!
//! # Architecture
//!
//! - [`regularize`] - Reindexing onto a complete daily grid
//! - [`arima`] - Hand-rolled ARIMA fitting and interval forecasting
//! - [`fallback`] - Deterministic trend/seasonal forecast
//! - [`engine`] - Ladder orchestration and bounds clamping
//!
//! # Failure Semantics
//!
//! [`crate::Error::InsufficientData`] is the only error a forecast call can
//! surface. Every model-fitting failure is absorbed inside the ladder and
//! triggers the next order, ending at the deterministic fallback which
//! cannot fail on a regularized series.

pub mod arima;
pub mod engine;
pub mod fallback;
pub mod regularize;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use engine::ForecastEngine;
pub use regularize::{RegularSeries, regularize};
