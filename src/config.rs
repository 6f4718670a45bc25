//! Configuration management and validation.
//!
//! Provides configuration structures for the dataset normalizer, the
//! forecast engine, and the HTTP server, with builder-style customization
//! and validation.

use crate::app::models::ArimaOrder;
use crate::constants::{
    DEFAULT_ARIMA_LADDER, DEFAULT_BIND_HOST, DEFAULT_BIND_PORT, DEFAULT_DATA_FILE,
    DEFAULT_FORECAST_HORIZON_DAYS, MIN_REGULARIZED_DAYS, sniffing,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Dataset loading and normalization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the raw CSV dataset
    pub data_file: PathBuf,

    /// Number of data rows sampled for numeric column detection
    pub sample_size: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            sample_size: sniffing::DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Forecast engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Horizon applied when a forecast request omits `days`
    pub default_horizon_days: u32,

    /// Minimum regularized history before forecasting is attempted
    pub min_history_days: usize,

    /// ARIMA orders attempted in sequence before the deterministic fallback
    pub arima_ladder: Vec<ArimaOrder>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_horizon_days: DEFAULT_FORECAST_HORIZON_DAYS,
            min_history_days: MIN_REGULARIZED_DAYS,
            arima_ladder: DEFAULT_ARIMA_LADDER
                .iter()
                .map(|&(p, d, q)| ArimaOrder { p, d, q })
                .collect(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Optional directory of dashboard assets served at `/`
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BIND_HOST.to_string(),
            port: DEFAULT_BIND_PORT,
            static_dir: None,
        }
    }
}

/// Global configuration for the AQI forecaster service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dataset loading settings
    pub dataset: DatasetConfig,

    /// Forecast engine settings
    pub forecast: ForecastConfig,

    /// HTTP server settings
    pub server: ServerConfig,
}

impl Config {
    /// Set the dataset file path
    pub fn with_data_file(mut self, data_file: impl Into<PathBuf>) -> Self {
        self.dataset.data_file = data_file.into();
        self
    }

    /// Set the column-detection sample size
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.dataset.sample_size = sample_size;
        self
    }

    /// Set the default forecast horizon
    pub fn with_default_horizon(mut self, days: u32) -> Self {
        self.forecast.default_horizon_days = days;
        self
    }

    /// Set the bind address
    pub fn with_bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.server.host = host.into();
        self.server.port = port;
        self
    }

    /// Set the static asset directory
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.server.static_dir = Some(dir.into());
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.dataset.sample_size == 0 {
            return Err(Error::configuration("sample_size must be at least 1"));
        }
        if self.forecast.default_horizon_days == 0 {
            return Err(Error::configuration(
                "default_horizon_days must be at least 1",
            ));
        }
        if self.forecast.min_history_days < 2 {
            return Err(Error::configuration("min_history_days must be at least 2"));
        }
        if self.server.host.is_empty() {
            return Err(Error::configuration("bind host must not be empty"));
        }
        Ok(())
    }
}
