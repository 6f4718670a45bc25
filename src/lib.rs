//! AQI Forecaster Library
//!
//! A Rust library and HTTP service for analysing daily air-quality datasets
//! and producing short-horizon AQI forecasts with uncertainty bounds.
//!
//! This library provides tools for:
//! - Normalizing raw tabular CSV data into a canonical `{date, city, aqi}` schema
//! - Gap-filling and deduplicating per-city measurement series
//! - Daily and monthly AQI aggregation
//! - Multi-day forecasting via an ARIMA order ladder with a deterministic
//!   trend/seasonal fallback
//! - A small JSON API for a browser dashboard

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod analytics;
        pub mod dataset_loader;
        pub mod forecast_engine;
        pub mod series_preparer;
    }
}

// HTTP API modules
pub mod api {
    pub mod routes;
    pub mod state;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CityFilter, DailySeries, ForecastSeries, MonthlySeries};
pub use config::Config;

/// Result type alias for AQI forecaster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for dataset loading, preparation and forecasting
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Source dataset file is absent
    #[error("Dataset file not found: {path}")]
    DatasetMissing { path: String },

    /// Dataset file exists but yields no usable rows
    #[error("Dataset could not be parsed: {message}")]
    DatasetUnparseable { message: String },

    /// Column-role detection could not identify the canonical schema
    #[error("Dataset schema not recognized: {message}")]
    SchemaNotRecognized { message: String },

    /// City filter matched no rows
    #[error("No data found for city: {city}")]
    NoDataForCity { city: String },

    /// Too few regularized days to forecast
    #[error("Insufficient data for forecasting: {days} days available, {required} required")]
    InsufficientData { days: usize, required: usize },

    /// Catch-all for unexpected internal failures
    #[error("Data unavailable: {message}")]
    DataUnavailable { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a dataset-missing error
    pub fn dataset_missing(path: impl Into<String>) -> Self {
        Self::DatasetMissing { path: path.into() }
    }

    /// Create a dataset-unparseable error
    pub fn dataset_unparseable(message: impl Into<String>) -> Self {
        Self::DatasetUnparseable {
            message: message.into(),
        }
    }

    /// Create a schema-not-recognized error
    pub fn schema_not_recognized(message: impl Into<String>) -> Self {
        Self::SchemaNotRecognized {
            message: message.into(),
        }
    }

    /// Create a no-data-for-city error
    pub fn no_data_for_city(city: impl Into<String>) -> Self {
        Self::NoDataForCity { city: city.into() }
    }

    /// Create an insufficient-data error
    pub fn insufficient_data(days: usize, required: usize) -> Self {
        Self::InsufficientData { days, required }
    }

    /// Create a data-unavailable error
    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}
