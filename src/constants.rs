//! Application constants for the AQI forecaster
//!
//! This module contains configuration constants, default values, and the
//! fixed model parameters used throughout the forecasting pipeline.

// =============================================================================
// Dataset Defaults
// =============================================================================

/// Default dataset file (Kaggle `city_day.csv` layout)
pub const DEFAULT_DATA_FILE: &str = "data/city_day.csv";

/// Label applied when the source has no city column, and the filter sentinel
/// meaning "no city filtering"
pub const ALL_CITIES_LABEL: &str = "All Cities";

/// Date formats accepted for the date column, tried in order.
/// Datetime cells are truncated to their date prefix before matching.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

// =============================================================================
// Column-Role Detection
// =============================================================================

/// Header substrings used to assign column roles (case-insensitive,
/// first match in column order wins)
pub mod sniffing {
    /// Substring identifying the date column
    pub const DATE_TOKEN: &str = "date";

    /// Substring identifying the city column
    pub const CITY_TOKEN: &str = "city";

    /// Substring identifying the AQI column
    pub const AQI_TOKEN: &str = "aqi";

    /// Columns matching the AQI token but containing this substring are
    /// categorical (e.g. "AQI_Bucket") and never selected
    pub const AQI_EXCLUDE_TOKEN: &str = "bucket";

    /// Default number of data rows sampled when falling back to numeric
    /// column detection
    pub const DEFAULT_SAMPLE_SIZE: usize = 20;

    /// Fraction of sampled non-empty cells that must parse as numbers for a
    /// column to qualify as the AQI measure
    pub const NUMERIC_FRACTION_THRESHOLD: f64 = 0.5;
}

// =============================================================================
// AQI Range and Forecasting Parameters
// =============================================================================

/// Lower bound of the realistic AQI sensor range
pub const AQI_MIN: f64 = 0.0;

/// Upper bound of the realistic AQI sensor range
pub const AQI_MAX: f64 = 500.0;

/// Minimum number of regularized daily values required before any
/// forecasting is attempted
pub const MIN_REGULARIZED_DAYS: usize = 7;

/// z-score for the 95% confidence interval
pub const CONFIDENCE_Z_SCORE: f64 = 1.96;

/// Default forecast horizon in days
pub const DEFAULT_FORECAST_HORIZON_DAYS: u32 = 30;

/// ARIMA orders (p, d, q) attempted in sequence; the first successful fit
/// wins, and an exhausted ladder falls through to the deterministic model
pub const DEFAULT_ARIMA_LADDER: &[(usize, usize, usize)] = &[(1, 1, 1), (1, 0, 1), (1, 0, 0)];

/// Parameters of the deterministic trend/seasonal fallback model
pub mod fallback {
    /// Window (days) for the recent mean and standard deviation
    pub const RECENT_WINDOW_DAYS: usize = 7;

    /// Window (days) for the OLS trend slope
    pub const TREND_WINDOW_DAYS: usize = 30;

    /// Minimum history (days) before a day-of-year seasonal pattern is used
    pub const SEASONAL_MIN_HISTORY_DAYS: usize = 365;

    /// Weight applied to the seasonal adjustment
    pub const SEASONAL_WEIGHT: f64 = 0.3;

    /// Confidence range as a fraction of the recent mean, used when the
    /// recent standard deviation is undefined
    pub const RELATIVE_RANGE_FACTOR: f64 = 0.2;
}

// =============================================================================
// Server Defaults
// =============================================================================

/// Default bind host
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_BIND_PORT: u16 = 5000;
