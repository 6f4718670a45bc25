//! Command-line interface definitions

use crate::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aqi-forecaster")]
#[command(about = "Serve AQI trend analysis and short-horizon forecasts over HTTP")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the raw AQI dataset (CSV)
    #[arg(short, long, default_value = crate::constants::DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Bind host
    #[arg(long, default_value = crate::constants::DEFAULT_BIND_HOST)]
    pub host: String,

    /// Bind port
    #[arg(short, long, default_value_t = crate::constants::DEFAULT_BIND_PORT)]
    pub port: u16,

    /// Default forecast horizon in days
    #[arg(long, default_value_t = crate::constants::DEFAULT_FORECAST_HORIZON_DAYS)]
    pub horizon: u32,

    /// Rows sampled when detecting a numeric AQI column
    #[arg(long, default_value_t = crate::constants::sniffing::DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Directory of dashboard assets served at /
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal logging (errors and warnings only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Tracing level implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Build the service configuration from the arguments
    pub fn to_config(&self) -> Config {
        let mut config = Config::default()
            .with_data_file(&self.data_file)
            .with_sample_size(self.sample_size)
            .with_default_horizon(self.horizon)
            .with_bind(self.host.clone(), self.port);
        if let Some(dir) = &self.static_dir {
            config = config.with_static_dir(dir);
        }
        config
    }
}
