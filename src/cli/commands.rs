//! Server bootstrap: logging, wiring, and the listen loop

use crate::api::routes::build_router;
use crate::api::state::AppState;
use crate::app::services::analytics::Analytics;
use crate::app::services::dataset_loader::DatasetCache;
use crate::app::services::forecast_engine::ForecastEngine;
use crate::cli::args::Args;
use crate::{Config, Error, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialise the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the verbosity flags decide.
pub fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aqi_forecaster={level},tower_http={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();
}

/// Run the service until interrupted.
pub async fn run(args: Args) -> Result<()> {
    setup_logging(args.log_level());

    let config = args.to_config();
    config.validate()?;

    if !config.dataset.data_file.exists() {
        warn!(
            path = %config.dataset.data_file.display(),
            "dataset file not found at startup; endpoints will report it missing until it appears"
        );
    }

    let state = build_state(&config);
    let router = build_router(state, config.server.static_dir.as_deref());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::io(format!("failed to bind {addr}"), e))?;

    info!(
        %addr,
        data_file = %config.dataset.data_file.display(),
        horizon = config.forecast.default_horizon_days,
        "aqi-forecaster listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::io("server error", e))?;

    info!("shutdown complete");
    Ok(())
}

/// Assemble the shared application state from the configuration.
pub fn build_state(config: &Config) -> AppState {
    let cache = Arc::new(DatasetCache::new(
        &config.dataset.data_file,
        config.dataset.sample_size,
    ));
    let engine = ForecastEngine::new(&config.forecast);
    let analytics = Analytics::new(cache, engine, config.forecast.default_horizon_days);
    AppState::new(Arc::new(analytics))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("interrupt received, shutting down"),
        Err(e) => warn!(error = %e, "failed to listen for shutdown signal"),
    }
}
