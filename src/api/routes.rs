//! JSON API routes for the dashboard
//!
//! Thin request/response glue over the analytics orchestrator. Error
//! mapping: `DatasetMissing` and `NoDataForCity` answer 404,
//! `InsufficientData` 422, everything else 500; every error body is
//! `{"error": "..."}`.

use crate::Error;
use crate::api::state::AppState;
use crate::app::models::CityFilter;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::warn;

/// Build the application router.
///
/// Dashboard assets are served at `/` when `static_dir` points at an
/// existing directory.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/cities", get(cities))
        .route("/load-data", post(load_data))
        .route("/daily-trend", get(daily_trend))
        .route("/monthly-trend", get(monthly_trend))
        .route("/forecast", post(forecast))
        .with_state(state);

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(CorsLayer::permissive());

    match static_dir.filter(|dir| dir.is_dir()) {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Error wrapper mapping the domain taxonomy onto HTTP statuses
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::DatasetMissing { .. } | Error::NoDataForCity { .. } => StatusCode::NOT_FOUND,
            Error::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            warn!("Request failed: {}", self.0);
        }
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "aqi-forecaster",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Serialize)]
struct CitiesResponse {
    cities: Vec<String>,
}

async fn cities(State(state): State<AppState>) -> Result<Json<CitiesResponse>, ApiError> {
    let cities = state.analytics.cities().await?;
    Ok(Json(CitiesResponse { cities }))
}

#[derive(Deserialize, Default)]
struct LoadDataRequest {
    city: Option<String>,
}

#[derive(Serialize)]
struct LoadDataResponse {
    success: bool,
    stats: crate::app::models::DatasetSummary,
    message: String,
}

async fn load_data(
    State(state): State<AppState>,
    body: Option<Json<LoadDataRequest>>,
) -> Result<Json<LoadDataResponse>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let filter = CityFilter::from_request(request.city.as_deref());
    let stats = state.analytics.dataset_summary(&filter).await?;

    let message = format!(
        "Successfully loaded {} records for {}",
        stats.total_records, stats.city
    );
    Ok(Json(LoadDataResponse {
        success: true,
        stats,
        message,
    }))
}

#[derive(Deserialize, Default)]
struct TrendQuery {
    city: Option<String>,
}

#[derive(Serialize)]
struct TrendResponse {
    city: String,
    dates: Vec<String>,
    aqi_values: Vec<f64>,
}

async fn daily_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<TrendResponse>, ApiError> {
    let filter = CityFilter::from_request(query.city.as_deref());
    let series = state.analytics.daily_trend(&filter).await?;
    Ok(Json(TrendResponse {
        city: filter.label(),
        dates: series.dates(),
        aqi_values: series.values(),
    }))
}

async fn monthly_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<TrendResponse>, ApiError> {
    let filter = CityFilter::from_request(query.city.as_deref());
    let series = state.analytics.monthly_trend(&filter).await?;
    Ok(Json(TrendResponse {
        city: filter.label(),
        dates: series.dates(),
        aqi_values: series.values(),
    }))
}

#[derive(Deserialize, Default)]
struct ForecastRequest {
    days: Option<u32>,
    city: Option<String>,
}

#[derive(Serialize)]
struct SeriesPayload {
    dates: Vec<String>,
    aqi_values: Vec<f64>,
}

#[derive(Serialize)]
struct ForecastPayload {
    dates: Vec<String>,
    aqi_values: Vec<f64>,
    lower_bound: Vec<f64>,
    upper_bound: Vec<f64>,
}

#[derive(Serialize)]
struct ForecastResponse {
    city: String,
    historical: SeriesPayload,
    forecast: ForecastPayload,
}

async fn forecast(
    State(state): State<AppState>,
    body: Option<Json<ForecastRequest>>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let filter = CityFilter::from_request(request.city.as_deref());
    let bundle = state.analytics.forecast(&filter, request.days).await?;

    Ok(Json(ForecastResponse {
        city: bundle.city,
        historical: SeriesPayload {
            dates: bundle.historical.dates(),
            aqi_values: bundle.historical.values(),
        },
        forecast: ForecastPayload {
            dates: bundle.forecast.dates(),
            aqi_values: bundle.forecast.values(),
            lower_bound: bundle.forecast.lower_bounds(),
            upper_bound: bundle.forecast.upper_bounds(),
        },
    }))
}
