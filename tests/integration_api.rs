//! HTTP surface tests driving the router directly with `tower::oneshot`.

use aqi_forecaster::api::routes::build_router;
use aqi_forecaster::cli::commands::build_state;
use aqi_forecaster::Config;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;
use tower::ServiceExt;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}

fn router_for(file: &NamedTempFile) -> Router {
    let config = Config::default().with_data_file(file.path());
    build_router(build_state(&config), None)
}

/// Forty days of constant AQI 100 for one city. Constant history drives the
/// engine to its deterministic fallback with a zero-width interval.
fn constant_csv() -> String {
    let mut csv = String::from("Date,City,AQI\n");
    for day in 1..=31 {
        csv.push_str(&format!("2022-01-{day:02},Delhi,100\n"));
    }
    for day in 1..=9 {
        csv.push_str(&format!("2022-02-{day:02},Delhi,100\n"));
    }
    csv
}

fn two_city_csv() -> String {
    let mut csv = String::from("Date,City,AQI\n");
    for day in 1..=20 {
        csv.push_str(&format!("2022-01-{day:02},Delhi,{}\n", 200 + day));
        csv.push_str(&format!("2022-01-{day:02},Chennai,{}\n", 60 + day));
    }
    csv
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_the_service() {
    let file = write_csv(&two_city_csv());
    let (status, body) = get(router_for(&file), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "aqi-forecaster");
}

#[tokio::test]
async fn cities_lists_distinct_sorted_names() {
    let file = write_csv(&two_city_csv());
    let (status, body) = get(router_for(&file), "/api/cities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cities"], serde_json::json!(["Chennai", "Delhi"]));
}

#[tokio::test]
async fn load_data_returns_stats_for_a_city() {
    let file = write_csv(&two_city_csv());
    let (status, body) = post_json(
        router_for(&file),
        "/api/load-data",
        serde_json::json!({"city": "Delhi"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["stats"]["total_records"], 20);
    assert_eq!(body["stats"]["city"], "Delhi");
    assert_eq!(body["stats"]["aqi_stats"]["min"], 201.0);
    assert_eq!(body["stats"]["aqi_stats"]["max"], 220.0);
}

#[tokio::test]
async fn load_data_without_a_body_covers_all_cities() {
    let file = write_csv(&two_city_csv());
    let (status, body) = post_json(router_for(&file), "/api/load-data", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["city"], "All Cities");
    assert_eq!(body["stats"]["total_records"], 40);
}

#[tokio::test]
async fn daily_trend_filters_by_query_parameter() {
    let file = write_csv(&two_city_csv());
    let (status, body) = get(router_for(&file), "/api/daily-trend?city=Chennai").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Chennai");
    assert_eq!(body["dates"].as_array().unwrap().len(), 20);
    assert_eq!(body["dates"][0], "2022-01-01");
    assert_eq!(body["aqi_values"][0], 61.0);
}

#[tokio::test]
async fn monthly_trend_averages_per_month() {
    let file = write_csv(&two_city_csv());
    let (status, body) = get(router_for(&file), "/api/monthly-trend?city=Delhi").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dates"].as_array().unwrap().len(), 1);
    assert_eq!(body["dates"][0], "2022-01-01");
    // mean of 201..=220
    assert_eq!(body["aqi_values"][0], 210.5);
}

#[tokio::test]
async fn forecast_on_constant_history_is_deterministic() {
    let file = write_csv(&constant_csv());
    let (status, body) = post_json(
        router_for(&file),
        "/api/forecast",
        serde_json::json!({"days": 5, "city": "Delhi"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Delhi");
    assert_eq!(body["historical"]["dates"].as_array().unwrap().len(), 40);

    let forecast = &body["forecast"];
    assert_eq!(forecast["dates"].as_array().unwrap().len(), 5);
    assert_eq!(forecast["dates"][0], "2022-02-10");
    for i in 0..5 {
        assert_eq!(forecast["aqi_values"][i], 100.0);
        assert_eq!(forecast["lower_bound"][i], 100.0);
        assert_eq!(forecast["upper_bound"][i], 100.0);
    }
}

#[tokio::test]
async fn forecast_defaults_the_horizon() {
    let file = write_csv(&constant_csv());
    let (status, body) = post_json(router_for(&file), "/api/forecast", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forecast"]["dates"].as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn unknown_city_answers_not_found() {
    let file = write_csv(&two_city_csv());
    let (status, body) = get(router_for(&file), "/api/daily-trend?city=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn missing_dataset_answers_not_found() {
    let config = Config::default().with_data_file("/nonexistent/city_day.csv");
    let router = build_router(build_state(&config), None);
    let (status, body) = get(router, "/api/cities").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("city_day.csv"));
}

#[tokio::test]
async fn short_history_answers_unprocessable() {
    let file = write_csv("Date,City,AQI\n2022-01-01,Delhi,80\n2022-01-02,Delhi,85\n");
    let (status, body) = post_json(router_for(&file), "/api/forecast", Value::Null).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("days"));
}
