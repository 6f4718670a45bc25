//! Analytics orchestrator
//!
//! Wires the dataset cache, series preparer, aggregator and forecast
//! engine into the request-level operations of the JSON API. Domain errors
//! (`DatasetMissing`, `NoDataForCity`, `InsufficientData`) propagate
//! unchanged; any other internal failure is wrapped as `DataUnavailable`.

use crate::app::models::{
    AqiStats, CityFilter, DailySeries, DatasetSummary, DateRange, ForecastBundle, MonthlySeries,
    PreparedTable,
};
use crate::app::services::dataset_loader::DatasetCache;
use crate::app::services::forecast_engine::ForecastEngine;
use crate::app::services::{aggregator, series_preparer};
use crate::constants::ALL_CITIES_LABEL;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::info;

/// Request-level operations over the analysis pipeline.
#[derive(Debug)]
pub struct Analytics {
    cache: Arc<DatasetCache>,
    engine: ForecastEngine,
    default_horizon_days: u32,
}

impl Analytics {
    /// Create an orchestrator over a dataset cache and forecast engine
    pub fn new(cache: Arc<DatasetCache>, engine: ForecastEngine, default_horizon_days: u32) -> Self {
        Self {
            cache,
            engine,
            default_horizon_days,
        }
    }

    /// Sorted distinct non-blank city labels; the sentinel when the source
    /// has no city column
    pub async fn cities(&self) -> Result<Vec<String>> {
        let table = self.cache.get_or_load().await.map_err(wrap_unexpected)?;
        if table.has_city_column {
            Ok(table.cities.clone())
        } else {
            Ok(vec![ALL_CITIES_LABEL.to_string()])
        }
    }

    /// Prepared-table statistics for the load-data endpoint
    pub async fn dataset_summary(&self, filter: &CityFilter) -> Result<DatasetSummary> {
        let prepared = self.prepare(filter).await?;
        let values: Vec<f64> = prepared.records.iter().map(|r| r.aqi).collect();

        // prepare() guarantees at least one record
        let aqi_stats =
            AqiStats::from_values(&values).ok_or_else(|| Error::no_data_for_city(filter.label()))?;
        let (start, end) = match (prepared.records.first(), prepared.records.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => return Err(Error::no_data_for_city(filter.label())),
        };

        info!(
            "Dataset summary for '{}': {} records, {} to {}",
            prepared.city_label,
            prepared.records.len(),
            start,
            end
        );

        Ok(DatasetSummary {
            total_records: prepared.records.len(),
            city: prepared.city_label,
            date_range: DateRange { start, end },
            aqi_stats,
        })
    }

    /// Daily mean AQI for the filtered city scope
    pub async fn daily_trend(&self, filter: &CityFilter) -> Result<DailySeries> {
        let prepared = self.prepare(filter).await?;
        Ok(aggregator::daily(&prepared))
    }

    /// Monthly mean AQI for the filtered city scope
    pub async fn monthly_trend(&self, filter: &CityFilter) -> Result<MonthlySeries> {
        let prepared = self.prepare(filter).await?;
        Ok(aggregator::monthly(&prepared))
    }

    /// Historical daily series bundled with its forecast
    pub async fn forecast(
        &self,
        filter: &CityFilter,
        horizon_days: Option<u32>,
    ) -> Result<ForecastBundle> {
        let horizon = horizon_days.unwrap_or(self.default_horizon_days);
        let prepared = self.prepare(filter).await?;
        let historical = aggregator::daily(&prepared);
        let forecast = self.engine.forecast(&historical, horizon)?;

        info!(
            "Forecast for '{}': {} historical days, {} forecast days",
            prepared.city_label,
            historical.len(),
            forecast.len()
        );

        Ok(ForecastBundle {
            city: prepared.city_label,
            historical,
            forecast,
        })
    }

    async fn prepare(&self, filter: &CityFilter) -> Result<PreparedTable> {
        let table = self.cache.get_or_load().await.map_err(wrap_unexpected)?;
        let outcome = series_preparer::prepare(&table, filter)?;
        Ok(outcome.table)
    }
}

/// Keep the domain taxonomy intact; wrap anything else as DataUnavailable
fn wrap_unexpected(error: Error) -> Error {
    match error {
        Error::DatasetMissing { .. }
        | Error::DatasetUnparseable { .. }
        | Error::SchemaNotRecognized { .. }
        | Error::NoDataForCity { .. }
        | Error::InsufficientData { .. }
        | Error::DataUnavailable { .. } => error,
        other => Error::data_unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp csv");
        file.write_all(contents.as_bytes()).expect("write temp csv");
        file.flush().expect("flush temp csv");
        file
    }

    fn analytics_for(file: &NamedTempFile) -> Analytics {
        let cache = Arc::new(DatasetCache::new(file.path(), 20));
        Analytics::new(cache, ForecastEngine::default(), 30)
    }

    fn sample_csv() -> String {
        let mut csv = String::from("Date,City,AQI\n");
        for day in 1..=20 {
            csv.push_str(&format!("2020-01-{day:02},Delhi,{}\n", 200 + day));
            csv.push_str(&format!("2020-01-{day:02},Chennai,{}\n", 60 + day));
        }
        csv.push_str("2020-02-01,Delhi,250\n");
        csv
    }

    #[tokio::test]
    async fn cities_are_sorted_and_distinct() {
        let file = write_csv(&sample_csv());
        let analytics = analytics_for(&file);
        assert_eq!(analytics.cities().await.unwrap(), vec!["Chennai", "Delhi"]);
    }

    #[tokio::test]
    async fn summary_reports_range_and_stats() {
        let file = write_csv(&sample_csv());
        let analytics = analytics_for(&file);

        let summary = analytics
            .dataset_summary(&CityFilter::Named("delhi".to_string()))
            .await
            .unwrap();
        assert_eq!(summary.total_records, 21);
        assert_eq!(summary.date_range.start.to_string(), "2020-01-01");
        assert_eq!(summary.date_range.end.to_string(), "2020-02-01");
        assert_eq!(summary.aqi_stats.min, 201.0);
        assert_eq!(summary.aqi_stats.max, 250.0);
    }

    #[tokio::test]
    async fn trends_and_forecast_flow_through() {
        let file = write_csv(&sample_csv());
        let analytics = analytics_for(&file);
        let filter = CityFilter::Named("Delhi".to_string());

        let daily = analytics.daily_trend(&filter).await.unwrap();
        assert_eq!(daily.len(), 21);

        let monthly = analytics.monthly_trend(&filter).await.unwrap();
        assert_eq!(monthly.len(), 2);

        let bundle = analytics.forecast(&filter, Some(5)).await.unwrap();
        assert_eq!(bundle.city, "Delhi");
        assert_eq!(bundle.forecast.len(), 5);
        assert_eq!(bundle.historical.len(), 21);
    }

    #[tokio::test]
    async fn unknown_city_propagates() {
        let file = write_csv(&sample_csv());
        let analytics = analytics_for(&file);
        let result = analytics
            .daily_trend(&CityFilter::Named("Atlantis".to_string()))
            .await;
        assert!(matches!(result, Err(Error::NoDataForCity { .. })));
    }

    #[tokio::test]
    async fn short_history_propagates_insufficient_data() {
        let file = write_csv("Date,City,AQI\n2020-01-01,Delhi,100\n2020-01-02,Delhi,110\n");
        let analytics = analytics_for(&file);
        let result = analytics.forecast(&CityFilter::All, None).await;
        assert!(matches!(result, Err(Error::InsufficientData { .. })));
    }

    #[tokio::test]
    async fn missing_dataset_propagates() {
        let cache = Arc::new(DatasetCache::new("/nonexistent/city_day.csv", 20));
        let analytics = Analytics::new(cache, ForecastEngine::default(), 30);
        let result = analytics.cities().await;
        assert!(matches!(result, Err(Error::DatasetMissing { .. })));
    }
}
