//! Process-wide dataset cache
//!
//! The normalized full dataset is computed at most once per process and
//! shared immutably. Concurrent first accesses collapse onto a single load
//! via `tokio::sync::OnceCell`; failed loads are not cached, so a later
//! call retries (e.g. after the dataset file appears).

use super::columns::ColumnRoles;
use super::normalize::normalize;
use super::reader::read_raw_table;
use crate::Result;
use crate::app::models::CanonicalTable;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

/// Lazily-initialized holder of the normalized dataset.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    sample_size: usize,
    table: OnceCell<Arc<CanonicalTable>>,
}

impl DatasetCache {
    /// Create a cache for the dataset at `path`
    pub fn new(path: impl Into<PathBuf>, sample_size: usize) -> Self {
        Self {
            path: path.into(),
            sample_size,
            table: OnceCell::new(),
        }
    }

    /// Path of the underlying dataset file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the normalized dataset, loading it on first access.
    ///
    /// Concurrent first calls await the same initialization; the table is
    /// never invalidated during the process lifetime.
    pub async fn get_or_load(&self) -> Result<Arc<CanonicalTable>> {
        let table = self
            .table
            .get_or_try_init(|| async { self.load().map(Arc::new) })
            .await?;
        Ok(Arc::clone(table))
    }

    fn load(&self) -> Result<CanonicalTable> {
        let raw = read_raw_table(&self.path)?;
        let roles = ColumnRoles::detect(&raw, self.sample_size)?;
        let outcome = normalize(&raw, &roles)?;

        info!(
            "Loaded dataset {}: {} records, {} cities",
            self.path.display(),
            outcome.table.records.len(),
            outcome.table.cities.len()
        );

        Ok(outcome.table)
    }
}
