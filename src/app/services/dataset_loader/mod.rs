//! Dataset loading and normalization for raw AQI tables
//!
//! This module turns an arbitrary tabular CSV into the canonical
//! `{date, city, aqi}` schema the rest of the pipeline consumes. It handles
//! header-based column-role detection, type coercion, and process-wide
//! caching of the normalized table.
//!
//! # Architecture
//!
//! - [`reader`] - Raw CSV reading into headers + string cells
//! - [`columns`] - Column-role detection (date / city / AQI)
//! - [`normalize`] - Pure canonicalization with parse statistics
//! - [`cache`] - Initialize-once process-wide dataset cache
//!
//! # Detection Philosophy
//!
//! Column roles are resolved by case-insensitive header substrings, always
//! taking the first match in column order. When no header names an AQI-like
//! column, a sample of data rows is analysed and the first mostly-numeric
//! column (outside the date/city roles) is taken instead. The core pipeline
//! never sees raw headers; it is testable against synthetic canonical tables
//! without any file I/O.

pub mod cache;
pub mod columns;
pub mod normalize;
pub mod reader;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use cache::DatasetCache;
pub use columns::ColumnRoles;
pub use normalize::{NormalizeOutcome, NormalizeStats, normalize};
pub use reader::{RawTable, read_raw_table};
