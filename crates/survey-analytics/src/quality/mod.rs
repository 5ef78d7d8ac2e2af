//! Data quality analysis module.
//!
//! Summarizes every column of a raw or cleaned survey frame: missing values,
//! cardinality, empty strings and the most frequent answers, so problems in a
//! new data drop are visible before the dashboard aggregates it.

mod analyzer;
mod report;

pub use analyzer::DataQualityAnalyzer;
pub use report::{ColumnQuality, ColumnSummary, DataQualityReport, NULL_MARKER};
