//! Mental-Health Survey Analytics Library
//!
//! The data core behind a survey dashboard built with Rust and Polars.
//!
//! # Overview
//!
//! This library loads a mental-health survey CSV once, cleans and types it,
//! and derives the percentage views the dashboard charts need:
//!
//! - **Loading**: [`DatasetCache`] reads the CSV on first use and shares it behind an `Arc`
//! - **Cleaning**: [`SurveyCleaner`] fills missing employment status, parses timestamps
//!   and checks every categorical column against a static [`schema`]
//! - **Metric Registry**: twelve indicators, each a (column, positive answer) pair
//! - **Aggregation**: choropleth, radar, butterfly and stacked-bar views keyed by country
//! - **Data Quality**: per-column null, cardinality and value-frequency summaries
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use survey_analytics::{AnalyticsConfig, DatasetCache};
//! use survey_analytics::aggregation::{butterfly_data, choropleth_data, radar_data};
//!
//! let config = AnalyticsConfig::builder()
//!     .project_root("/srv/dashboard")
//!     .build()?;
//! let cache = DatasetCache::new(config);
//! let ds = cache.cleaned()?;
//!
//! let world = choropleth_data(&ds, "treatment_rate")?;
//! let radar = radar_data(&ds, Some("United States"), Some("India"))?;
//! let butterfly = butterfly_data(&ds, None, None)?; // labelled "Global"
//!
//! println!("{}", serde_json::to_string_pretty(&radar)?);
//! ```
//!
//! # Country filters
//!
//! Every view takes zero, one or two country names. No name selects all
//! respondents under the label `"Global"`; a name without rows yields
//! zero-valued percentages rather than an error. Use
//! [`CleanedDataset::has_country`] to tell a typo from an empty result.
//!
//! # Errors
//!
//! All fallible operations return [`error::Result`]. Errors serialize to
//! `{ code, message }` for display by the presentation layer.

pub mod aggregation;
pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod quality;
pub mod schema;

#[cfg(test)]
mod test_support;

// Re-exports for convenient access
pub use aggregation::{
    ButterflyData, ChoroplethRow, Distribution, MetricValue, RadarData, StackedBarData, Scope,
    butterfly_data, choropleth_data, country_metric_value, radar_data, stacked_bar_data,
};
pub use cleaner::SurveyCleaner;
pub use config::{AnalyticsConfig, AnalyticsConfigBuilder, ConfigValidationError};
pub use dataset::{CleanedDataset, Dataset};
pub use error::{AnalyticsError, Result as AnalyticsResult, ResultExt};
pub use loader::{DatasetCache, read_dataset};
pub use metrics::{MetricDefinition, available_metrics, metric_ids};
pub use quality::{DataQualityAnalyzer, DataQualityReport};
