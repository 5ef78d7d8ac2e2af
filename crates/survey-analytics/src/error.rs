//! Error types for the survey analytics core.
//!
//! Every failure the loader, cleaner and aggregation engine can raise is a
//! variant of [`AnalyticsError`]. Errors serialize to `{ code, message }` so an
//! external presentation layer can display them without matching on Rust types.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for loading, cleaning and aggregating survey data.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Source file is absent at load time.
    #[error("Dataset not found at {}", .0.display())]
    NotFound(PathBuf),

    /// The tabular content could not be parsed.
    #[error("Failed to parse dataset {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// A `Timestamp` value did not match the expected format.
    #[error("Invalid timestamp {value:?} at row {row} (expected format '{format}')")]
    TimestampParse {
        row: usize,
        value: String,
        format: String,
    },

    /// Metric id outside the registry.
    #[error("Metric '{metric}' not in available metrics: {}", .available.join(", "))]
    UnknownMetric {
        metric: String,
        available: Vec<String>,
    },

    /// A categorical column holds a value its schema does not declare.
    #[error("Unexpected value {value:?} in column '{column}' (allowed: {})", .allowed.join(", "))]
    UnexpectedCategory {
        column: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalyticsError>,
    },
}

impl AnalyticsError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalyticsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build an [`AnalyticsError::UnknownMetric`] listing the valid ids.
    pub fn unknown_metric(metric: impl Into<String>, available: &[&str]) -> Self {
        AnalyticsError::UnknownMetric {
            metric: metric.into(),
            available: available.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Stable error code for callers outside Rust.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Parse { .. } | Self::TimestampParse { .. } => "PARSE_ERROR",
            Self::UnknownMetric { .. } => "UNKNOWN_METRIC",
            Self::UnexpectedCategory { .. } => "UNEXPECTED_CATEGORY",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Load and parse failures are fatal; a bad metric id can be corrected by the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::UnknownMetric { .. } | Self::InvalidConfig(_) => true,
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

impl Serialize for AnalyticsError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalyticsError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl From<crate::config::ConfigValidationError> for AnalyticsError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        AnalyticsError::InvalidConfig(err.to_string())
    }
}

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalyticsError::Polars(e).with_context(context))
    }
}
