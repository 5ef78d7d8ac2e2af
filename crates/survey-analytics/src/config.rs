//! Configuration for loading and cleaning the survey dataset.
//!
//! Uses the builder pattern so the CLI and tests can override only the
//! settings they care about.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the survey CSV, relative to the project root.
pub const DEFAULT_DATASET_PATH: &str = "data/mental_dataset.csv";

/// Format of the raw `Timestamp` column (`MM/DD/YYYY HH:MM`).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Category substituted for missing `self_employed` answers.
pub const DEFAULT_UNKNOWN_LABEL: &str = "Unknown";

/// Configuration for the dataset cache and the cleaner.
///
/// # Example
///
/// ```rust,ignore
/// use survey_analytics::config::AnalyticsConfig;
///
/// let config = AnalyticsConfig::builder()
///     .project_root("/srv/dashboard")
///     .strict_categories(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Directory relative dataset paths are resolved against.
    /// Default: "."
    pub project_root: PathBuf,

    /// Path of the survey CSV, relative to `project_root` unless absolute.
    /// Default: "data/mental_dataset.csv"
    pub dataset_path: PathBuf,

    /// chrono format string for the `Timestamp` column.
    /// Default: "%m/%d/%Y %H:%M"
    pub timestamp_format: String,

    /// Replacement for missing `self_employed` values.
    /// Default: "Unknown"
    pub unknown_label: String,

    /// Reject values outside a column's declared category set.
    /// When false, such values are admitted with a warning.
    /// Default: true
    pub strict_categories: bool,

    /// Rows the CSV reader samples to infer column types.
    /// `Some(0)` reads every column as text.
    /// Default: Some(0)
    pub infer_schema_length: Option<usize>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            unknown_label: DEFAULT_UNKNOWN_LABEL.to_string(),
            strict_categories: true,
            infer_schema_length: Some(0),
        }
    }
}

impl AnalyticsConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalyticsConfigBuilder {
        AnalyticsConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.dataset_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyField("dataset_path".to_string()));
        }

        if self.timestamp_format.trim().is_empty() {
            return Err(ConfigValidationError::EmptyField(
                "timestamp_format".to_string(),
            ));
        }

        if self.unknown_label.trim().is_empty() {
            return Err(ConfigValidationError::EmptyField("unknown_label".to_string()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Configuration field '{0}' must not be empty")]
    EmptyField(String),
}

/// Builder for [`AnalyticsConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalyticsConfigBuilder {
    project_root: Option<PathBuf>,
    dataset_path: Option<PathBuf>,
    timestamp_format: Option<String>,
    unknown_label: Option<String>,
    strict_categories: Option<bool>,
    infer_schema_length: Option<Option<usize>>,
}

impl AnalyticsConfigBuilder {
    /// Set the directory relative dataset paths are resolved against.
    pub fn project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Set the dataset path (relative to the project root unless absolute).
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    /// Set the chrono format used to parse `Timestamp`.
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = Some(format.into());
        self
    }

    /// Set the label used for missing `self_employed` answers.
    pub fn unknown_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_label = Some(label.into());
        self
    }

    /// Enable or disable rejection of undeclared category values.
    pub fn strict_categories(mut self, strict: bool) -> Self {
        self.strict_categories = Some(strict);
        self
    }

    /// Set how many rows the CSV reader samples for type inference.
    pub fn infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalyticsConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalyticsConfig, ConfigValidationError> {
        let defaults = AnalyticsConfig::default();
        let config = AnalyticsConfig {
            project_root: self.project_root.unwrap_or(defaults.project_root),
            dataset_path: self.dataset_path.unwrap_or(defaults.dataset_path),
            timestamp_format: self.timestamp_format.unwrap_or(defaults.timestamp_format),
            unknown_label: self.unknown_label.unwrap_or(defaults.unknown_label),
            strict_categories: self.strict_categories.unwrap_or(defaults.strict_categories),
            infer_schema_length: self
                .infer_schema_length
                .unwrap_or(defaults.infer_schema_length),
        };

        config.validate()?;
        Ok(config)
    }
}
