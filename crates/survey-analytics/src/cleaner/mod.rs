//! Cleaning and typing of the raw survey dataset.
//!
//! Cleaning performs exactly three steps:
//! - Fill missing `self_employed` answers with the unknown label
//! - Parse `Timestamp` into a datetime column
//! - Validate the sixteen categorical columns against the declared schema and
//!   store each as a Polars `Enum` over its legal categories
//!
//! Duplicates, outliers and other columns are passed through unchanged.

mod categories;
mod converters;

use crate::config::AnalyticsConfig;
use crate::dataset::{CleanedDataset, Dataset};
use crate::error::{AnalyticsError, Result, ResultExt};
use crate::schema::{CATEGORY_SCHEMA, columns};
use categories::observed_categories;
use converters::{as_text, count_missing, fill_missing_category, parse_timestamps, to_enum};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Turns a raw [`Dataset`] into a [`CleanedDataset`].
///
/// Cleaning never mutates its input and is idempotent: cleaning an already
/// cleaned dataset yields an equal dataset.
#[derive(Debug, Clone)]
pub struct SurveyCleaner {
    timestamp_format: String,
    unknown_label: String,
    strict_categories: bool,
}

impl Default for SurveyCleaner {
    fn default() -> Self {
        Self::from_config(&AnalyticsConfig::default())
    }
}

impl SurveyCleaner {
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self {
            timestamp_format: config.timestamp_format.clone(),
            unknown_label: config.unknown_label.clone(),
            strict_categories: config.strict_categories,
        }
    }

    /// Clean and type a raw dataset.
    ///
    /// # Errors
    ///
    /// - [`AnalyticsError::ColumnNotFound`] if `self_employed` or `Timestamp` is absent
    /// - [`AnalyticsError::TimestampParse`] for the first unparseable timestamp
    /// - [`AnalyticsError::UnexpectedCategory`] for an undeclared value in strict mode
    pub fn clean(&self, raw: &Dataset) -> Result<CleanedDataset> {
        let mut df = raw.frame().clone();
        info!("Cleaning survey dataset: {} rows", df.height());

        // 1. self_employed: missing -> unknown label
        let (filled, missing) = {
            let series = required(&df, columns::SELF_EMPLOYED)?;
            (
                fill_missing_category(series, &self.unknown_label)?,
                count_missing(series)?,
            )
        };
        df.with_column(filled)
            .context("Replacing self_employed column")?;
        debug!(
            "Filled {} missing self_employed values with '{}'",
            missing, self.unknown_label
        );

        // 2. Timestamp -> datetime
        let parsed = {
            let series = required(&df, columns::TIMESTAMP)?;
            parse_timestamps(series, &self.timestamp_format)?
        };
        df.with_column(parsed).context("Replacing Timestamp column")?;

        // 3. categorical columns
        let extra_allowed = [self.unknown_label.as_str()];
        let mut categories = BTreeMap::new();
        for spec in &CATEGORY_SCHEMA {
            let text = match df.column(spec.column) {
                Ok(col) => as_text(col.as_materialized_series())?,
                Err(_) => {
                    debug!("Skipping absent categorical column '{}'", spec.column);
                    continue;
                }
            };

            let extra: &[&str] = if spec.column == columns::SELF_EMPLOYED {
                &extra_allowed
            } else {
                &[]
            };
            let legal = observed_categories(spec, &text, extra, self.strict_categories)?;
            debug!("Column '{}': {} categories", spec.column, legal.len());

            let typed = to_enum(&text, &legal)?;
            df.with_column(typed)
                .context(format!("Replacing {} column", spec.column))?;
            categories.insert(spec.column.to_string(), legal);
        }

        info!(
            "Cleaned dataset: {} rows, {} categorical columns",
            df.height(),
            categories.len()
        );

        Ok(CleanedDataset::new(raw.with_frame(df), categories))
    }
}

fn required<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Series> {
    df.column(column)
        .map(|col| col.as_materialized_series())
        .map_err(|_| AnalyticsError::ColumnNotFound(column.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{raw_dataset, raw_frame};

    #[test]
    fn test_self_employed_has_no_missing_after_clean() {
        let cleaned = SurveyCleaner::default().clean(&raw_dataset()).unwrap();
        let values = cleaned.str_values(columns::SELF_EMPLOYED).unwrap();

        assert!(values.iter().all(Option::is_some));
        assert_eq!(
            values.iter().filter(|v| **v == Some("Unknown")).count(),
            3
        );
        assert_eq!(
            cleaned.categories(columns::SELF_EMPLOYED).unwrap(),
            ["No", "Yes", "Unknown"]
        );
    }

    #[test]
    fn test_input_not_mutated() {
        let raw = raw_dataset();
        let _ = SurveyCleaner::default().clean(&raw).unwrap();

        let self_employed = raw.frame().column(columns::SELF_EMPLOYED).unwrap();
        assert_eq!(self_employed.null_count(), 3);
        assert_eq!(
            raw.frame().column(columns::TIMESTAMP).unwrap().dtype(),
            &DataType::String
        );
    }

    #[test]
    fn test_timestamp_parsed() {
        let cleaned = SurveyCleaner::default().clean(&raw_dataset()).unwrap();
        let ts = cleaned.frame().column(columns::TIMESTAMP).unwrap();
        assert!(matches!(ts.dtype(), DataType::Datetime(_, _)));
        assert_eq!(ts.null_count(), 0);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let cleaner = SurveyCleaner::default();
        let once = cleaner.clean(&raw_dataset()).unwrap();
        let twice = cleaner.clean(once.dataset()).unwrap();

        assert!(once.frame().equals_missing(twice.frame()));
        assert_eq!(once.frame().schema(), twice.frame().schema());
        assert_eq!(once.category_sets(), twice.category_sets());
    }

    #[test]
    fn test_categorical_columns_are_enums() {
        let cleaned = SurveyCleaner::default().clean(&raw_dataset()).unwrap();

        for (column, legal) in cleaned.category_sets() {
            let dtype = cleaned.frame().column(column).unwrap().dtype();
            let DataType::Enum(frozen, _) = dtype else {
                panic!("column {column} is {dtype}, expected Enum");
            };
            let order: Vec<&str> = frozen.categories().values_iter().collect();
            assert_eq!(&order, legal, "column {column}");
        }
    }

    #[test]
    fn test_missing_timestamp_column() {
        let df = raw_frame().drop(columns::TIMESTAMP).unwrap();
        let err = SurveyCleaner::default().clean(&Dataset::new(df)).unwrap_err();
        assert!(matches!(err, AnalyticsError::ColumnNotFound(ref c) if c == "Timestamp"));
    }

    #[test]
    fn test_malformed_timestamp_is_fatal() {
        let mut df = raw_frame();
        let mut stamps: Vec<String> = df
            .column(columns::TIMESTAMP)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap().to_string())
            .collect();
        stamps[4] = "28.08.2014 09:12".to_string();
        df.with_column(Series::new(columns::TIMESTAMP.into(), stamps))
            .unwrap();

        let err = SurveyCleaner::default().clean(&Dataset::new(df)).unwrap_err();
        assert!(matches!(err, AnalyticsError::TimestampParse { row: 4, .. }));
    }

    #[test]
    fn test_custom_unknown_label() {
        let config = AnalyticsConfig::builder()
            .unknown_label("Not stated")
            .build()
            .unwrap();
        let cleaned = SurveyCleaner::from_config(&config)
            .clean(&raw_dataset())
            .unwrap();

        assert_eq!(
            cleaned.categories(columns::SELF_EMPLOYED).unwrap(),
            ["No", "Yes", "Not stated"]
        );
    }

    #[test]
    fn test_categories_follow_declared_order() {
        let cleaned = SurveyCleaner::default().clean(&raw_dataset()).unwrap();
        assert_eq!(
            cleaned.categories(columns::MOOD_SWINGS).unwrap(),
            ["Low", "Medium", "High"]
        );
        assert_eq!(cleaned.category_sets().len(), 16);
    }
}
