//! Raw and cleaned survey datasets.
//!
//! Both wrap a Polars [`DataFrame`]. A [`CleanedDataset`] can only be built by
//! the cleaner, so holding one proves the typing invariants hold: no missing
//! `self_employed`, a parsed `Timestamp`, and categorical columns stored as
//! `Enum`s over their category sets.

use crate::error::{AnalyticsError, Result};
use crate::schema::columns;
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Survey data as read from storage, before cleaning.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Wrap an in-memory frame.
    pub fn new(df: DataFrame) -> Self {
        Self { df, source: None }
    }

    pub(crate) fn with_source(df: DataFrame, source: impl Into<PathBuf>) -> Self {
        Self {
            df,
            source: Some(source.into()),
        }
    }

    /// The underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// File the dataset was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of respondent records.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.df.width()
    }

    pub fn into_frame(self) -> DataFrame {
        self.df
    }

    /// Same provenance, different contents.
    pub(crate) fn with_frame(&self, df: DataFrame) -> Self {
        Self {
            df,
            source: self.source.clone(),
        }
    }
}

/// Survey data after missing-value fill, timestamp parsing and category checks.
///
/// Immutable once built; share it across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    data: Dataset,
    categories: BTreeMap<String, Vec<String>>,
}

impl CleanedDataset {
    pub(crate) fn new(data: Dataset, categories: BTreeMap<String, Vec<String>>) -> Self {
        Self { data, categories }
    }

    /// The cleaned data as a plain [`Dataset`] (e.g. to clean it again).
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// The underlying frame.
    pub fn frame(&self) -> &DataFrame {
        self.data.frame()
    }

    /// Number of respondent records.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Legal categories of one column, in declared order.
    pub fn categories(&self, column: &str) -> Option<&[String]> {
        self.categories.get(column).map(Vec::as_slice)
    }

    /// Every categorical column with its legal categories.
    pub fn category_sets(&self) -> &BTreeMap<String, Vec<String>> {
        &self.categories
    }

    /// Distinct country names present in the data, sorted.
    pub fn countries(&self) -> Result<Vec<String>> {
        let values = self.str_values(columns::COUNTRY)?;
        let distinct: BTreeSet<&str> = values.into_iter().flatten().collect();
        Ok(distinct.into_iter().map(str::to_string).collect())
    }

    /// Whether at least one respondent reported `country`.
    ///
    /// Aggregations treat an unknown country as an empty subset; use this to
    /// tell a misspelled name apart from a country with no answers.
    pub fn has_country(&self, country: &str) -> Result<bool> {
        Ok(self
            .str_values(columns::COUNTRY)?
            .into_iter()
            .any(|value| value == Some(country)))
    }

    /// Borrow a text or categorical column as one optional value per row.
    pub(crate) fn str_values(&self, column: &str) -> Result<Vec<Option<&str>>> {
        let series = self
            .frame()
            .column(column)
            .map_err(|_| AnalyticsError::ColumnNotFound(column.to_string()))?
            .as_materialized_series();

        match series.dtype() {
            DataType::Enum(_, _) | DataType::Categorical(_, _) => {
                Ok(match series.dtype().cat_physical()? {
                    CategoricalPhysical::U8 => series.cat8()?.iter_str().collect(),
                    CategoricalPhysical::U16 => series.cat16()?.iter_str().collect(),
                    CategoricalPhysical::U32 => series.cat32()?.iter_str().collect(),
                })
            }
            _ => Ok(series.str()?.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::testland;
    use polars::prelude::DataType;

    #[test]
    fn test_countries_sorted_and_distinct() {
        let ds = testland();
        assert_eq!(
            ds.countries().unwrap(),
            vec!["Canada", "Poland", "Testland", "United States"]
        );
    }

    #[test]
    fn test_has_country() {
        let ds = testland();
        assert!(ds.has_country("Canada").unwrap());
        assert!(!ds.has_country("Canadaa").unwrap());
    }

    #[test]
    fn test_str_values_reads_enum_columns() {
        let ds = testland();
        let country = ds.frame().column("Country").unwrap();
        assert!(matches!(country.dtype(), DataType::Enum(_, _)));

        let values = ds.str_values("Country").unwrap();
        assert_eq!(values.len(), 11);
        assert_eq!(values.iter().filter(|v| **v == Some("Testland")).count(), 3);
    }

    #[test]
    fn test_str_values_unknown_column() {
        let ds = testland();
        let err = ds.str_values("Favourite_Colour").unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }
}
