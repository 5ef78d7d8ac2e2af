//! Column conversions used by the cleaner.

use crate::error::{AnalyticsError, Result};
use chrono::NaiveDateTime;
use polars::prelude::*;

/// Return the series as a `String` column, casting if necessary.
pub(crate) fn as_text(series: &Series) -> Result<Series> {
    if series.dtype() == &DataType::String {
        Ok(series.clone())
    } else {
        Ok(series.cast(&DataType::String)?)
    }
}

/// Replace null or blank values with `label`.
pub(crate) fn fill_missing_category(series: &Series, label: &str) -> Result<Series> {
    let text = as_text(series)?;
    let filled: Vec<&str> = text
        .str()?
        .into_iter()
        .map(|value| match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => label,
        })
        .collect();

    Ok(Series::new(series.name().clone(), filled))
}

/// Count null or blank values.
pub(crate) fn count_missing(series: &Series) -> Result<usize> {
    let text = as_text(series)?;
    Ok(text
        .str()?
        .into_iter()
        .filter(|value| value.is_none_or(|v| v.trim().is_empty()))
        .count())
}

/// Cast a text column to an `Enum` whose categories are `categories`, in order.
///
/// Every non-null value must already be one of `categories`.
pub(crate) fn to_enum(series: &Series, categories: &[String]) -> Result<Series> {
    let frozen = FrozenCategories::new(categories.iter().map(String::as_str))?;
    Ok(series.cast(&DataType::from_frozen_categories(frozen))?)
}

/// Parse a text column into a millisecond `Datetime` column.
///
/// A column that is already a datetime is returned unchanged. A null or
/// unparseable value fails the whole conversion.
pub(crate) fn parse_timestamps(series: &Series, format: &str) -> Result<Series> {
    if matches!(series.dtype(), DataType::Datetime(_, _)) {
        return Ok(series.clone());
    }

    let text = as_text(series)?;
    let mut millis: Vec<i64> = Vec::with_capacity(text.len());

    for (row, value) in text.str()?.into_iter().enumerate() {
        let raw = value.map(str::trim).unwrap_or_default();
        let parsed = NaiveDateTime::parse_from_str(raw, format).map_err(|_| {
            AnalyticsError::TimestampParse {
                row,
                value: raw.to_string(),
                format: format.to_string(),
            }
        })?;
        millis.push(parsed.and_utc().timestamp_millis());
    }

    let raw_millis = Series::new(series.name().clone(), millis);
    Ok(raw_millis.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?)
}
