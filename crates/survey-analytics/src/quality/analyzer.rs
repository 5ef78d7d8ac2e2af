use super::report::{ColumnQuality, ColumnSummary, DataQualityReport, NULL_MARKER};
use crate::aggregation::round2;
use crate::error::Result;
use chrono::DateTime;
use polars::prelude::*;
use tracing::debug;

/// Most frequent values kept per text column.
const TOP_VALUES: usize = 10;

pub struct DataQualityAnalyzer;

impl DataQualityAnalyzer {
    /// Summarize every column of `df`, in column order.
    pub fn analyze(df: &DataFrame) -> Result<DataQualityReport> {
        let mut columns = Vec::with_capacity(df.width());
        for col in df.get_columns() {
            columns.push(Self::analyze_column(col.as_materialized_series())?);
        }

        debug!(
            "Quality analysis: {} columns, {} with nulls",
            columns.len(),
            columns.iter().filter(|c| c.null_count > 0).count()
        );

        Ok(DataQualityReport {
            rows: df.height(),
            columns,
        })
    }

    fn analyze_column(series: &Series) -> Result<ColumnQuality> {
        let total_rows = series.len();
        let null_count = series.null_count();
        let null_pct = if total_rows == 0 {
            0.0
        } else {
            round2(null_count as f64 / total_rows as f64 * 100.0)
        };
        let unique_count = series.drop_nulls().n_unique()?;

        let (summary, empty_string_count) = match series.dtype() {
            DataType::String | DataType::Enum(_, _) | DataType::Categorical(_, _) => {
                Self::text_summary(series)?
            }
            DataType::Datetime(unit, _) => (Self::temporal_summary(series, *unit)?, 0),
            dtype if dtype.is_primitive_numeric() => (Self::numeric_summary(series)?, 0),
            _ => (ColumnSummary::Other, 0),
        };

        Ok(ColumnQuality {
            name: series.name().to_string(),
            dtype: series.dtype().to_string(),
            total_rows,
            non_null_count: total_rows - null_count,
            null_count,
            null_pct,
            unique_count,
            empty_string_count,
            summary,
        })
    }

    fn text_summary(series: &Series) -> Result<(ColumnSummary, usize)> {
        let text = series.cast(&DataType::String)?;
        let counts_df = text
            .drop_nulls()
            .value_counts(true, false, "count".into(), false)?;
        let values = counts_df.column(text.name())?.str()?;
        let counts = counts_df.column("count")?.cast(&DataType::UInt64)?;

        let mut top_values: Vec<(String, usize)> = values
            .into_iter()
            .zip(counts.u64()?)
            .filter_map(|(value, count)| Some((value?.to_string(), count? as usize)))
            .collect();
        let empty = top_values
            .iter()
            .find(|(value, _)| value.is_empty())
            .map_or(0, |(_, count)| *count);
        if text.null_count() > 0 {
            top_values.push((NULL_MARKER.to_string(), text.null_count()));
        }

        // value_counts leaves ties unordered
        top_values.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_values.truncate(TOP_VALUES);

        Ok((ColumnSummary::Text { top_values }, empty))
    }

    fn numeric_summary(series: &Series) -> Result<ColumnSummary> {
        let floats = series.cast(&DataType::Float64)?;
        let values = floats.f64()?;

        Ok(ColumnSummary::Numeric {
            min: values.min(),
            max: values.max(),
            mean: values.mean(),
        })
    }

    fn temporal_summary(series: &Series, unit: TimeUnit) -> Result<ColumnSummary> {
        let ticks = series.cast(&DataType::Int64)?;
        let ticks = ticks.i64()?;

        let render = |tick: Option<i64>| -> Option<String> {
            let tick = tick?;
            let instant = match unit {
                TimeUnit::Milliseconds => DateTime::from_timestamp_millis(tick)?,
                TimeUnit::Microseconds => DateTime::from_timestamp_micros(tick)?,
                TimeUnit::Nanoseconds => DateTime::from_timestamp_nanos(tick),
            };
            Some(instant.format("%Y-%m-%d %H:%M").to_string())
        };

        Ok(ColumnSummary::Temporal {
            earliest: render(ticks.min()),
            latest: render(ticks.max()),
        })
    }
}
