use serde::Serialize;
use std::fmt::Write;

/// Label standing in for null in [`ColumnSummary::Text`] value counts.
pub const NULL_MARKER: &str = "[NULL]";

/// Values listed per column by [`DataQualityReport::render_text`].
const RENDERED_TOP_VALUES: usize = 5;

/// Quality findings for a whole frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQualityReport {
    pub rows: usize,
    pub columns: Vec<ColumnQuality>,
}

/// Quality findings for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnQuality {
    pub name: String,
    pub dtype: String,
    pub total_rows: usize,
    pub non_null_count: usize,
    pub null_count: usize,
    /// Share of nulls, 0–100 rounded to two decimals.
    pub null_pct: f64,
    /// Distinct non-null values.
    pub unique_count: usize,
    pub empty_string_count: usize,
    pub summary: ColumnSummary,
}

/// Dtype-specific part of a column's findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    /// Up to ten most frequent values (nulls included as [`NULL_MARKER`]),
    /// most frequent first.
    Text { top_values: Vec<(String, usize)> },
    Numeric {
        min: Option<f64>,
        max: Option<f64>,
        mean: Option<f64>,
    },
    Temporal {
        earliest: Option<String>,
        latest: Option<String>,
    },
    Other,
}

impl ColumnQuality {
    /// True when the null marker is among the top values.
    pub fn has_null_values(&self) -> bool {
        match &self.summary {
            ColumnSummary::Text { top_values } => {
                top_values.iter().any(|(value, _)| value == NULL_MARKER)
            }
            _ => self.null_count > 0,
        }
    }
}

impl DataQualityReport {
    /// Findings for one column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnQuality> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns with at least one null.
    pub fn columns_with_nulls(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.null_count > 0)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Human-readable report, one block per column.
    pub fn render_text(&self) -> String {
        let rule = "=".repeat(80);
        let mut out = String::new();

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "DATA QUALITY ANALYSIS REPORT - ALL COLUMNS");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "\nDataset Shape: {} rows x {} columns",
            self.rows,
            self.columns.len()
        );
        let _ = writeln!(out, "{}", "-".repeat(80));

        for col in &self.columns {
            let _ = writeln!(out, "\n[{}]", col.name);
            let _ = writeln!(out, "  Data Type: {}", col.dtype);
            let _ = writeln!(
                out,
                "  Non-null: {} | Null: {} ({}%)",
                col.non_null_count, col.null_count, col.null_pct
            );
            let _ = writeln!(out, "  Unique Values: {}", col.unique_count);
            if col.empty_string_count > 0 {
                let _ = writeln!(out, "  Empty Strings: {}", col.empty_string_count);
            }

            match &col.summary {
                ColumnSummary::Text { top_values } => {
                    let _ = writeln!(out, "  Sample Values:");
                    for (value, count) in top_values.iter().take(RENDERED_TOP_VALUES) {
                        let _ = writeln!(out, "    - {value}: {count}");
                    }
                    if top_values.len() > RENDERED_TOP_VALUES {
                        let _ = writeln!(
                            out,
                            "    ... and {} more unique values",
                            top_values.len() - RENDERED_TOP_VALUES
                        );
                    }
                }
                ColumnSummary::Numeric { min, max, mean } => {
                    let fmt = |v: &Option<f64>| v.map_or("n/a".to_string(), |v| format!("{v:.2}"));
                    let _ = writeln!(
                        out,
                        "  Statistics: min={}, max={}, mean={}",
                        fmt(min),
                        fmt(max),
                        fmt(mean)
                    );
                }
                ColumnSummary::Temporal { earliest, latest } => {
                    let _ = writeln!(
                        out,
                        "  Range: {} to {}",
                        earliest.as_deref().unwrap_or("n/a"),
                        latest.as_deref().unwrap_or("n/a")
                    );
                }
                ColumnSummary::Other => {}
            }
        }

        let _ = writeln!(out, "\n{rule}");
        out
    }
}
