//! Single-metric rates per country: the popup value and the world map.

use super::Scope;
use super::distribution::percentage;
use crate::dataset::CleanedDataset;
use crate::error::Result;
use crate::metrics::{self, MetricDefinition};
use crate::schema::columns;
use serde::Serialize;
use std::collections::BTreeMap;

/// Rate of one metric within one country filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricValue {
    /// Percentage of respondents giving the positive answer (0–100, 2 dp).
    pub value: f64,
    /// Rows in the filtered subset.
    pub respondents: usize,
}

/// One country of the choropleth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethRow {
    #[serde(rename = "Country")]
    pub country: String,
    pub value: f64,
    pub respondents: usize,
}

/// Rate of `metric_id` among the respondents of `country` (all when `None`).
///
/// A country without rows gives `{ value: 0.0, respondents: 0 }`.
///
/// # Errors
///
/// [`crate::AnalyticsError::UnknownMetric`] for an id outside the registry.
pub fn country_metric_value(
    ds: &CleanedDataset,
    country: Option<&str>,
    metric_id: &str,
) -> Result<MetricValue> {
    let metric = metrics::lookup(metric_id)?;
    let rows = Scope::from_filter(country).rows(ds)?;
    metric_value_over(ds, &rows, metric)
}

/// Rate of `metric` among the given row indices.
pub(crate) fn metric_value_over(
    ds: &CleanedDataset,
    rows: &[usize],
    metric: &MetricDefinition,
) -> Result<MetricValue> {
    let answers = ds.str_values(metric.column)?;
    let positives = rows
        .iter()
        .filter(|&&row| answers[row] == Some(metric.positive))
        .count();

    Ok(MetricValue {
        value: percentage(positives, rows.len()),
        respondents: rows.len(),
    })
}

/// Rate of `metric_id` for every country present in the data, sorted by name.
///
/// Countries absent from the data are absent from the result.
pub fn choropleth_data(ds: &CleanedDataset, metric_id: &str) -> Result<Vec<ChoroplethRow>> {
    let metric = metrics::lookup(metric_id)?;
    let countries = ds.str_values(columns::COUNTRY)?;
    let answers = ds.str_values(metric.column)?;

    let mut tallies: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for (country, answer) in countries.iter().zip(answers.iter()) {
        let Some(country) = country else { continue };
        let (positives, total) = tallies.entry(country).or_default();
        *total += 1;
        if *answer == Some(metric.positive) {
            *positives += 1;
        }
    }

    Ok(tallies
        .into_iter()
        .map(|(country, (positives, total))| ChoroplethRow {
            country: country.to_string(),
            value: percentage(positives, total),
            respondents: total,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use crate::test_support::testland;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_testland_treatment_rate() {
        let ds = testland();
        let result = country_metric_value(&ds, Some("Testland"), "treatment_rate").unwrap();
        assert_eq!(
            result,
            MetricValue {
                value: 66.67,
                respondents: 3
            }
        );
    }

    #[test]
    fn test_metric_value_over_explicit_rows() {
        let ds = testland();
        let metric = metrics::lookup("treatment_rate").unwrap();

        // Testland rows: treatment Yes, No, Yes
        let value = metric_value_over(&ds, &[0, 2], metric).unwrap();
        assert_eq!(value, MetricValue { value: 100.0, respondents: 2 });

        let empty = metric_value_over(&ds, &[], metric).unwrap();
        assert_eq!(empty, MetricValue { value: 0.0, respondents: 0 });
    }

    #[test]
    fn test_global_rate() {
        let ds = testland();
        let result = country_metric_value(&ds, None, "treatment_rate").unwrap();
        assert_eq!(result.respondents, 11);
        assert_eq!(result.value, 63.64);

        let labelled = country_metric_value(&ds, Some("Global"), "treatment_rate").unwrap();
        assert_eq!(labelled, result);
    }

    #[test]
    fn test_nonexistent_country_is_zero() {
        let ds = testland();
        let result =
            country_metric_value(&ds, Some("Nonexistent Country"), "treatment_rate").unwrap();
        assert_eq!(
            result,
            MetricValue {
                value: 0.0,
                respondents: 0
            }
        );
    }

    #[test]
    fn test_unknown_metric() {
        let ds = testland();
        let err = country_metric_value(&ds, Some("Canada"), "joy_rate").unwrap_err();
        assert!(matches!(err, AnalyticsError::UnknownMetric { .. }));
        assert!(err.to_string().contains("joy_rate"));
    }

    #[test]
    fn test_high_mood_swings_uses_high() {
        let ds = testland();
        let result = country_metric_value(&ds, Some("Canada"), "high_mood_swings_rate").unwrap();
        assert_eq!(result.value, 33.33);
    }

    #[test]
    fn test_unknown_self_employment_not_counted() {
        let ds = testland();
        let result = country_metric_value(&ds, Some("Poland"), "self_employment_rate").unwrap();
        assert_eq!(result.value, 0.0);
        assert_eq!(result.respondents, 2);
    }

    #[test]
    fn test_choropleth_sorted_by_country() {
        let ds = testland();
        let rows = choropleth_data(&ds, "treatment_rate").unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["Canada", "Poland", "Testland", "United States"]);

        assert_eq!(rows[1].value, 50.0);
        assert_eq!(rows[1].respondents, 2);
    }

    #[test]
    fn test_choropleth_matches_country_metric_value() {
        let ds = testland();
        for metric in crate::metrics::available_metrics() {
            for row in choropleth_data(&ds, metric.id).unwrap() {
                let single = country_metric_value(&ds, Some(&row.country), metric.id).unwrap();
                assert_eq!(row.value, single.value, "{} / {}", metric.id, row.country);
                assert_eq!(row.respondents, single.respondents);
            }
        }
    }

    #[test]
    fn test_choropleth_serializes_country_key() {
        let ds = testland();
        let rows = choropleth_data(&ds, "treatment_rate").unwrap();
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["Country"], "Canada");
        assert_eq!(json["respondents"], 3);
    }
}
