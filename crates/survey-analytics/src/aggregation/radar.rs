//! Four-axis wellbeing profile, optionally compared between two countries.

use super::country::metric_value_over;
use super::{Scope, compare};
use crate::dataset::CleanedDataset;
use crate::error::Result;
use crate::metrics::{self, MetricDefinition};
use serde::Serialize;

/// Metrics plotted on the radar axes, in axis order.
pub const RADAR_METRICS: [&str; 4] = [
    metrics::GROWING_STRESS_RATE,
    metrics::HIGH_MOOD_SWINGS_RATE,
    metrics::COPING_STRUGGLES_RATE,
    metrics::SOCIAL_WEAKNESS_RATE,
];

/// One polygon of the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub name: String,
    /// One percentage per axis, aligned with [`RadarData::metrics`].
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarData {
    /// Axis labels.
    pub metrics: Vec<&'static str>,
    pub country1: RadarSeries,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country2: Option<RadarSeries>,
}

/// Radar profile for `country1` (Global when absent) and, if given, `country2`.
pub fn radar_data(
    ds: &CleanedDataset,
    country1: Option<&str>,
    country2: Option<&str>,
) -> Result<RadarData> {
    let definitions = RADAR_METRICS
        .iter()
        .map(|id| metrics::lookup(id))
        .collect::<Result<Vec<_>>>()?;

    let (country1, country2) = compare(country1, country2, |scope| {
        series_for(ds, scope, &definitions)
    })?;

    Ok(RadarData {
        metrics: definitions.iter().map(|m| m.label).collect(),
        country1,
        country2,
    })
}

fn series_for(
    ds: &CleanedDataset,
    scope: Scope<'_>,
    definitions: &[&'static MetricDefinition],
) -> Result<RadarSeries> {
    let rows = scope.rows(ds)?;
    let values = definitions
        .iter()
        .map(|metric| Ok(metric_value_over(ds, &rows, metric)?.value))
        .collect::<Result<Vec<_>>>()?;

    Ok(RadarSeries {
        name: scope.label().to_string(),
        values,
    })
}
