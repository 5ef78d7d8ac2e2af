//! Aggregation engine: percentage views of the cleaned survey keyed by country.
//!
//! Every function is a pure read over a [`CleanedDataset`] and returns a fresh
//! value. Country filters follow one rule throughout:
//!
//! - no country, an empty name or `"Global"` selects every respondent and is
//!   labelled `"Global"`
//! - a name with no matching rows (absent or misspelled) yields an empty
//!   subset, so every percentage is `0.0`; it is never an error
//! - an omitted second country leaves the `country2` section out entirely
//!
//! ```rust,ignore
//! use survey_analytics::aggregation::{country_metric_value, radar_data};
//!
//! let us = country_metric_value(&ds, Some("United States"), "treatment_rate")?;
//! let radar = radar_data(&ds, Some("United States"), Some("India"))?;
//! ```

mod butterfly;
mod country;
mod distribution;
mod radar;
mod stacked_bar;

pub use butterfly::{ButterflyData, ButterflySide, butterfly_data};
pub use country::{ChoroplethRow, MetricValue, choropleth_data, country_metric_value};
pub use distribution::Distribution;
pub(crate) use distribution::round2;
pub use radar::{RADAR_METRICS, RadarData, RadarSeries, radar_data};
pub use stacked_bar::{StackedBarData, StackedBarSide, stacked_bar_data};

use crate::dataset::CleanedDataset;
use crate::error::Result;
use crate::schema::{GLOBAL_LABEL, columns};

/// Which respondents an aggregation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// Every respondent.
    Global,
    /// Respondents whose `Country` equals the name exactly.
    Country(&'a str),
}

impl<'a> Scope<'a> {
    /// Interpret a first-country filter; absence means [`Scope::Global`].
    pub fn from_filter(country: Option<&'a str>) -> Self {
        match country.map(str::trim) {
            None | Some("") => Scope::Global,
            Some(name) if name == GLOBAL_LABEL => Scope::Global,
            Some(name) => Scope::Country(name),
        }
    }

    /// Interpret a second-country filter; absence means "no comparison".
    pub fn comparison(country: Option<&'a str>) -> Option<Self> {
        match country.map(str::trim) {
            None | Some("") => None,
            Some(_) => Some(Self::from_filter(country)),
        }
    }

    /// Display name: the country, or `"Global"`.
    pub fn label(&self) -> &'a str {
        match self {
            Scope::Global => GLOBAL_LABEL,
            Scope::Country(name) => *name,
        }
    }

    /// Indices of the rows this scope selects.
    pub(crate) fn rows(&self, ds: &CleanedDataset) -> Result<Vec<usize>> {
        match self {
            Scope::Global => Ok((0..ds.height()).collect()),
            Scope::Country(name) => Ok(ds
                .str_values(columns::COUNTRY)?
                .into_iter()
                .enumerate()
                .filter(|(_, value)| *value == Some(*name))
                .map(|(idx, _)| idx)
                .collect()),
        }
    }
}

/// Build the `country1` section and, when requested, the `country2` section.
pub(crate) fn compare<T>(
    country1: Option<&str>,
    country2: Option<&str>,
    mut build: impl FnMut(Scope<'_>) -> Result<T>,
) -> Result<(T, Option<T>)> {
    let first = build(Scope::from_filter(country1))?;
    let second = match Scope::comparison(country2) {
        Some(scope) => Some(build(scope)?),
        None => None,
    };
    Ok((first, second))
}
