//! Time spent indoors, employed vs self-employed respondents.

use super::distribution::Distribution;
use super::{Scope, compare};
use crate::dataset::CleanedDataset;
use crate::error::Result;
use crate::schema::{DAYS_INDOORS_ORDER, columns};
use serde::Serialize;

const EMPLOYED: &str = "No";
const SELF_EMPLOYED: &str = "Yes";

/// One country's half of the butterfly chart.
///
/// Respondents whose employment status is unknown belong to neither group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButterflySide {
    pub name: String,
    pub employed: Distribution,
    pub self_employed: Distribution,
    pub employed_respondents: usize,
    pub self_employed_respondents: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButterflyData {
    pub days_indoors_order: Vec<&'static str>,
    pub country1: ButterflySide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country2: Option<ButterflySide>,
}

/// `Days_Indoors` distribution per employment group for `country1` (Global
/// when absent) and, if given, `country2`.
pub fn butterfly_data(
    ds: &CleanedDataset,
    country1: Option<&str>,
    country2: Option<&str>,
) -> Result<ButterflyData> {
    let (country1, country2) = compare(country1, country2, |scope| side_for(ds, scope))?;
    Ok(ButterflyData {
        days_indoors_order: DAYS_INDOORS_ORDER.to_vec(),
        country1,
        country2,
    })
}

fn side_for(ds: &CleanedDataset, scope: Scope<'_>) -> Result<ButterflySide> {
    let rows = scope.rows(ds)?;
    let status = ds.str_values(columns::SELF_EMPLOYED)?;
    let days = ds.str_values(columns::DAYS_INDOORS)?;

    let employed = days_for_status(&rows, &status, &days, EMPLOYED);
    let self_employed = days_for_status(&rows, &status, &days, SELF_EMPLOYED);

    Ok(ButterflySide {
        name: scope.label().to_string(),
        employed_respondents: employed.len(),
        self_employed_respondents: self_employed.len(),
        employed: Distribution::from_values(&DAYS_INDOORS_ORDER, employed),
        self_employed: Distribution::from_values(&DAYS_INDOORS_ORDER, self_employed),
    })
}

fn days_for_status<'a>(
    rows: &[usize],
    status: &[Option<&str>],
    days: &[Option<&'a str>],
    wanted: &str,
) -> Vec<Option<&'a str>> {
    rows.iter()
        .filter(|&&row| status[row] == Some(wanted))
        .map(|&row| days[row])
        .collect()
}
