//! Interview willingness stacked within each social-weakness answer.

use super::distribution::Distribution;
use super::{Scope, compare};
use crate::dataset::CleanedDataset;
use crate::error::Result;
use crate::schema::{INTERVIEW_RESPONSE_ORDER, SOCIAL_WEAKNESS_ORDER, columns};
use serde::Serialize;
use serde::ser::SerializeMap;

/// One country's bars: a `mental_health_interview` distribution per
/// `Social_Weakness` answer.
///
/// Serializes flat, e.g. `{"name": "Canada", "No": {...}, "Maybe": {...}, "Yes": {...}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedBarSide {
    pub name: String,
    pub groups: Vec<(&'static str, Distribution)>,
}

impl StackedBarSide {
    /// Interview distribution for one `Social_Weakness` answer.
    pub fn group(&self, social_weakness: &str) -> Option<&Distribution> {
        self.groups
            .iter()
            .find(|(answer, _)| *answer == social_weakness)
            .map(|(_, dist)| dist)
    }
}

impl Serialize for StackedBarSide {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.groups.len() + 1))?;
        map.serialize_entry("name", &self.name)?;
        for (answer, dist) in &self.groups {
            map.serialize_entry(answer, dist)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedBarData {
    pub interview_responses: Vec<&'static str>,
    pub social_weakness_order: Vec<&'static str>,
    pub country1: StackedBarSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country2: Option<StackedBarSide>,
}

pub fn stacked_bar_data(
    ds: &CleanedDataset,
    country1: Option<&str>,
    country2: Option<&str>,
) -> Result<StackedBarData> {
    let (country1, country2) = compare(country1, country2, |scope| side_for(ds, scope))?;
    Ok(StackedBarData {
        interview_responses: INTERVIEW_RESPONSE_ORDER.to_vec(),
        social_weakness_order: SOCIAL_WEAKNESS_ORDER.to_vec(),
        country1,
        country2,
    })
}

fn side_for(ds: &CleanedDataset, scope: Scope<'_>) -> Result<StackedBarSide> {
    let rows = scope.rows(ds)?;
    let weakness = ds.str_values(columns::SOCIAL_WEAKNESS)?;
    let interview = ds.str_values(columns::MENTAL_HEALTH_INTERVIEW)?;

    let groups = SOCIAL_WEAKNESS_ORDER
        .iter()
        .map(|&answer| {
            let answers = rows
                .iter()
                .filter(|&&row| weakness[row] == Some(answer))
                .map(|&row| interview[row]);
            (
                answer,
                Distribution::from_values(&INTERVIEW_RESPONSE_ORDER, answers),
            )
        })
        .collect();

    Ok(StackedBarSide {
        name: scope.label().to_string(),
        groups,
    })
}
