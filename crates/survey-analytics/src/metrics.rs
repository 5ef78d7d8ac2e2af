//! Registry of the twelve survey indicators.
//!
//! A metric's "rate" is the share of respondents whose answer in `column`
//! equals `positive`. The ids are the stable keys external callers (UI
//! dropdowns, the CLI) pass to the aggregation engine.

use crate::error::{AnalyticsError, Result};
use crate::schema::columns;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Immutable definition of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDefinition {
    /// Stable identifier, e.g. `treatment_rate`.
    pub id: &'static str,
    /// Source column.
    pub column: &'static str,
    /// Answer counted as positive.
    pub positive: &'static str,
    /// Short axis label.
    pub label: &'static str,
    /// Chart title.
    pub title: &'static str,
}

const fn metric(
    id: &'static str,
    column: &'static str,
    positive: &'static str,
    label: &'static str,
    title: &'static str,
) -> MetricDefinition {
    MetricDefinition {
        id,
        column,
        positive,
        label,
        title,
    }
}

pub const SELF_EMPLOYMENT_RATE: &str = "self_employment_rate";
pub const TREATMENT_RATE: &str = "treatment_rate";
pub const FAMILY_HISTORY_RATE: &str = "family_history_rate";
pub const GROWING_STRESS_RATE: &str = "growing_stress_rate";
pub const CHANGES_HABITS_RATE: &str = "changes_habits_rate";
pub const MENTAL_HEALTH_HISTORY_RATE: &str = "mental_health_history_rate";
pub const HIGH_MOOD_SWINGS_RATE: &str = "high_mood_swings_rate";
pub const WORK_INTEREST_RATE: &str = "work_interest_rate";
pub const COPING_STRUGGLES_RATE: &str = "coping_struggles_rate";
pub const SOCIAL_WEAKNESS_RATE: &str = "social_weakness_rate";
pub const CARE_OPTIONS_AVAILABLE_RATE: &str = "care_options_available_rate";
pub const MENTAL_HEALTH_INTERVIEW_RATE: &str = "mental_health_interview_rate";

static METRICS: [MetricDefinition; 12] = [
    metric(
        SELF_EMPLOYMENT_RATE,
        columns::SELF_EMPLOYED,
        "Yes",
        "Self-Employment",
        "Self-Employment",
    ),
    metric(
        TREATMENT_RATE,
        columns::TREATMENT,
        "Yes",
        "Treatment",
        "Seeking Treatment for Mental Health Issues",
    ),
    metric(
        FAMILY_HISTORY_RATE,
        columns::FAMILY_HISTORY,
        "Yes",
        "Family History",
        "Family History of Mental Health Issues",
    ),
    metric(
        GROWING_STRESS_RATE,
        columns::GROWING_STRESS,
        "Yes",
        "Growing Stress",
        "Perceived Growing Stress Levels",
    ),
    metric(
        CHANGES_HABITS_RATE,
        columns::CHANGES_HABITS,
        "Yes",
        "Changes in Habits",
        "Perceived Changes in Habits",
    ),
    metric(
        MENTAL_HEALTH_HISTORY_RATE,
        columns::MENTAL_HEALTH_HISTORY,
        "Yes",
        "Mental Health History",
        "Personal History of Mental Health Issues",
    ),
    metric(
        HIGH_MOOD_SWINGS_RATE,
        columns::MOOD_SWINGS,
        "High",
        "High Mood Swings",
        "Perceived High Mood Swings",
    ),
    metric(
        WORK_INTEREST_RATE,
        columns::WORK_INTEREST,
        "Yes",
        "Work Interest",
        "Reported Work Interest",
    ),
    metric(
        COPING_STRUGGLES_RATE,
        columns::COPING_STRUGGLES,
        "Yes",
        "Coping Struggles",
        "Reported Struggle to Cope",
    ),
    metric(
        SOCIAL_WEAKNESS_RATE,
        columns::SOCIAL_WEAKNESS,
        "Yes",
        "Social Weakness",
        "Reported Social Weakness",
    ),
    metric(
        CARE_OPTIONS_AVAILABLE_RATE,
        columns::CARE_OPTIONS,
        "Yes",
        "Care Options",
        "Awareness of Care Options Provided by Employer",
    ),
    metric(
        MENTAL_HEALTH_INTERVIEW_RATE,
        columns::MENTAL_HEALTH_INTERVIEW,
        "Yes",
        "Interview Willingness",
        "Willingness to Bring Up Mental Health in an Interview",
    ),
];

static METRIC_INDEX: Lazy<HashMap<&'static str, &'static MetricDefinition>> =
    Lazy::new(|| METRICS.iter().map(|m| (m.id, m)).collect());

/// All twelve metric definitions, in registry order.
pub fn available_metrics() -> &'static [MetricDefinition] {
    &METRICS
}

/// Metric ids in registry order.
pub fn metric_ids() -> Vec<&'static str> {
    METRICS.iter().map(|m| m.id).collect()
}

/// Look up a metric by id.
///
/// # Errors
///
/// [`AnalyticsError::UnknownMetric`] naming `id` and listing every valid id.
pub fn lookup(id: &str) -> Result<&'static MetricDefinition> {
    METRIC_INDEX
        .get(id)
        .copied()
        .ok_or_else(|| AnalyticsError::unknown_metric(id, &metric_ids()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::REQUIRED_COLUMNS;

    #[test]
    fn test_registry_has_twelve_unique_ids() {
        assert_eq!(available_metrics().len(), 12);
        assert_eq!(METRIC_INDEX.len(), 12);
    }

    #[test]
    fn test_every_id_round_trips() {
        for definition in available_metrics() {
            let found = lookup(definition.id).unwrap();
            assert_eq!(found, definition);
            assert!(REQUIRED_COLUMNS.contains(&found.column));
        }
    }

    #[test]
    fn test_unknown_metric() {
        let err = lookup("happiness_rate").unwrap_err();
        match err {
            AnalyticsError::UnknownMetric { metric, available } => {
                assert_eq!(metric, "happiness_rate");
                assert_eq!(available.len(), 12);
                assert_eq!(available[1], "treatment_rate");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_high_mood_swings_positive_value() {
        let m = lookup(HIGH_MOOD_SWINGS_RATE).unwrap();
        assert_eq!(m.column, "Mood_Swings");
        assert_eq!(m.positive, "High");
    }
}
