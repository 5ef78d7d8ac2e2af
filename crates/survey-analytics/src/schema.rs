//! Column names and the declared category schema of the survey.
//!
//! The category sets here are static configuration: the cleaner checks every
//! observed value against them instead of inferring a fresh set per load.

/// Raw column names, exactly as they appear in the CSV header.
pub mod columns {
    pub const TIMESTAMP: &str = "Timestamp";
    pub const GENDER: &str = "Gender";
    pub const COUNTRY: &str = "Country";
    pub const OCCUPATION: &str = "Occupation";
    pub const SELF_EMPLOYED: &str = "self_employed";
    pub const FAMILY_HISTORY: &str = "family_history";
    pub const TREATMENT: &str = "treatment";
    pub const DAYS_INDOORS: &str = "Days_Indoors";
    pub const GROWING_STRESS: &str = "Growing_Stress";
    pub const CHANGES_HABITS: &str = "Changes_Habits";
    pub const MENTAL_HEALTH_HISTORY: &str = "Mental_Health_History";
    pub const MOOD_SWINGS: &str = "Mood_Swings";
    pub const COPING_STRUGGLES: &str = "Coping_Struggles";
    pub const WORK_INTEREST: &str = "Work_Interest";
    pub const SOCIAL_WEAKNESS: &str = "Social_Weakness";
    pub const MENTAL_HEALTH_INTERVIEW: &str = "mental_health_interview";
    pub const CARE_OPTIONS: &str = "care_options";
}

use columns::*;

/// Every column the loader requires in the header.
pub const REQUIRED_COLUMNS: [&str; 17] = [
    TIMESTAMP,
    GENDER,
    COUNTRY,
    OCCUPATION,
    SELF_EMPLOYED,
    FAMILY_HISTORY,
    TREATMENT,
    DAYS_INDOORS,
    GROWING_STRESS,
    CHANGES_HABITS,
    MENTAL_HEALTH_HISTORY,
    MOOD_SWINGS,
    COPING_STRUGGLES,
    WORK_INTEREST,
    SOCIAL_WEAKNESS,
    MENTAL_HEALTH_INTERVIEW,
    CARE_OPTIONS,
];

/// Label used when no country filter is applied.
pub const GLOBAL_LABEL: &str = "Global";

/// `Days_Indoors` buckets from least to most time spent indoors.
pub const DAYS_INDOORS_ORDER: [&str; 5] = [
    "Go out Every day",
    "1-14 days",
    "15-30 days",
    "31-60 days",
    "More than 2 months",
];

/// `Social_Weakness` answers in presentation order.
pub const SOCIAL_WEAKNESS_ORDER: [&str; 3] = ["No", "Maybe", "Yes"];

/// `mental_health_interview` answers in presentation order.
pub const INTERVIEW_RESPONSE_ORDER: [&str; 3] = ["No", "Maybe", "Yes"];

const YES_NO: &[&str] = &["No", "Yes"];
const NO_MAYBE_YES: &[&str] = &["No", "Maybe", "Yes"];

/// Legal values of one categorical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySet {
    /// Closed domain: values outside the list are unexpected.
    Fixed(&'static [&'static str]),
    /// Open domain (e.g. country names): the observed values are the set.
    Observed,
}

/// Declared schema entry for a categorical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySpec {
    pub column: &'static str,
    pub set: CategorySet,
}

impl CategorySpec {
    const fn fixed(column: &'static str, values: &'static [&'static str]) -> Self {
        Self {
            column,
            set: CategorySet::Fixed(values),
        }
    }

    /// Whether `value` is admissible without a warning.
    pub fn allows(&self, value: &str) -> bool {
        match self.set {
            CategorySet::Fixed(values) => values.contains(&value),
            CategorySet::Observed => true,
        }
    }

    /// Declared values, empty for open-domain columns.
    pub fn declared(&self) -> &'static [&'static str] {
        match self.set {
            CategorySet::Fixed(values) => values,
            CategorySet::Observed => &[],
        }
    }
}

/// The sixteen categorical columns and their declared category sets.
///
/// `self_employed` includes the fill label used for missing answers; the
/// cleaner adds a custom label to the set when configured differently.
pub const CATEGORY_SCHEMA: [CategorySpec; 16] = [
    CategorySpec::fixed(GENDER, &["Female", "Male"]),
    CategorySpec {
        column: COUNTRY,
        set: CategorySet::Observed,
    },
    CategorySpec::fixed(
        OCCUPATION,
        &["Business", "Corporate", "Housewife", "Others", "Student"],
    ),
    CategorySpec::fixed(SELF_EMPLOYED, &["No", "Yes", "Unknown"]),
    CategorySpec::fixed(FAMILY_HISTORY, YES_NO),
    CategorySpec::fixed(TREATMENT, YES_NO),
    CategorySpec::fixed(DAYS_INDOORS, &DAYS_INDOORS_ORDER),
    CategorySpec::fixed(GROWING_STRESS, NO_MAYBE_YES),
    CategorySpec::fixed(CHANGES_HABITS, NO_MAYBE_YES),
    CategorySpec::fixed(MENTAL_HEALTH_HISTORY, NO_MAYBE_YES),
    CategorySpec::fixed(MOOD_SWINGS, &["Low", "Medium", "High"]),
    CategorySpec::fixed(COPING_STRUGGLES, YES_NO),
    CategorySpec::fixed(WORK_INTEREST, NO_MAYBE_YES),
    CategorySpec::fixed(SOCIAL_WEAKNESS, &SOCIAL_WEAKNESS_ORDER),
    CategorySpec::fixed(MENTAL_HEALTH_INTERVIEW, &INTERVIEW_RESPONSE_ORDER),
    CategorySpec::fixed(CARE_OPTIONS, &["No", "Not sure", "Yes"]),
];

/// Look up the declared schema of a categorical column.
pub fn category_spec(column: &str) -> Option<&'static CategorySpec> {
    CATEGORY_SCHEMA.iter().find(|spec| spec.column == column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_covers_sixteen_distinct_columns() {
        let mut names: Vec<&str> = CATEGORY_SCHEMA.iter().map(|s| s.column).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 16);
        assert!(!names.contains(&TIMESTAMP));
    }

    #[test]
    fn test_every_categorical_column_is_required() {
        for spec in &CATEGORY_SCHEMA {
            assert!(REQUIRED_COLUMNS.contains(&spec.column), "{}", spec.column);
        }
    }

    #[test]
    fn test_allows() {
        let days = category_spec(DAYS_INDOORS).unwrap();
        assert!(days.allows("31-60 days"));
        assert!(!days.allows("Sometimes"));

        let country = category_spec(COUNTRY).unwrap();
        assert!(country.allows("Atlantis"));
        assert!(country.declared().is_empty());
    }

    #[test]
    fn test_days_indoors_order_is_domain_not_alphabetical() {
        assert_eq!(DAYS_INDOORS_ORDER[0], "Go out Every day");
        assert_eq!(DAYS_INDOORS_ORDER[4], "More than 2 months");
        let mut sorted = DAYS_INDOORS_ORDER;
        sorted.sort_unstable();
        assert_ne!(sorted, DAYS_INDOORS_ORDER);
    }
}
