//! Shared in-memory fixture for unit tests.
//!
//! Eleven respondents across four countries. `Testland` has three rows with
//! `self_employed = [No, No, Yes]` and `treatment = [Yes, No, Yes]`; every
//! `Poland` respondent left `self_employed` blank.

use crate::cleaner::SurveyCleaner;
use crate::dataset::{CleanedDataset, Dataset};
use polars::prelude::*;

pub(crate) fn raw_frame() -> DataFrame {
    df!(
        "Timestamp" => &[
            "8/27/2014 11:29", "8/27/2014 11:31", "8/27/2014 11:32",
            "8/28/2014 9:10", "8/28/2014 9:12", "8/28/2014 9:15",
            "8/29/2014 14:00", "8/29/2014 14:05", "8/29/2014 14:07",
            "8/30/2014 8:00", "8/30/2014 8:01",
        ],
        "Gender" => &[
            "Female", "Female", "Male", "Male", "Female", "Male",
            "Female", "Male", "Female", "Male", "Female",
        ],
        "Country" => &[
            "Testland", "Testland", "Testland", "Canada", "Canada", "Canada",
            "United States", "United States", "United States", "Poland", "Poland",
        ],
        "Occupation" => &[
            "Corporate", "Corporate", "Business", "Student", "Housewife", "Others",
            "Corporate", "Corporate", "Student", "Business", "Corporate",
        ],
        "self_employed" => &[
            Some("No"), Some("No"), Some("Yes"), Some("No"), Some("Yes"), Some("No"),
            Some("No"), Some("Yes"), None, None, None,
        ],
        "family_history" => &[
            "No", "Yes", "Yes", "No", "Yes", "No", "Yes", "No", "No", "Yes", "No",
        ],
        "treatment" => &[
            "Yes", "No", "Yes", "No", "Yes", "Yes", "Yes", "No", "Yes", "No", "Yes",
        ],
        "Days_Indoors" => &[
            "1-14 days", "Go out Every day", "More than 2 months",
            "15-30 days", "31-60 days", "1-14 days",
            "Go out Every day", "1-14 days", "15-30 days",
            "31-60 days", "More than 2 months",
        ],
        "Growing_Stress" => &[
            "Yes", "Yes", "No", "Maybe", "Yes", "No", "Yes", "No", "Maybe", "Yes", "No",
        ],
        "Changes_Habits" => &[
            "No", "Maybe", "Yes", "Yes", "No", "Maybe", "Yes", "No", "No", "Yes", "No",
        ],
        "Mental_Health_History" => &[
            "Yes", "No", "Maybe", "No", "Yes", "Maybe", "Yes", "No", "Yes", "No", "Maybe",
        ],
        "Mood_Swings" => &[
            "Medium", "High", "Low", "High", "Low", "Medium",
            "High", "Low", "Medium", "High", "Low",
        ],
        "Coping_Struggles" => &[
            "No", "Yes", "No", "Yes", "No", "Yes", "Yes", "No", "Yes", "No", "Yes",
        ],
        "Work_Interest" => &[
            "No", "Maybe", "Yes", "No", "Yes", "Maybe", "No", "Yes", "No", "Maybe", "No",
        ],
        "Social_Weakness" => &[
            "Yes", "No", "No", "Maybe", "Yes", "No", "Yes", "Maybe", "No", "Yes", "Maybe",
        ],
        "mental_health_interview" => &[
            "No", "Maybe", "No", "Yes", "Maybe", "No", "Yes", "No", "No", "Maybe", "No",
        ],
        "care_options" => &[
            "Not sure", "No", "Yes", "Yes", "No", "Not sure",
            "Yes", "No", "Yes", "No", "Not sure",
        ],
    )
    .expect("fixture frame")
}

pub(crate) fn raw_dataset() -> Dataset {
    Dataset::new(raw_frame())
}

pub(crate) fn testland() -> CleanedDataset {
    SurveyCleaner::default()
        .clean(&raw_dataset())
        .expect("fixture cleans")
}
