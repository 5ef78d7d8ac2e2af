//! Category validation against the declared schema.

use crate::error::{AnalyticsError, Result};
use crate::schema::{CategorySet, CategorySpec};
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::warn;

/// Check every value of `series` against `spec` and return the column's legal
/// categories: declared values that actually occur, in declared order.
///
/// `extra_allowed` names values admitted in addition to the declared set (the
/// configured fill label). Undeclared values fail in strict mode; otherwise
/// they are admitted and appended in sorted order after a warning.
pub(crate) fn observed_categories(
    spec: &CategorySpec,
    series: &Series,
    extra_allowed: &[&str],
    strict: bool,
) -> Result<Vec<String>> {
    let observed: BTreeSet<&str> = series.str()?.into_iter().flatten().collect();

    match spec.set {
        CategorySet::Observed => Ok(observed.into_iter().map(str::to_string).collect()),
        CategorySet::Fixed(declared) => {
            let mut legal: Vec<String> = declared
                .iter()
                .filter(|value| observed.contains(*value))
                .map(|value| value.to_string())
                .collect();

            for value in observed {
                if declared.contains(&value) {
                    continue;
                }
                if extra_allowed.contains(&value) {
                    legal.push(value.to_string());
                    continue;
                }
                if strict {
                    let mut allowed: Vec<String> =
                        declared.iter().map(|v| v.to_string()).collect();
                    allowed.extend(extra_allowed.iter().map(|v| v.to_string()));
                    return Err(AnalyticsError::UnexpectedCategory {
                        column: spec.column.to_string(),
                        value: value.to_string(),
                        allowed,
                    });
                }
                warn!(
                    "Admitting undeclared value {:?} in column '{}'",
                    value, spec.column
                );
                legal.push(value.to_string());
            }

            Ok(legal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{category_spec, columns};

    fn days(values: &[&str]) -> Series {
        Series::new(columns::DAYS_INDOORS.into(), values)
    }

    #[test]
    fn test_declared_order_kept() {
        let spec = category_spec(columns::DAYS_INDOORS).unwrap();
        let series = days(&["More than 2 months", "1-14 days", "Go out Every day", "1-14 days"]);

        let legal = observed_categories(spec, &series, &[], true).unwrap();
        assert_eq!(legal, vec!["Go out Every day", "1-14 days", "More than 2 months"]);
    }

    #[test]
    fn test_strict_rejects_undeclared() {
        let spec = category_spec(columns::DAYS_INDOORS).unwrap();
        let series = days(&["1-14 days", "Sometimes"]);

        let err = observed_categories(spec, &series, &[], true).unwrap_err();
        assert_eq!(err.error_code(), "UNEXPECTED_CATEGORY");
        assert!(err.to_string().contains("Sometimes"));
    }

    #[test]
    fn test_lenient_admits_undeclared() {
        let spec = category_spec(columns::DAYS_INDOORS).unwrap();
        let series = days(&["Sometimes", "1-14 days"]);

        let legal = observed_categories(spec, &series, &[], false).unwrap();
        assert_eq!(legal, vec!["1-14 days", "Sometimes"]);
    }

    #[test]
    fn test_extra_allowed_label() {
        let spec = category_spec(columns::SELF_EMPLOYED).unwrap();
        let series = Series::new(columns::SELF_EMPLOYED.into(), &["No", "Not stated"]);

        let legal = observed_categories(spec, &series, &["Not stated"], true).unwrap();
        assert_eq!(legal, vec!["No", "Not stated"]);
    }

    #[test]
    fn test_open_domain_sorted() {
        let spec = category_spec(columns::COUNTRY).unwrap();
        let series = Series::new(columns::COUNTRY.into(), &[Some("Poland"), None, Some("Canada")]);

        let legal = observed_categories(spec, &series, &[], true).unwrap();
        assert_eq!(legal, vec!["Canada", "Poland"]);
    }
}
