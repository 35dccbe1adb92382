// Filter engine. Always runs over the full dataset, never over a previous view.
pub mod options;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::CanonicalRow;

use crate::data::dataset::Dataset;

pub use options::FilterOptions;

/// Every field is optional; `None` (or a blank string) means no constraint.
/// All constraints are ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub company: Option<String>,
    pub tax_id: Option<String>,
    pub account: Option<String>,
    /// Case-insensitive substring over "account | company | tax id".
    pub search: Option<String>,
    pub min_issued_value: Option<f64>,
    pub max_issued_value: Option<f64>,
    pub min_settled_value: Option<f64>,
    pub max_settled_value: Option<f64>,
    /// Inclusive. Ignored when the dataset has no dates at all.
    pub date_from: Option<NaiveDate>,
    /// Inclusive of the whole day. Ignored when the dataset has no dates at all.
    pub date_to: Option<NaiveDate>,
}

// Separator between fields in the free-text haystack. A value containing
// " | " itself can still match across fields.
const SEARCH_SEPARATOR: &str = " | ";

fn lowered(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

// A NaN or infinite bound constrains nothing, same as an absent one.
fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    let min = min.filter(|m| m.is_finite());
    let max = max.filter(|m| m.is_finite());
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

// Filters with their text normalized once and their date bounds resolved
// against the dataset.
struct CompiledFilter<'a> {
    spec: &'a FilterSpec,
    company: Option<String>,
    tax_id: Option<String>,
    account: Option<String>,
    search: Option<String>,
    date_bounds: Option<(Option<NaiveDate>, Option<NaiveDate>)>,
}

impl<'a> CompiledFilter<'a> {
    fn new(spec: &'a FilterSpec, has_date: bool) -> Self {
        let date_bounds = (has_date && (spec.date_from.is_some() || spec.date_to.is_some()))
            .then_some((spec.date_from, spec.date_to));
        CompiledFilter {
            spec,
            company: lowered(&spec.company),
            tax_id: lowered(&spec.tax_id),
            account: lowered(&spec.account),
            search: lowered(&spec.search),
            date_bounds,
        }
    }

    fn matches(&self, row: &CanonicalRow) -> bool {
        let exact = |wanted: &Option<String>, actual: &str| {
            wanted.as_ref().map_or(true, |w| actual.to_lowercase() == *w)
        };
        if !exact(&self.company, &row.company_name)
            || !exact(&self.tax_id, &row.tax_id)
            || !exact(&self.account, &row.account)
        {
            return false;
        }

        if let Some(query) = &self.search {
            let haystack = [&row.account, &row.company_name, &row.tax_id]
                .iter()
                .map(|field| field.to_lowercase())
                .collect::<Vec<_>>()
                .join(SEARCH_SEPARATOR);
            if !haystack.contains(query.as_str()) {
                return false;
            }
        }

        let spec = self.spec;
        if !within(row.issued_value, spec.min_issued_value, spec.max_issued_value)
            || !within(row.settled_value, spec.min_settled_value, spec.max_settled_value)
        {
            return false;
        }

        if let Some((from, to)) = self.date_bounds {
            // Undated rows cannot satisfy a date bound.
            let Some(date) = row.reference_date else {
                return false;
            };
            // Rows carry whole days, so `date <= to` covers up to 23:59:59 of `to`.
            if from.is_some_and(|from| date < from) || to.is_some_and(|to| date > to) {
                return false;
            }
        }
        true
    }
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        *self == FilterSpec::default()
    }

    /// Rows of `dataset` matching every constraint, in dataset order.
    pub fn apply(&self, dataset: &Dataset) -> Vec<CanonicalRow> {
        let compiled = CompiledFilter::new(self, dataset.has_date());
        dataset
            .rows()
            .iter()
            .filter(|row| compiled.matches(row))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(account: &str, company: &str, tax_id: &str, issued_value: f64) -> CanonicalRow {
        CanonicalRow {
            account: account.to_string(),
            company_name: company.to_string(),
            tax_id: tax_id.to_string(),
            issued_value,
            settled_value: issued_value / 2.0,
            ..Default::default()
        }
    }

    fn dated(mut r: CanonicalRow, y: i32, m: u32, d: u32) -> CanonicalRow {
        r.reference_date = NaiveDate::from_ymd_opt(y, m, d);
        r
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            row("001", "ACME", "11", 10.0),
            row("002", "Beta", "22", 50.0),
            row("003", "Gamma", "33", 90.0),
        ])
    }

    #[test]
    fn test_empty_spec_keeps_everything() {
        let spec = FilterSpec::default();
        assert!(spec.is_empty());
        assert_eq!(spec.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_min_issued_value_preserves_order() {
        let spec = FilterSpec { min_issued_value: Some(20.0), ..Default::default() };
        let accounts: Vec<_> = spec.apply(&sample()).into_iter().map(|r| r.account).collect();
        assert_eq!(accounts, vec!["002", "003"]);
    }

    #[test]
    fn test_numeric_bounds_are_inclusive() {
        let spec = FilterSpec {
            min_issued_value: Some(50.0),
            max_issued_value: Some(90.0),
            max_settled_value: Some(25.0),
            ..Default::default()
        };
        let result = spec.apply(&sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].account, "002");
    }

    #[test]
    fn test_non_finite_bounds_impose_nothing() {
        let spec = FilterSpec {
            min_issued_value: Some(f64::NAN),
            max_settled_value: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(spec.apply(&sample()).len(), 3);

        let spec = FilterSpec {
            min_settled_value: Some(f64::NEG_INFINITY),
            max_issued_value: Some(20.0),
            ..Default::default()
        };
        let accounts: Vec<_> = spec.apply(&sample()).into_iter().map(|r| r.account).collect();
        assert_eq!(accounts, vec!["001"]);
    }

    #[test]
    fn test_exact_match_is_case_insensitive_and_trimmed() {
        let spec = FilterSpec { company: Some("  acme ".to_string()), ..Default::default() };
        assert_eq!(spec.apply(&sample()).len(), 1);

        let spec = FilterSpec { company: Some("acm".to_string()), ..Default::default() };
        assert!(spec.apply(&sample()).is_empty());
    }

    #[test]
    fn test_blank_strings_impose_nothing() {
        let spec = FilterSpec { account: Some("   ".to_string()), ..Default::default() };
        assert_eq!(spec.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_search_spans_account_company_and_tax_id() {
        let by_company = FilterSpec { search: Some("BET".to_string()), ..Default::default() };
        assert_eq!(by_company.apply(&sample())[0].account, "002");

        let by_tax_id = FilterSpec { search: Some("33".to_string()), ..Default::default() };
        assert_eq!(by_tax_id.apply(&sample())[0].account, "003");

        // "1 | acme" only exists across the field boundary
        let across = FilterSpec { search: Some("1 | acme".to_string()), ..Default::default() };
        assert_eq!(across.apply(&sample()).len(), 1);

        let across_without_separator = FilterSpec { search: Some("001acme".to_string()), ..Default::default() };
        assert!(across_without_separator.apply(&sample()).is_empty());
    }

    #[test]
    fn test_predicates_are_anded() {
        let spec = FilterSpec {
            company: Some("gamma".to_string()),
            max_issued_value: Some(50.0),
            ..Default::default()
        };
        assert!(spec.apply(&sample()).is_empty());
    }

    #[test]
    fn test_undated_rows_excluded_by_any_date_bound() {
        let dataset = Dataset::new(vec![
            dated(row("001", "A", "1", 1.0), 2024, 1, 15),
            row("002", "B", "2", 1.0),
        ]);
        for spec in [
            FilterSpec { date_from: NaiveDate::from_ymd_opt(1900, 1, 1), ..Default::default() },
            FilterSpec { date_to: NaiveDate::from_ymd_opt(2999, 12, 31), ..Default::default() },
        ] {
            let accounts: Vec<_> = spec.apply(&dataset).into_iter().map(|r| r.account).collect();
            assert_eq!(accounts, vec!["001"]);
        }
    }

    #[test]
    fn test_date_to_includes_whole_day() {
        let dataset = Dataset::new(vec![
            dated(row("001", "A", "1", 1.0), 2024, 1, 15),
            dated(row("002", "B", "2", 1.0), 2024, 1, 16),
        ]);
        let spec = FilterSpec {
            date_from: NaiveDate::from_ymd_opt(2024, 1, 15),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 15),
            ..Default::default()
        };
        let result = spec.apply(&dataset);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].account, "001");
    }

    #[test]
    fn test_date_bounds_ignored_without_dated_rows() {
        let spec = FilterSpec { date_from: NaiveDate::from_ymd_opt(2024, 1, 1), ..Default::default() };
        assert_eq!(spec.apply(&sample()).len(), 3);
    }
}
