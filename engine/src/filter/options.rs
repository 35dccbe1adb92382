// Choices offered by the exact-match filters
use std::collections::BTreeSet;

use serde::Serialize;
use shared::CanonicalRow;

/// Distinct, sorted, non-empty values per exact-match dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub companies: Vec<String>,
    pub tax_ids: Vec<String>,
    pub accounts: Vec<String>,
}

impl FilterOptions {
    pub fn from_rows(rows: &[CanonicalRow]) -> Self {
        let distinct = |pick: fn(&CanonicalRow) -> &str| {
            rows.iter()
                .map(pick)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect::<Vec<_>>()
        };
        FilterOptions {
            companies: distinct(|row| row.company_name.as_str()),
            tax_ids: distinct(|row| row.tax_id.as_str()),
            accounts: distinct(|row| row.account.as_str()),
        }
    }
}
