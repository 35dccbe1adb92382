use std::collections::HashMap;

use serde::Serialize;
use shared::CanonicalRow;

use super::kpis::pct;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyTotals {
    pub company: String,
    pub issued_value: f64,
    pub settled_value: f64,
}

/// Sums issued and settled value per company name, in first-seen order.
/// Rows with an empty company name are grouped under `empty_label`.
pub fn group_by_company(rows: &[CanonicalRow], empty_label: &str) -> Vec<CompanyTotals> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CompanyTotals> = Vec::new();

    for row in rows {
        let key = if row.company_name.is_empty() { empty_label } else { row.company_name.as_str() };
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(CompanyTotals {
                company: key.to_string(),
                issued_value: 0.0,
                settled_value: 0.0,
            });
            groups.len() - 1
        });
        groups[slot].issued_value += row.issued_value;
        groups[slot].settled_value += row.settled_value;
    }
    groups
}

/// Largest settled value first, truncated to `n`. Ties keep first-seen order.
pub fn top_companies(rows: &[CanonicalRow], n: usize, empty_label: &str) -> Vec<CompanyTotals> {
    let mut groups = group_by_company(rows, empty_label);
    groups.sort_by(|a, b| b.settled_value.total_cmp(&a.settled_value));
    groups.truncate(n);
    groups
}

/// Each group's percentage of the settled total across `groups`.
pub fn settled_shares(groups: &[CompanyTotals]) -> Vec<f64> {
    let total: f64 = groups.iter().map(|g| g.settled_value).sum();
    groups.iter().map(|g| pct(g.settled_value, total)).collect()
}
