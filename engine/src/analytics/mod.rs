// Aggregates shown on the dashboard: headline KPIs and per-company totals
pub mod grouping;
pub mod kpis;

pub use grouping::{group_by_company, settled_shares, top_companies, CompanyTotals};
pub use kpis::{pct, Kpis};
