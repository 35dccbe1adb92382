// Orchestration layer: the dashboard session owns the active dataset and
// drives the import pipeline.
pub mod dashboard_service;

pub use dashboard_service::{DashboardSession, ExportOutcome};
