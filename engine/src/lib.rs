// Engine library root
// Ingestion, validation, aggregation and filtering for the invoice dashboard.
// The `dashboard` binary in main.rs is a thin command-line shell over
// `services::DashboardSession`.

pub mod analytics;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod services;
pub mod validation;

pub use error::{EngineError, EngineResult};
pub use services::{DashboardSession, ExportOutcome};
