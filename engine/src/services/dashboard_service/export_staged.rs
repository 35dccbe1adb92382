// Handler for exporting the staged import as canonical CSV
use crate::data::export::to_canonical_csv;
use crate::error::{EngineError, EngineResult};
use crate::validation::{validate, ValidationReport};

use super::DashboardSession;

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Exported(String),
    /// The staged import does not validate; nothing was written.
    Blocked(ValidationReport),
}

pub fn handle_export_staged(session: &DashboardSession) -> EngineResult<ExportOutcome> {
    let staged = session.staged.as_ref().ok_or(EngineError::NothingStaged)?;

    let report = validate(&staged.raw);
    if !report.ok {
        tracing::warn!(file_name = %staged.file_name, "Export blocked by validation errors");
        return Ok(ExportOutcome::Blocked(report));
    }

    let csv = to_canonical_csv(&staged.rows)?;
    tracing::info!(file_name = %staged.file_name, rows = staged.rows.len(), "Exported staged import as canonical CSV");
    Ok(ExportOutcome::Exported(csv))
}
