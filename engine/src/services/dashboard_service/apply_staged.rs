// Handler for promoting the staged import to the full dataset
use crate::error::{EngineError, EngineResult};
use crate::validation::{validate, ValidationReport};

use super::DashboardSession;

// All or nothing: the staged rows replace the dataset only if a fresh
// validation passes, otherwise the active dataset stays as it was.
pub fn handle_apply_staged(session: &mut DashboardSession) -> EngineResult<ValidationReport> {
    let staged = session.staged.as_ref().ok_or(EngineError::NothingStaged)?;

    let report = validate(&staged.raw);
    if !report.ok {
        tracing::warn!(file_name = %staged.file_name, errors = report.errors.len(), "Refusing to apply staged import");
        return Ok(report);
    }

    let staged = session.staged.take().ok_or(EngineError::NothingStaged)?;
    let file_name = staged.file_name.clone();
    session.install_dataset(staged.into_dataset());
    tracing::info!(file_name = %file_name, rows = session.dataset.len(), "Staged import applied");
    Ok(ValidationReport::accepted("dataset applied"))
}
