// Handler for staging an import: read -> normalize -> gate -> validate
use std::path::Path;

use crate::data::SourceFormat;
use crate::error::EngineResult;
use crate::validation::{validate, ValidationIssue, ValidationReport};

use super::helpers::{file_name_of, stage};
use super::DashboardSession;

// Unsupported extensions are turned away before any I/O happens.
fn reject_unsupported(session: &mut DashboardSession, file_name: &str) -> ValidationReport {
    tracing::warn!(file_name, "Rejected import with unsupported extension");
    session.staged = None;
    ValidationReport::rejected(ValidationIssue::UnsupportedFormat(file_name.to_string()))
}

pub async fn handle_stage_file(session: &mut DashboardSession, path: &Path) -> EngineResult<ValidationReport> {
    session.staged = None;
    let file_name = file_name_of(path);
    let Some(format) = SourceFormat::from_file_name(&file_name) else {
        return Ok(reject_unsupported(session, &file_name));
    };

    let bytes = tokio::fs::read(path).await?;
    stage_and_validate(session, &file_name, format, bytes)
}

pub fn handle_stage_bytes(session: &mut DashboardSession, file_name: &str, bytes: Vec<u8>) -> EngineResult<ValidationReport> {
    session.staged = None;
    let Some(format) = SourceFormat::from_file_name(file_name) else {
        return Ok(reject_unsupported(session, file_name));
    };
    stage_and_validate(session, file_name, format, bytes)
}

fn stage_and_validate(
    session: &mut DashboardSession,
    file_name: &str,
    format: SourceFormat,
    bytes: Vec<u8>,
) -> EngineResult<ValidationReport> {
    let staged = stage(file_name, format, bytes)?;
    let report = validate(&staged.raw);

    if report.ok {
        tracing::info!(file_name, rows = staged.rows.len(), warnings = report.warnings.len(), "Staged import passed validation");
    } else {
        tracing::warn!(file_name, rows = staged.rows.len(), errors = report.errors.len(), "Staged import failed validation");
    }
    session.staged = Some(staged);
    Ok(report)
}
