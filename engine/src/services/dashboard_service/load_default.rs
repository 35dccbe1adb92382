// Handlers for loading and restoring the default dataset
use crate::data::dataset::Dataset;
use crate::data::SourceFormat;
use crate::error::{EngineError, EngineResult};
use crate::validation::ValidationReport;

use super::helpers::{file_name_of, ingest};
use super::DashboardSession;

// The default dataset is trusted: it is normalized and gated but not validated.
pub async fn handle_load_default(session: &mut DashboardSession) -> EngineResult<usize> {
    let path = session.settings.default_dataset_path.clone();
    let file_name = file_name_of(&path);
    let format = SourceFormat::from_file_name(&file_name)
        .ok_or_else(|| EngineError::UnsupportedFormat(file_name.clone()))?;

    let bytes = tokio::fs::read(&path).await?;
    let batch = ingest(format, bytes)?;
    let rows_loaded = batch.rows.len();

    session.install_dataset(Dataset::new(batch.rows));
    tracing::info!(path = %path.display(), rows = rows_loaded, has_date = session.dataset.has_date(), "Default dataset loaded");
    Ok(rows_loaded)
}

pub async fn handle_restore_default(session: &mut DashboardSession) -> EngineResult<ValidationReport> {
    handle_load_default(session).await?;
    Ok(ValidationReport::accepted("default dataset restored"))
}
