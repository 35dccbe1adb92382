// Helper functions shared by the dashboard_service handlers
use std::path::Path;

use crate::data::dataset::StagedImport;
use crate::data::normalizer::{normalize_records, NormalizedBatch};
use crate::data::{read_records, SourceFormat};
use crate::error::EngineResult;

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Reader + normalizer + emptiness gate, nothing else.
pub fn ingest(format: SourceFormat, bytes: Vec<u8>) -> EngineResult<NormalizedBatch> {
    let records = read_records(format, bytes)?;
    let parsed = records.len();
    let batch = normalize_records(records);
    tracing::debug!(parsed, kept = batch.rows.len(), dropped = batch.dropped, ?format, "Normalized input records");
    Ok(batch)
}

pub fn stage(file_name: &str, format: SourceFormat, bytes: Vec<u8>) -> EngineResult<StagedImport> {
    Ok(StagedImport::new(file_name, ingest(format, bytes)?))
}
