// Canonical CSV export: fixed header, one line per row, '\n' terminated.
use csv::{QuoteStyle, Terminator, WriterBuilder};
use shared::CanonicalRow;

use super::normalizer::CanonicalField;
use crate::error::{EngineError, EngineResult};

pub fn to_canonical_csv(rows: &[CanonicalRow]) -> EngineResult<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CanonicalField::REQUIRED.iter().map(|field| field.column_name()))?;
    for row in rows {
        wtr.write_record([
            row.account.clone(),
            row.company_name.clone(),
            row.tax_id.clone(),
            row.issued_count.to_string(),
            row.issued_value.to_string(),
            row.settled_count.to_string(),
            row.settled_value.to_string(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| EngineError::ProcessingError(format!("Failed to flush CSV export: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| EngineError::ProcessingError(format!("CSV export is not valid UTF-8: {}", e)))
}
