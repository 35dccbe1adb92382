// Materialized datasets. Both types are built once and replaced wholesale,
// never edited in place.
use shared::{CanonicalRow, RawRecord};

use super::normalizer::NormalizedBatch;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<CanonicalRow>,
    has_date: bool,
}

impl Dataset {
    pub fn new(rows: Vec<CanonicalRow>) -> Self {
        let has_date = rows.iter().any(|row| row.reference_date.is_some());
        Dataset { rows, has_date }
    }

    pub fn rows(&self) -> &[CanonicalRow] {
        &self.rows
    }

    /// True iff at least one row carries a reference date. Date-range
    /// filtering is only active when this is set.
    pub fn has_date(&self) -> bool {
        self.has_date
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A fresh import waiting for validation and confirmation.
#[derive(Debug, Clone)]
pub struct StagedImport {
    pub file_name: String,
    pub rows: Vec<CanonicalRow>,
    /// Pre-coercion records, index-aligned with `rows`.
    pub raw: Vec<RawRecord>,
}

impl StagedImport {
    pub fn new(file_name: impl Into<String>, batch: NormalizedBatch) -> Self {
        StagedImport {
            file_name: file_name.into(),
            rows: batch.rows,
            raw: batch.raw,
        }
    }

    pub fn into_dataset(self) -> Dataset {
        Dataset::new(self.rows)
    }
}
