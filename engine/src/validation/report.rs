use serde::Serialize;
use thiserror::Error;

/// One finding of the validator. Blocking issues land in
/// `ValidationReport::errors`, advisory ones in `warnings`.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("file is empty or has no valid rows")]
    EmptyDataset,

    #[error("unsupported format '{0}': use .xlsx or .csv")]
    UnsupportedFormat(String),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("non-numeric values in numeric columns: {0} occurrence(s)")]
    NonNumericValues(usize),

    #[error("extra columns ignored: {}", .0.join(", "))]
    ExtraColumns(Vec<String>),

    #[error("negative values detected: {0} occurrence(s)")]
    NegativeValues(usize),
}

impl ValidationIssue {
    pub fn is_blocking(&self) -> bool {
        !matches!(self, ValidationIssue::ExtraColumns(_) | ValidationIssue::NegativeValues(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub summary: String,
    pub row_count: usize,
    /// Non-empty, non-numeric cells found in the numeric columns.
    pub invalid_count: usize,
    /// Numeric cells that coerce to a negative amount.
    pub negative_count: usize,
}

impl ValidationReport {
    /// A report carrying a single blocking issue and nothing else.
    pub fn rejected(issue: ValidationIssue) -> Self {
        ValidationReport {
            ok: false,
            errors: vec![issue],
            ..Default::default()
        }
    }

    /// An ok report used to acknowledge a dataset swap.
    pub fn accepted(summary: impl Into<String>) -> Self {
        ValidationReport {
            ok: true,
            summary: summary.into(),
            ..Default::default()
        }
    }

    /// Routes an issue to `errors` or `warnings`.
    pub fn push(&mut self, issue: ValidationIssue) {
        if issue.is_blocking() {
            self.errors.push(issue);
        } else {
            self.warnings.push(issue);
        }
    }

    pub fn extra_column_count(&self) -> usize {
        self.warnings
            .iter()
            .map(|issue| match issue {
                ValidationIssue::ExtraColumns(cols) => cols.len(),
                _ => 0,
            })
            .sum()
    }
}
