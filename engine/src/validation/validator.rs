// Validator over raw (pre-coercion) records.
//
// Structure must match the canonical contract exactly: the header set of the
// first record is compared against the canonical column names, aliases are
// not resolved here. Data hygiene problems (negative amounts, extra columns)
// are advisory only.
use shared::brazilian_format::{is_numeric, parse_number};
use shared::RawRecord;

use super::report::{ValidationIssue, ValidationReport};
use crate::data::normalizer::CanonicalField;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct NumericScan {
    invalid_count: usize,
    negative_count: usize,
}

fn check_columns(first: &RawRecord) -> (Vec<String>, Vec<String>) {
    let required: Vec<&str> = CanonicalField::REQUIRED.iter().map(|f| f.column_name()).collect();
    let present: Vec<&str> = first.columns().collect();

    let missing = required
        .iter()
        .filter(|name| !present.contains(*name))
        .map(|name| name.to_string())
        .collect();
    let extra = present
        .iter()
        .filter(|name| !required.contains(*name))
        .map(|name| name.to_string())
        .collect();
    (missing, extra)
}

fn scan_numbers(records: &[RawRecord]) -> NumericScan {
    let mut scan = NumericScan::default();
    for record in records {
        for field in CanonicalField::NUMERIC {
            let Some(value) = record.get(field.column_name()) else {
                continue;
            };
            if is_numeric(value) == Some(false) {
                scan.invalid_count += 1;
            }
            if parse_number(value) < 0.0 {
                scan.negative_count += 1;
            }
        }
    }
    scan
}

pub fn validate(records: &[RawRecord]) -> ValidationReport {
    let Some(first) = records.first() else {
        return ValidationReport::rejected(ValidationIssue::EmptyDataset);
    };

    let mut report = ValidationReport {
        row_count: records.len(),
        ..Default::default()
    };

    let (missing, extra) = check_columns(first);
    if !missing.is_empty() {
        report.push(ValidationIssue::MissingColumns(missing));
    }
    if !extra.is_empty() {
        report.push(ValidationIssue::ExtraColumns(extra));
    }

    let scan = scan_numbers(records);
    report.invalid_count = scan.invalid_count;
    report.negative_count = scan.negative_count;
    if scan.invalid_count > 0 {
        report.push(ValidationIssue::NonNumericValues(scan.invalid_count));
    }
    if scan.negative_count > 0 {
        report.push(ValidationIssue::NegativeValues(scan.negative_count));
    }

    report.ok = report.errors.is_empty();
    let extra_count = report.extra_column_count();
    report.summary = format!(
        "{} rows | {}{}",
        records.len(),
        if report.ok { "validation OK" } else { "failed" },
        if extra_count > 0 { format!(" | extra columns: {}", extra_count) } else { String::new() }
    );

    tracing::debug!(
        rows = records.len(),
        ok = report.ok,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated staged records"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RawValue;

    fn canonical_record(issued_value: RawValue) -> RawRecord {
        [
            ("account", RawValue::Text("001".to_string())),
            ("companyName", RawValue::Text("ACME".to_string())),
            ("taxId", RawValue::Text("123".to_string())),
            ("issuedCount", RawValue::Number(2.0)),
            ("issuedValue", issued_value),
            ("settledCount", RawValue::Number(1.0)),
            ("settledValue", RawValue::Text("50,25".to_string())),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_valid_records_pass() {
        let report = validate(&[canonical_record(RawValue::Number(100.0))]);
        assert!(report.ok);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.summary, "1 rows | validation OK");
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let report = validate(&[]);
        assert!(!report.ok);
        assert_eq!(report.errors, vec![ValidationIssue::EmptyDataset]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_missing_tax_id_is_an_error() {
        let record: RawRecord = canonical_record(RawValue::Number(1.0))
            .columns()
            .filter(|c| *c != "taxId")
            .map(|c| (c.to_string(), RawValue::Number(1.0)))
            .collect();
        let report = validate(&[record]);
        assert!(!report.ok);
        assert!(report.errors.iter().any(|e| e.to_string().contains("taxId")));
        assert!(report.summary.contains("failed"));
    }

    #[test]
    fn test_non_numeric_value_counts_once() {
        let report = validate(&[canonical_record(RawValue::Text("abc".to_string()))]);
        assert!(!report.ok);
        assert_eq!(report.invalid_count, 1);
        assert_eq!(report.errors, vec![ValidationIssue::NonNumericValues(1)]);
    }

    #[test]
    fn test_brazilian_formatted_amounts_are_numeric() {
        let report = validate(&[canonical_record(RawValue::Text("1.234,56".to_string()))]);
        assert!(report.ok);
        assert_eq!(report.invalid_count, 0);
    }

    #[test]
    fn test_negative_value_is_only_a_warning() {
        let report = validate(&[canonical_record(RawValue::Number(-10.0))]);
        assert!(report.ok);
        assert_eq!(report.negative_count, 1);
        assert_eq!(report.warnings, vec![ValidationIssue::NegativeValues(1)]);
    }

    #[test]
    fn test_extra_columns_are_warnings_and_summarized() {
        let mut record = canonical_record(RawValue::Number(1.0));
        record.insert("obs", RawValue::Text("x".to_string()));
        let report = validate(&[record]);
        assert!(report.ok);
        assert_eq!(report.warnings, vec![ValidationIssue::ExtraColumns(vec!["obs".to_string()])]);
        assert_eq!(report.summary, "1 rows | validation OK | extra columns: 1");
    }

    #[test]
    fn test_alias_headers_are_not_resolved() {
        let record: RawRecord = [
            ("Conta", RawValue::Text("1".to_string())),
            ("NomeEmpresa", RawValue::Text("ACME".to_string())),
        ]
        .into_iter()
        .collect();
        let report = validate(&[record]);
        assert!(!report.ok);
        assert!(matches!(&report.errors[0], ValidationIssue::MissingColumns(cols) if cols.len() == 7));
        assert_eq!(report.extra_column_count(), 2);
    }

    #[test]
    fn test_empty_cells_are_not_inspected() {
        let report = validate(&[canonical_record(RawValue::Empty)]);
        assert!(report.ok);
        assert_eq!(report.invalid_count, 0);
    }
}
