// Spreadsheet reader. Only the first sheet is read; its first row is the header.
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use shared::{brazilian_format, RawRecord, RawValue};

use crate::error::EngineResult;

pub struct WorkbookParser;

impl WorkbookParser {
    pub fn parse_bytes(bytes: Vec<u8>) -> EngineResult<Vec<RawRecord>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let sheet_names = workbook.sheet_names().to_vec();
        let Some(sheet_name) = sheet_names.first() else {
            tracing::warn!("Workbook has no sheets");
            return Ok(Vec::new());
        };
        tracing::debug!(sheet = %sheet_name, sheets = sheet_names.len(), "Reading first sheet");

        let range = workbook.worksheet_range(sheet_name)?;
        let mut rows = range.rows();

        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.iter().map(Self::header_text).collect(),
            None => return Ok(Vec::new()),
        };

        let mut records = Vec::new();
        for row in rows {
            let mut record = RawRecord::new();
            for (header, cell) in headers.iter().zip(row) {
                // Unnamed columns carry nothing we can map.
                if header.is_empty() {
                    continue;
                }
                if let Some(value) = Self::cell_value(cell) {
                    record.insert(header.clone(), value);
                }
            }
            // Blank rows are skipped entirely
            if !record.is_empty() {
                records.push(record);
            }
        }

        tracing::debug!(rows = records.len(), columns = headers.len(), "Parsed workbook input");
        Ok(records)
    }

    fn header_text(cell: &Data) -> String {
        match cell {
            Data::String(s) => s.trim().to_string(),
            Data::Empty => String::new(),
            other => format!("{}", other),
        }
    }

    // Empty cells are absent from the record rather than present-but-empty.
    fn cell_value(cell: &Data) -> Option<RawValue> {
        let value = match cell {
            Data::Empty => return None,
            Data::String(s) if s.is_empty() => return None,
            Data::String(s) => RawValue::Text(s.clone()),
            Data::Float(f) => RawValue::Number(*f),
            Data::Int(i) => RawValue::Number(*i as f64),
            Data::Bool(b) => RawValue::Bool(*b),
            Data::DateTime(dt) => match cell.as_datetime() {
                Some(datetime) => RawValue::Date(datetime.date()),
                None => RawValue::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) => {
                let text = RawValue::Text(s.clone());
                brazilian_format::to_date_or_null(&text).map(RawValue::Date).unwrap_or(text)
            }
            Data::DurationIso(s) => RawValue::Text(s.clone()),
            Data::Error(e) => RawValue::Text(e.to_string()),
        };
        Some(value)
    }
}
