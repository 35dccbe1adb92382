use std::borrow::Cow;

use chrono::DateTime;
use csv::ReaderBuilder;
use shared::{RawRecord, RawValue};

use crate::error::EngineResult;

// Delimiters we sniff for, in tie-break order.
const CANDIDATE_DELIMITERS: &[u8] = &[b',', b';', b'\t', b'|'];

// Plain floats at or above this magnitude stay text, like a spreadsheet
// loader that refuses to lose integer precision (account numbers).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

// Module for turning a CSV cell into a typed raw value
pub mod dynamic_typing {
    use super::*;

    // -?(digits[.] | .digits | digits.digits)([eE][+-]?digits)? with optional surrounding blanks
    pub fn is_float_literal(s: &str) -> bool {
        let t = s.trim();
        let body = t.strip_prefix('-').unwrap_or(t);
        let (mantissa, exponent) = match body.find(|c| c == 'e' || c == 'E') {
            Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
            None => (body, None),
        };
        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());

        if let Some(exp) = exponent {
            let exp = exp.strip_prefix(|c| c == '+' || c == '-').unwrap_or(exp);
            if exp.is_empty() || !all_digits(exp) {
                return false;
            }
        }

        let mut halves = mantissa.splitn(2, '.');
        let int_part = halves.next().unwrap_or("");
        let frac_part = halves.next();
        if !all_digits(int_part) || !frac_part.map_or(true, all_digits) {
            return false;
        }
        !(int_part.is_empty() && frac_part.map_or(true, str::is_empty))
    }

    pub fn type_cell(field: &str) -> RawValue {
        match field {
            "" => return RawValue::Empty,
            "true" | "TRUE" => return RawValue::Bool(true),
            "false" | "FALSE" => return RawValue::Bool(false),
            _ => {}
        }
        if is_float_literal(field) {
            if let Ok(n) = field.trim().parse::<f64>() {
                if n.abs() < MAX_SAFE_INTEGER {
                    return RawValue::Number(n);
                }
            }
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(field) {
            return RawValue::Date(dt.date_naive());
        }
        RawValue::Text(field.to_string())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_float_literals() {
            for ok in ["1", "-1", "1.", ".5", "1.25", "1e3", "2.5E-4", " 42 "] {
                assert!(is_float_literal(ok), "{ok} should be a float literal");
            }
            for bad in ["", ".", "-", "1.234,56", "1,5", "abc", "1e", "+1", "1.2.3", "0x10"] {
                assert!(!is_float_literal(bad), "{bad} should not be a float literal");
            }
        }

        #[test]
        fn test_type_cell() {
            assert_eq!(type_cell(""), RawValue::Empty);
            assert_eq!(type_cell("TRUE"), RawValue::Bool(true));
            assert_eq!(type_cell("1500.75"), RawValue::Number(1500.75));
            assert_eq!(type_cell("1.234,56"), RawValue::Text("1.234,56".to_string()));
            assert_eq!(type_cell("ACME"), RawValue::Text("ACME".to_string()));
        }

        #[test]
        fn test_huge_integers_stay_text() {
            assert_eq!(
                type_cell("12345678901234567890"),
                RawValue::Text("12345678901234567890".to_string())
            );
        }
    }
}

pub struct CsvParser;

impl CsvParser {
    // Header row required. Delimiter and encoding are detected, rows may be
    // shorter or longer than the header.
    pub fn parse_bytes(bytes: &[u8]) -> EngineResult<Vec<RawRecord>> {
        let text = Self::decode(bytes);
        let delimiter = Self::sniff_delimiter(&text);

        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = rdr.headers()?.clone();
        let mut records = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            if record.len() > headers.len() {
                tracing::debug!(line = idx + 2, extra_fields = record.len() - headers.len(), "Ignoring fields beyond the header");
            }
            // Fields missing at the end of a short row are absent, not empty.
            let raw: RawRecord = headers
                .iter()
                .zip(record.iter())
                .map(|(header, field)| (header, dynamic_typing::type_cell(field)))
                .collect();
            records.push(raw);
        }

        tracing::debug!(delimiter = %(delimiter as char).escape_default(), rows = records.len(), "Parsed CSV input");
        Ok(records)
    }

    // UTF-8 (BOM stripped) first; spreadsheet exports from Windows are often
    // Windows-1252, so fall back to that instead of failing.
    fn decode(bytes: &[u8]) -> Cow<'_, str> {
        let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
        if !had_errors {
            return text;
        }
        tracing::debug!("Input is not valid UTF-8, decoding as Windows-1252");
        let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
        text
    }

    // Most frequent candidate on the header line wins, ',' when nothing shows up.
    fn sniff_delimiter(text: &str) -> u8 {
        let header_line = text.lines().next().unwrap_or("");
        let mut best = (b',', 0usize);
        for &candidate in CANDIDATE_DELIMITERS {
            let count = header_line.bytes().filter(|&b| b == candidate).count();
            if count > best.1 {
                best = (candidate, count);
            }
        }
        best.0
    }
}
