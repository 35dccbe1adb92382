// Everything between raw bytes and a canonical dataset: readers for the
// supported file formats, alias resolution, and the canonical CSV export.
pub mod csv_parser;
pub mod dataset;
pub mod export;
pub mod normalizer;
pub mod workbook;

use shared::RawRecord;

use crate::error::{EngineError, EngineResult};

/// Input formats accepted by the importer, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
}

impl SourceFormat {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let name = file_name.to_lowercase();
        if name.ends_with(".xlsx") {
            Some(SourceFormat::Xlsx)
        } else if name.ends_with(".csv") {
            Some(SourceFormat::Csv)
        } else {
            None
        }
    }
}

pub fn read_records(format: SourceFormat, bytes: Vec<u8>) -> EngineResult<Vec<RawRecord>> {
    match format {
        SourceFormat::Csv => csv_parser::CsvParser::parse_bytes(&bytes),
        SourceFormat::Xlsx => workbook::WorkbookParser::parse_bytes(bytes),
    }
}

/// Same as [`read_records`] but picks the reader from the file name.
pub fn read_file_records(file_name: &str, bytes: Vec<u8>) -> EngineResult<Vec<RawRecord>> {
    let format = SourceFormat::from_file_name(file_name)
        .ok_or_else(|| EngineError::UnsupportedFormat(file_name.to_string()))?;
    read_records(format, bytes)
}
