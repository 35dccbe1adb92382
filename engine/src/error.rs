use thiserror::Error;

// Infrastructure failures only. Problems with the *content* of an import
// (missing columns, non-numeric amounts) are reported through
// `validation::ValidationReport`, never through this type.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration parse error: {source}")]
    ConfigParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Workbook error: {source}")]
    WorkbookError {
        #[from]
        source: calamine::Error,
    },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No staged dataset: import a file first")]
    NothingStaged,

    #[error("Internal processing error: {0}")]
    ProcessingError(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
