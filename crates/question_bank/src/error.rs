//! Error types for question bank reading

use thiserror::Error;

/// Errors that can occur while reading a question bank
#[derive(Debug, Error)]
pub enum BankError {
    /// IO error reading the input file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing CSV data
    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    /// Input file not found
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// Two header columns share the same name
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Encoding name not in the supported set
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),
}

/// Result type for question bank operations
pub type Result<T> = std::result::Result<T, BankError>;
