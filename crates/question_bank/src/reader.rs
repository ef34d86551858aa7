//! CSV reading into ordered records

use std::collections::HashSet;
use std::path::Path;

use crate::encoding::decode;
use crate::error::{BankError, Result};
use crate::record::Record;

/// Field delimiter, named symbolically so configuration files and CLI
/// flags never have to quote literal characters like tab or space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Colon,
    Semicolon,
    Dash,
    Period,
    Space,
    Exclamation,
}

impl Delimiter {
    /// Literal byte used by the CSV reader
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Colon => b':',
            Delimiter::Semicolon => b';',
            Delimiter::Dash => b'-',
            Delimiter::Period => b'.',
            Delimiter::Space => b' ',
            Delimiter::Exclamation => b'!',
        }
    }

    /// Symbolic name as written in configuration
    pub fn name(self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Tab => "tab",
            Delimiter::Colon => "colon",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Dash => "dash",
            Delimiter::Period => "period",
            Delimiter::Space => "space",
            Delimiter::Exclamation => "exclamation",
        }
    }

    /// Look up a delimiter by its symbolic name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "comma" => Some(Delimiter::Comma),
            "tab" => Some(Delimiter::Tab),
            "colon" => Some(Delimiter::Colon),
            "semicolon" => Some(Delimiter::Semicolon),
            "dash" => Some(Delimiter::Dash),
            "period" => Some(Delimiter::Period),
            "space" => Some(Delimiter::Space),
            "exclamation" => Some(Delimiter::Exclamation),
            _ => None,
        }
    }
}

/// CSV reader configuration
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Field delimiter
    pub delimiter: Delimiter,
    /// Preferred character encoding
    pub encoding: String,
    /// Whether to trim whitespace around fields
    pub trim_whitespace: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            encoding: "utf-8".to_string(),
            trim_whitespace: false,
        }
    }
}

impl CsvConfig {
    /// Create a new configuration with defaults (comma, UTF-8)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the preferred encoding
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Set whether to trim whitespace around fields
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }
}

/// Read a question bank file into ordered records.
///
/// The first row is always treated as the header row; its names become
/// the record keys.
pub fn read_file(path: impl AsRef<Path>, config: &CsvConfig) -> Result<Vec<Record>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BankError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let (text, used) = decode(&bytes, &config.encoding)?;
    tracing::debug!(path = %path.display(), encoding = used, "read question bank");

    read_str(&text, config)
}

/// Parse question bank records from already-decoded text
pub fn read_str(data: &str, config: &CsvConfig) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter.as_byte())
        .has_headers(true)
        .trim(if config.trim_whitespace {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .flexible(true) // Allow records with varying number of fields
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut seen = HashSet::new();
    for header in &headers {
        if !seen.insert(header.clone()) {
            return Err(BankError::DuplicateColumn(header.clone()));
        }
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let raw = result?;
        let mut record = Record::new();
        for (i, header) in headers.iter().enumerate() {
            // Short rows simply have fewer columns; surplus cells beyond
            // the header are dropped.
            if let Some(field) = raw.get(i) {
                record.push(header.clone(), field.to_string());
            }
        }
        records.push(record);
    }

    Ok(records)
}
