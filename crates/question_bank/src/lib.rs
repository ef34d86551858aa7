//! CSV question bank reading
//!
//! This crate turns a delimited question-bank file into ordered row
//! mappings ready for loading into an exam:
//!
//! - `record`: an ordered (header, value) row mapping
//! - `reader`: CSV parsing with a symbolic delimiter table
//! - `encoding`: byte decoding with a fallback loop
//!
//! # Example
//!
//! ```no_run
//! use question_bank::{read_file, CsvConfig, Delimiter};
//!
//! let config = CsvConfig::new().with_delimiter(Delimiter::Semicolon);
//! let records = read_file("questions.csv", &config).unwrap();
//! for record in &records {
//!     println!("{:?}", record.get("question"));
//! }
//! ```

mod encoding;
mod error;
mod reader;
mod record;

pub use encoding::decode;
pub use error::{BankError, Result};
pub use reader::{read_file, read_str, CsvConfig, Delimiter};
pub use record::Record;
