//! Field casters used by sequential loading
//!
//! Each loadable field of a question or answer pairs with one of these
//! casters. Cast failures are data-format errors and propagate to the
//! caller; they are never silently mapped to a default.

use std::path::PathBuf;

use crate::error::{ExamError, Result};

/// Empty string means "no image"
pub(crate) fn image(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() {
        None
    } else {
        Some(PathBuf::from(raw))
    }
}

/// Difficulty level: empty cell means 0, anything else must parse
pub(crate) fn level(raw: &str) -> Result<u32> {
    if raw.is_empty() {
        return Ok(0);
    }
    raw.trim().parse().map_err(|_| ExamError::InvalidField {
        field: "level",
        value: raw.to_string(),
    })
}

/// Boolean cells accept a small case-insensitive vocabulary; an empty
/// cell reads as false, anything unrecognized is rejected so typos in
/// the bank do not silently flip an answer.
pub(crate) fn boolean(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" => Ok(false),
        "true" | "1" | "yes" => Ok(true),
        _ => Err(ExamError::InvalidField {
            field: "boolean",
            value: raw.to_string(),
        }),
    }
}
