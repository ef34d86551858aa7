//! Byte decoding with a simple fallback loop
//!
//! Question files come from spreadsheets exported on a variety of
//! platforms, so the preferred encoding is tried first and the reader
//! falls back to UTF-8 and then Latin-1. Latin-1 is total over bytes,
//! so the loop always produces text.

use crate::error::{BankError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode raw file bytes into text.
///
/// Returns the decoded text and the name of the encoding that was
/// actually used. A fallback away from the preferred encoding is
/// logged as a warning, never an error; an unrecognized preferred
/// encoding name is an error.
pub fn decode(bytes: &[u8], preferred: &str) -> Result<(String, &'static str)> {
    let preferred = canonical_name(preferred)
        .ok_or_else(|| BankError::UnsupportedEncoding(preferred.to_string()))?;

    for candidate in candidates(preferred) {
        if let Some(text) = try_decode(bytes, candidate) {
            if candidate != preferred {
                tracing::warn!(
                    preferred,
                    used = candidate,
                    "input is not valid in the preferred encoding, fell back"
                );
            }
            return Ok((text, candidate));
        }
    }

    // Latin-1 decodes any byte sequence, so the loop cannot fall through.
    Err(BankError::UnsupportedEncoding(preferred.to_string()))
}

fn canonical_name(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "utf-8" | "utf8" => Some("utf-8"),
        "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Some("latin-1"),
        _ => None,
    }
}

fn candidates(preferred: &'static str) -> Vec<&'static str> {
    let mut order = vec![preferred];
    for fallback in ["utf-8", "latin-1"] {
        if fallback != preferred {
            order.push(fallback);
        }
    }
    order
}

fn try_decode(bytes: &[u8], encoding: &str) -> Option<String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match encoding {
        "utf-8" => std::str::from_utf8(bytes).ok().map(str::to_string),
        "latin-1" => Some(bytes.iter().map(|&b| b as char).collect()),
        _ => None,
    }
}
