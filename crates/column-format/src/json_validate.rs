//! Editor text checks and reformatting.
//!
//! All functions here are pure. Empty or whitespace-only text counts as valid
//! and means "nothing to preview".

use crate::error::SyntaxError;
use serde_json::Value;

/// Checks that `text` is well-formed JSON.
pub fn validate(text: &str) -> Result<(), SyntaxError> {
    parse_document(text).map(|_| ())
}

/// Parses editor text. `Ok(None)` for blank text.
pub fn parse_document(text: &str) -> Result<Option<Value>, SyntaxError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text).map(Some).map_err(SyntaxError::from)
}

/// Re-indents valid JSON with two spaces, keeping key order.
///
/// Invalid text is returned unchanged.
pub fn beautify(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| text.to_owned())
}

/// Collapses valid JSON to its compact form.
///
/// Invalid text is returned unchanged.
pub fn minify(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .and_then(|value| serde_json::to_string(&value))
        .unwrap_or_else(|_| text.to_owned())
}
