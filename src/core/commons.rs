// src/core/commons.rs

use crate::constants::TRIM_CHARS;

/// Strips surrounding spaces, tabs and line breaks.
pub fn clean(value: &str) -> &str {
    value.trim_matches(TRIM_CHARS)
}

/// Cleans `value`, substituting `default` when nothing is left.
/// The flag reports whether the substitution happened.
pub fn clean_or(value: &str, default: &str) -> (String, bool) {
    match clean(value) {
        "" => (default.to_string(), true),
        cleaned => (cleaned.to_string(), false),
    }
}
