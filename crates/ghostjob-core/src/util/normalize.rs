//! Name normalization helpers.
//!
//! Company names are compared trimmed and lowercased everywhere: in the
//! stored lists, in exported snapshots and when matching a listing's company.

use serde_json::Value;

/// Trims and lowercases a company name. Returns `None` for blank input.
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Reads a JSON array of names, skipping entries that are not strings.
///
/// Returns `None` when `value` is not an array at all.
pub fn string_entries(value: &Value, field: &str) -> Option<Vec<String>> {
    let items = value.as_array()?;
    let mut names = Vec::with_capacity(items.len());

    for item in items {
        match item.as_str() {
            Some(s) => names.push(s.to_string()),
            None => tracing::warn!(field, entry = %item, "skipping non-string list entry"),
        }
    }

    Some(names)
}
