//! Export/import format for the company lists.
//!
//! Exports always use `{"trusted": [..], "blocked": [..], "threshold": n}`.
//! Imports also accept the field names written by older releases.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::rules::classify::Threshold;
use crate::util::normalize::string_entries;

const TRUSTED_FIELDS: &[&str] = &["trusted", "companyWhitelist", "wl"];
const BLOCKED_FIELDS: &[&str] = &["blocked", "companyBlacklist", "bl"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub trusted: Vec<String>,
    pub blocked: Vec<String>,
    pub threshold: Threshold,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// What an import changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub trusted_added: usize,
    pub blocked_added: usize,
    /// Non-string list entries and malformed list fields that were ignored.
    pub skipped: usize,
    pub threshold: Option<Threshold>,
}

#[derive(Debug, Default)]
pub(crate) struct ParsedImport {
    pub trusted: Vec<String>,
    pub blocked: Vec<String>,
    pub threshold: Option<Threshold>,
    pub skipped: usize,
}

fn first_field<'a>(
    obj: &'a serde_json::Map<String, Value>,
    names: &[&str],
) -> Option<(&'a Value, String)> {
    names
        .iter()
        .find_map(|name| obj.get(*name).map(|v| (v, name.to_string())))
}

/// Reads the first present list field. A field that is not an array is
/// counted as skipped and treated as absent.
fn read_list(
    obj: &serde_json::Map<String, Value>,
    names: &[&str],
    skipped: &mut usize,
) -> Option<Vec<String>> {
    let (value, field) = first_field(obj, names)?;
    let Some(entries) = string_entries(value, &field) else {
        tracing::warn!(field = %field, "ignoring list field that is not an array");
        *skipped += 1;
        return None;
    };

    let total = value.as_array().map_or(0, Vec::len);
    *skipped += total - entries.len();
    Some(entries)
}

fn read_threshold(obj: &serde_json::Map<String, Value>) -> Option<Threshold> {
    let value = obj
        .get("threshold")
        .or_else(|| obj.get("thresh"))
        .or_else(|| obj.get("settings").and_then(|s| s.get("ghostThreshold")))?;
    Some(Threshold::coerce_value(value))
}

pub(crate) fn parse_import(value: &Value) -> Result<ParsedImport> {
    let obj = value
        .as_object()
        .ok_or_else(|| Error::Import("expected a JSON object".to_string()))?;

    let mut skipped = 0;
    let trusted = read_list(obj, TRUSTED_FIELDS, &mut skipped);
    let blocked = read_list(obj, BLOCKED_FIELDS, &mut skipped);

    if trusted.is_none() && blocked.is_none() {
        return Err(Error::Import(
            "no usable trusted or blocked list found".to_string(),
        ));
    }

    Ok(ParsedImport {
        trusted: trusted.unwrap_or_default(),
        blocked: blocked.unwrap_or_default(),
        threshold: read_threshold(obj),
        skipped,
    })
}
