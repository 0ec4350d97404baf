//! Typed view over the external key-value settings store.
//!
//! The store itself is opaque: the engine only reads and writes
//! `serde_json::Value`s under the keys in [`keys`]. Values of the wrong
//! shape or out of range fall back to defaults with a warning.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::lists::ListStore;
use crate::rules::catalog::Profile;
use crate::rules::classify::{ExtraFilters, Threshold};

pub mod keys {
    pub const ENABLED: &str = "enabled";
    pub const THRESHOLD: &str = "threshold";
    pub const HIGHLIGHT_MODE: &str = "highlightMode";
    pub const SHOW_SCORES: &str = "showScores";
    pub const SHOW_REASONS: &str = "showReasons";
    pub const TRUSTED_LIST: &str = "trustedList";
    pub const BLOCKED_LIST: &str = "blockedList";
    pub const PROFILE: &str = "profile";
    pub const HIDE_NO_SALARY: &str = "hideNoSalary";
    pub const HIDE_OLD_JOBS: &str = "hideOldJobs";
    pub const OLD_JOB_DAYS: &str = "oldJobDays";
    pub const HIDE_HIGH_APPLICANTS: &str = "hideHighApplicants";
    pub const MAX_APPLICANTS: &str = "maxApplicants";
}

/// Key-value persistence provided by the host environment.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// In-process store, used by tests and by hosts without persistence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// How flagged cards are decorated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    /// Outline flagged cards. When off, ghosts are hidden instead.
    pub highlight_mode: bool,
    pub show_scores: bool,
    pub show_reasons: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            highlight_mode: true,
            show_scores: true,
            show_reasons: true,
        }
    }
}

/// Configuration threaded explicitly into every scoring call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanContext {
    pub threshold: Threshold,
    pub lists: ListStore,
    pub profile: Profile,
    pub filters: ExtraFilters,
}

impl ScanContext {
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_lists(mut self, lists: ListStore) -> Self {
        self.lists = lists;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_filters(mut self, filters: ExtraFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// Everything the detector reads from the settings store at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub enabled: bool,
    pub threshold: Threshold,
    pub display: DisplaySettings,
    pub lists: ListStore,
    pub profile: Profile,
    pub filters: ExtraFilters,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: Threshold::DEFAULT,
            display: DisplaySettings::default(),
            lists: ListStore::default(),
            profile: Profile::standard(),
            filters: ExtraFilters::default(),
        }
    }
}

impl Settings {
    /// Reads every known key. Missing keys take their default; malformed
    /// values are logged and replaced by the default.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let defaults = Self::default();

        let threshold = store
            .get(keys::THRESHOLD)
            .map(|v| Threshold::coerce_value(&v))
            .unwrap_or(defaults.threshold);

        let profile = match store.get(keys::PROFILE) {
            None => defaults.profile,
            Some(v) => match v.as_str().and_then(Profile::by_name) {
                Some(profile) => profile,
                None => {
                    tracing::warn!(value = %v, "unknown profile, using standard");
                    Profile::standard()
                }
            },
        };

        let filter_defaults = ExtraFilters::default();
        let filters = ExtraFilters {
            hide_no_salary: read_bool(store, keys::HIDE_NO_SALARY, filter_defaults.hide_no_salary),
            hide_old_jobs: read_bool(store, keys::HIDE_OLD_JOBS, filter_defaults.hide_old_jobs),
            old_job_days: read_u32(store, keys::OLD_JOB_DAYS, filter_defaults.old_job_days),
            hide_high_applicants: read_bool(
                store,
                keys::HIDE_HIGH_APPLICANTS,
                filter_defaults.hide_high_applicants,
            ),
            max_applicants: read_u32(store, keys::MAX_APPLICANTS, filter_defaults.max_applicants),
        };

        Self {
            enabled: read_bool(store, keys::ENABLED, defaults.enabled),
            threshold,
            display: DisplaySettings {
                highlight_mode: read_bool(
                    store,
                    keys::HIGHLIGHT_MODE,
                    defaults.display.highlight_mode,
                ),
                show_scores: read_bool(store, keys::SHOW_SCORES, defaults.display.show_scores),
                show_reasons: read_bool(store, keys::SHOW_REASONS, defaults.display.show_reasons),
            },
            lists: ListStore::from_store(store),
            profile,
            filters,
        }
    }

    pub fn scan_context(&self) -> ScanContext {
        ScanContext {
            threshold: self.threshold,
            lists: self.lists.clone(),
            profile: self.profile.clone(),
            filters: self.filters,
        }
    }
}

fn read_bool(store: &dyn SettingsStore, key: &str, default: bool) -> bool {
    match store.get(key) {
        None => default,
        Some(Value::Bool(b)) => b,
        Some(other) => {
            tracing::warn!(key, value = %other, "expected a boolean, using default");
            default
        }
    }
}

fn read_u32(store: &dyn SettingsStore, key: &str, default: u32) -> u32 {
    let Some(value) = store.get(key) else {
        return default;
    };
    match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
        Some(n) => n,
        None => {
            tracing::warn!(key, %value, "expected a non-negative integer, using default");
            default
        }
    }
}
