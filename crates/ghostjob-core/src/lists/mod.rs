//! Trusted and blocked company lists.
//!
//! Names are stored trimmed and lowercased. A name is never in both lists:
//! adding it to one removes it from the other. Every mutation made through
//! [`ListManager`] is written back to the settings store immediately.

pub mod snapshot;

use std::collections::BTreeSet;

use serde_json::{Value, json};

use crate::error::Result;
use crate::rules::classify::Threshold;
use crate::settings::{SettingsStore, keys};
use crate::util::normalize::{normalize_name, string_entries};

pub use snapshot::{ImportSummary, Snapshot};

/// Outcome of a single list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    Added,
    AlreadyPresent,
    Removed,
    NotPresent,
}

impl ListChange {
    pub fn changed(&self) -> bool {
        matches!(self, ListChange::Added | ListChange::Removed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListStore {
    trusted: BTreeSet<String>,
    blocked: BTreeSet<String>,
}

impl ListStore {
    /// Builds a store from raw names. A name present in both inputs ends up
    /// blocked.
    pub fn new<T, B>(trusted: T, blocked: B) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        let mut store = Self::default();
        for name in trusted {
            store.insert_trusted(name.as_ref());
        }
        for name in blocked {
            store.insert_blocked(name.as_ref());
        }
        store
    }

    /// Loads both lists from the settings store. Missing or malformed lists
    /// are treated as empty.
    pub fn from_store(store: &dyn SettingsStore) -> Self {
        let read = |key: &str| -> Vec<String> {
            match store.get(key) {
                None => Vec::new(),
                Some(value) => string_entries(&value, key).unwrap_or_else(|| {
                    tracing::warn!(key, "stored list is not an array, ignoring");
                    Vec::new()
                }),
            }
        };
        Self::new(read(keys::TRUSTED_LIST), read(keys::BLOCKED_LIST))
    }

    pub fn trusted(&self) -> &BTreeSet<String> {
        &self.trusted
    }

    pub fn blocked(&self) -> &BTreeSet<String> {
        &self.blocked
    }

    /// True when `company` contains any trusted entry, ignoring case.
    pub fn trusts(&self, company: &str) -> bool {
        contains_any(&self.trusted, company)
    }

    /// True when `company` contains any blocked entry, ignoring case.
    pub fn blocks(&self, company: &str) -> bool {
        contains_any(&self.blocked, company)
    }

    pub fn insert_trusted(&mut self, name: &str) -> ListChange {
        insert_exclusive(&mut self.trusted, &mut self.blocked, name)
    }

    pub fn insert_blocked(&mut self, name: &str) -> ListChange {
        insert_exclusive(&mut self.blocked, &mut self.trusted, name)
    }

    pub fn remove_trusted(&mut self, name: &str) -> ListChange {
        remove(&mut self.trusted, name)
    }

    pub fn remove_blocked(&mut self, name: &str) -> ListChange {
        remove(&mut self.blocked, name)
    }
}

fn contains_any(entries: &BTreeSet<String>, company: &str) -> bool {
    if entries.is_empty() {
        return false;
    }
    let company = company.to_lowercase();
    entries.iter().any(|entry| company.contains(entry.as_str()))
}

fn insert_exclusive(
    into: &mut BTreeSet<String>,
    other: &mut BTreeSet<String>,
    name: &str,
) -> ListChange {
    let Some(name) = normalize_name(name) else {
        return ListChange::AlreadyPresent;
    };
    if into.contains(&name) {
        return ListChange::AlreadyPresent;
    }
    other.remove(&name);
    into.insert(name);
    ListChange::Added
}

fn remove(from: &mut BTreeSet<String>, name: &str) -> ListChange {
    match normalize_name(name) {
        Some(name) if from.remove(&name) => ListChange::Removed,
        _ => ListChange::NotPresent,
    }
}

/// Owns the lists and threshold and persists every change.
pub struct ListManager<S: SettingsStore> {
    store: S,
    lists: ListStore,
    threshold: Threshold,
}

impl<S: SettingsStore> ListManager<S> {
    pub fn load(store: S) -> Self {
        let lists = ListStore::from_store(&store);
        let threshold = store
            .get(keys::THRESHOLD)
            .map(|v| Threshold::coerce_value(&v))
            .unwrap_or_default();

        Self {
            store,
            lists,
            threshold,
        }
    }

    pub fn lists(&self) -> &ListStore {
        &self.lists
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn add_trusted(&mut self, name: &str) -> Result<ListChange> {
        let change = self.lists.insert_trusted(name);
        self.persist_if(change)
    }

    pub fn add_blocked(&mut self, name: &str) -> Result<ListChange> {
        let change = self.lists.insert_blocked(name);
        self.persist_if(change)
    }

    pub fn remove_trusted(&mut self, name: &str) -> Result<ListChange> {
        let change = self.lists.remove_trusted(name);
        self.persist_if(change)
    }

    pub fn remove_blocked(&mut self, name: &str) -> Result<ListChange> {
        let change = self.lists.remove_blocked(name);
        self.persist_if(change)
    }

    pub fn set_threshold(&mut self, threshold: Threshold) -> Result<()> {
        self.threshold = threshold;
        self.store
            .set(keys::THRESHOLD, json!(threshold.get()))
    }

    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            trusted: self.lists.trusted.iter().cloned().collect(),
            blocked: self.lists.blocked.iter().cloned().collect(),
            threshold: self.threshold,
        }
    }

    /// Merges an exported snapshot into the current lists.
    ///
    /// Trusted names are merged before blocked ones, so a name present in
    /// both ends up blocked. Entries merged before an error stay merged.
    pub fn import_snapshot(&mut self, json: &str) -> Result<ImportSummary> {
        let value: Value = serde_json::from_str(json)?;
        self.import_value(&value)
    }

    pub fn import_value(&mut self, value: &Value) -> Result<ImportSummary> {
        let parsed = snapshot::parse_import(value)?;
        let mut summary = ImportSummary {
            skipped: parsed.skipped,
            ..Default::default()
        };

        for name in &parsed.trusted {
            if self.add_trusted(name)?.changed() {
                summary.trusted_added += 1;
            }
        }
        for name in &parsed.blocked {
            if self.add_blocked(name)?.changed() {
                summary.blocked_added += 1;
            }
        }
        if let Some(threshold) = parsed.threshold {
            self.set_threshold(threshold)?;
            summary.threshold = Some(threshold);
        }

        tracing::info!(
            trusted_added = summary.trusted_added,
            blocked_added = summary.blocked_added,
            skipped = summary.skipped,
            "import merged"
        );
        Ok(summary)
    }

    fn persist_if(&mut self, change: ListChange) -> Result<ListChange> {
        if change.changed() {
            self.persist_lists()?;
        }
        Ok(change)
    }

    fn persist_lists(&mut self) -> Result<()> {
        let trusted: Vec<&String> = self.lists.trusted.iter().collect();
        let blocked: Vec<&String> = self.lists.blocked.iter().collect();
        self.store.set(keys::TRUSTED_LIST, json!(trusted))?;
        self.store.set(keys::BLOCKED_LIST, json!(blocked))
    }
}
