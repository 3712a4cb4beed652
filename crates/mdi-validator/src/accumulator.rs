//! # Entry Accumulator
//!
//! Collects the identifying fields of every parsed line over the whole scan.
//! Names and parents are kept as multisets (value to occurrence count) so
//! duplicates survive; types, FQNs and aspect keys are plain sets. Ordered
//! collections keep every derived listing and defect order deterministic.

use std::collections::{BTreeMap, BTreeSet};

use mdi_core::{entry_group_path, EntryName, ImportRecord};

/// Accumulated state over all parsed records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    names: BTreeMap<String, usize>,
    parents: BTreeMap<String, usize>,
    entry_types: BTreeSet<String>,
    fully_qualified_names: BTreeSet<String>,
    aspect_keys: BTreeSet<String>,
    root_entries: usize,
    records: usize,
}

impl Accumulator {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record in.
    pub fn record(&mut self, record: &ImportRecord) {
        self.records += 1;
        // An empty name is still a name; only an absent one is skipped.
        if !record.name.is_missing() {
            let name = record.name.as_str().unwrap_or_default();
            *self.names.entry(name.to_string()).or_default() += 1;
        }
        if record.is_root() {
            self.root_entries += 1;
            *self.parents.entry(String::new()).or_default() += 1;
        } else if let Some(parent) = record.parent_entry.as_str() {
            *self.parents.entry(parent.to_string()).or_default() += 1;
        }
        if let Some(entry_type) = record.entry_type.as_str() {
            self.entry_types.insert(entry_type.to_string());
        }
        if let Some(fqn) = record.fully_qualified_name.as_str() {
            self.fully_qualified_names.insert(fqn.to_string());
        }
        self.aspect_keys.extend(record.aspect_keys.iter().cloned());
    }

    /// Number of records folded in.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Records whose `parentEntry` is empty.
    pub fn root_entries(&self) -> usize {
        self.root_entries
    }

    /// Entry names with their occurrence counts.
    pub fn name_counts(&self) -> &BTreeMap<String, usize> {
        &self.names
    }

    /// Parent references with their occurrence counts. The empty string
    /// stands for root entries.
    pub fn parent_counts(&self) -> &BTreeMap<String, usize> {
        &self.parents
    }

    /// True if `name` appeared as an entry name.
    pub fn has_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Distinct entry names, sorted.
    pub fn distinct_names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Distinct entry types, sorted.
    pub fn entry_types(&self) -> &BTreeSet<String> {
        &self.entry_types
    }

    /// Distinct fully qualified names, sorted.
    pub fn fully_qualified_names(&self) -> &BTreeSet<String> {
        &self.fully_qualified_names
    }

    /// Distinct aspect keys, sorted.
    pub fn aspect_keys(&self) -> &BTreeSet<String> {
        &self.aspect_keys
    }

    /// Entry-group resource paths referenced by names and non-empty parents.
    /// Values that are not well-formed entry names fall back to a lenient
    /// prefix match.
    pub fn entry_groups(&self) -> BTreeSet<String> {
        self.names
            .keys()
            .chain(self.parents.keys().filter(|p| !p.is_empty()))
            .filter_map(|value| match EntryName::new(value.as_str()) {
                Ok(name) => Some(name.entry_group_path()),
                Err(_) => entry_group_path(value).map(str::to_string),
            })
            .collect()
    }
}
