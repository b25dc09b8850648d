//! Per-file fingerprints persisted under `Metadata` in the config document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::MetadataRecord;

/// Mapping from local filename to its stored fingerprint.
///
/// Persisted as `filename -> [record]`; the list holds exactly one record once this store has
/// written it. Keys are kept sorted so saved documents are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataStore {
    files: BTreeMap<String, Vec<MetadataRecord>>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored fingerprint for `filename`, if any.
    ///
    /// Hand-edited documents may hold several records for one file; the last one wins.
    pub fn get(&self, filename: &str) -> Option<&MetadataRecord> {
        self.files.get(filename).and_then(|records| records.last())
    }

    /// Stored fingerprint for `filename`, or an all-`None` record if there is none.
    pub fn lookup(&self, filename: &str) -> MetadataRecord {
        self.get(filename).cloned().unwrap_or_default()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.files.contains_key(filename)
    }

    /// Replace the fingerprint for `filename` wholesale, leaving a single record.
    pub fn upsert(&mut self, filename: &str, record: MetadataRecord) {
        let records = self.files.entry(filename.to_string()).or_default();
        records.clear();
        records.push(record);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
