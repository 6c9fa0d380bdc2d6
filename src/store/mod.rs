//! Record store holding the full, unfiltered record set.
//!
//! The store is supplied at construction and replaced wholesale whenever the
//! caller's data source changes. Replacement is detected by value, not by identity,
//! so handing over an equal record set is a no-op.
//!
//! # Modules
//!
//! - `json`: Loading record sets from JSON text or files

pub mod json;

use crate::domain::{Record, RecordId};

/// Snapshot of every record the view can show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Creates a store from a record set.
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// All records in supplied order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the store, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the record set if it differs by value.
    ///
    /// Returns `true` if the store changed.
    pub fn replace(&mut self, records: Vec<Record>) -> bool {
        if self.records == records {
            tracing::debug!(count = records.len(), "record set unchanged, keeping store");
            return false;
        }
        tracing::debug!(
            old_count = self.records.len(),
            new_count = records.len(),
            "record set replaced"
        );
        self.records = records;
        true
    }

    /// Whether a record with `id` under `id_field` exists.
    #[must_use]
    pub fn contains_id(&self, id_field: &str, id: &RecordId) -> bool {
        self.records
            .iter()
            .any(|record| record.id(id_field).as_ref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_detects_value_equality() {
        let records = vec![Record::new().with("id", "1")];
        let mut store = RecordStore::new(records.clone());

        assert!(!store.replace(records));
        assert!(store.replace(vec![Record::new().with("id", "2")]));
        assert_eq!(store.len(), 1);
        assert!(store.contains_id("id", &RecordId::new("2")));
        assert!(!store.contains_id("id", &RecordId::new("1")));
    }
}
