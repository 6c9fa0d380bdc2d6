//! Filter evaluator.
//!
//! Reduces a record set by a conjunction of `field = value` constraints. A
//! constraint with an empty value is inactive. Records lacking a field, or holding
//! a non-scalar value in it, never satisfy an active constraint on that field.

use crate::domain::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single `field = value` constraint as raised by one filter widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConstraint {
    /// Field the constraint applies to.
    pub field: String,
    /// Required scalar value; empty means "no constraint".
    pub value: String,
}

impl FieldConstraint {
    /// Creates a constraint.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether this constraint restricts anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Current filter selections, one value per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState(BTreeMap<String, String>);

impl FilterState {
    /// Creates an empty filter state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style constraint insertion.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(&FieldConstraint::new(field, value));
        self
    }

    /// Applies a constraint, clearing the field when the value is empty.
    ///
    /// Returns `true` if the state changed.
    pub fn set(&mut self, constraint: &FieldConstraint) -> bool {
        if constraint.is_active() {
            self.0.insert(constraint.field.clone(), constraint.value.clone())
                .as_deref()
                != Some(constraint.value.as_str())
        } else {
            self.0.remove(&constraint.field).is_some()
        }
    }

    /// Value currently selected for `field`, if active.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterates the active constraints in field order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether no constraint is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Removes every constraint.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(String, String)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|(_, v)| !v.is_empty()).collect())
    }
}

/// Whether `record` satisfies every active constraint.
#[must_use]
pub fn matches(record: &Record, filter: &FilterState) -> bool {
    filter
        .active()
        .all(|(field, value)| record.text(field).is_some_and(|text| text == value))
}

/// Returns the records satisfying every active constraint, in their original order.
///
/// # Example
///
/// ```rust
/// use recordview::Record;
/// use recordview::engine::{apply_filter, FilterState};
///
/// let records = vec![
///     Record::new().with("id", "1").with("event", "birth"),
///     Record::new().with("id", "2").with("event", "death"),
/// ];
/// let filter = FilterState::new().with("event", "birth");
///
/// let kept = apply_filter(&records, &filter);
/// assert_eq!(kept.len(), 1);
/// ```
#[must_use]
pub fn apply(records: &[Record], filter: &FilterState) -> Vec<Record> {
    if filter.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| matches(record, filter))
        .cloned()
        .collect()
}
