//! Column descriptors.
//!
//! A [`Column`] tells the engine how a field participates in the view: which
//! comparator kind orders it and whether it is excluded from filtering and sorting.

use crate::domain::error::{RecordViewError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How values of a field are ordered.
///
/// Carried on outward filter/sort events as the field kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    /// Natural ordering: numeric when both values parse as numbers, else text.
    #[default]
    Default,
    /// Values are parsed as calendar instants.
    Chronological,
}

/// Descriptor for one field of the record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Field name in each record.
    pub name: String,
    /// Comparator kind used when sorting by this field.
    #[serde(default)]
    pub sort_kind: SortKind,
    /// Excluded columns ignore filter and sort requests.
    #[serde(default)]
    pub excluded: bool,
}

impl Column {
    /// Creates a filterable, sortable column with the default comparator.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sort_kind: SortKind::Default,
            excluded: false,
        }
    }

    /// Orders this column chronologically.
    #[must_use]
    pub fn chronological(mut self) -> Self {
        self.sort_kind = SortKind::Chronological;
        self
    }

    /// Excludes this column from filtering and sorting.
    #[must_use]
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }
}

/// Ordered set of column descriptors with unique names.
///
/// An empty set places no restrictions: every field is filterable and sortable
/// with the default comparator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns(Vec<Column>);

impl Columns {
    /// Builds a column set, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`RecordViewError::DuplicateColumn`] if two descriptors share a name.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(RecordViewError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self(columns))
    }

    /// Looks up a column by field name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.0.iter().find(|c| c.name == name)
    }

    /// Whether filter and sort requests on `name` should be honoured.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }
        self.get(name).is_some_and(|c| !c.excluded)
    }

    /// Comparator kind declared for `name`, or the default kind.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> SortKind {
        self.get(name).map_or(SortKind::Default, |c| c.sort_kind)
    }

    /// Iterates the descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        let err = Columns::new(vec![Column::new("id"), Column::new("id")]).unwrap_err();
        assert!(matches!(err, RecordViewError::DuplicateColumn(name) if name == "id"));
    }

    #[test]
    fn empty_set_accepts_every_field() {
        let columns = Columns::default();
        assert!(columns.accepts("anything"));
        assert_eq!(columns.kind_of("anything"), SortKind::Default);
    }

    #[test]
    fn declared_set_rejects_excluded_and_unknown_fields() {
        let columns = Columns::new(vec![
            Column::new("date").chronological(),
            Column::new("actions").excluded(),
        ])
        .unwrap();

        assert!(columns.accepts("date"));
        assert!(!columns.accepts("actions"));
        assert!(!columns.accepts("unknown"));
        assert_eq!(columns.kind_of("date"), SortKind::Chronological);
    }
}
