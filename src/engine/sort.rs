//! Sort evaluator.
//!
//! Reorders a record set by one field using the comparator registry. Sorting is
//! stable, so ties keep their incoming order and re-sorting a sorted set is a
//! no-op.

use super::comparator::{comparator_for, compare_keys, SortDirection, SortState};
use crate::domain::{Record, SortKind};

/// Returns a new ordering of `records` according to `state`.
///
/// Sort keys are computed once per record rather than once per comparison, since
/// chronological keys require date parsing.
///
/// # Example
///
/// ```rust
/// use recordview::Record;
/// use recordview::domain::SortKind;
/// use recordview::engine::{sort_records, SortDirection, SortState};
///
/// let records = vec![
///     Record::new().with("id", "1").with("n", "10"),
///     Record::new().with("id", "2").with("n", "9"),
/// ];
/// let sorted = sort_records(&records, &SortState::new("n", SortDirection::Asc, SortKind::Default));
/// assert_eq!(sorted[0].id("id").unwrap().as_str(), "2");
/// ```
#[must_use]
pub fn sort(records: &[Record], state: &SortState) -> Vec<Record> {
    let _span = tracing::trace_span!("sort",
        field = %state.field,
        direction = ?state.direction,
        kind = ?state.kind,
        count = records.len()
    )
    .entered();

    let comparator = comparator_for(state.kind);
    let mut keyed: Vec<_> = records
        .iter()
        .map(|record| (comparator.key(record.get(&state.field)), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), state.direction));

    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

/// Orders records by `field` chronologically, oldest first.
#[must_use]
pub fn sort_oldest_first(records: &[Record], field: &str) -> Vec<Record> {
    sort(
        records,
        &SortState::new(field, SortDirection::Asc, SortKind::Chronological),
    )
}

/// Orders records by `field` chronologically, newest first.
#[must_use]
pub fn sort_newest_first(records: &[Record], field: &str) -> Vec<Record> {
    sort(
        records,
        &SortState::new(field, SortDirection::Desc, SortKind::Chronological),
    )
}
