//! Comparator registry.
//!
//! Resolves a [`SortKind`] to the ordering used for a field. Every kind goes through
//! [`comparator_for`], the single lookup table; call sites never branch on the kind
//! themselves.
//!
//! # Ordering rules
//!
//! - **Default**: values that parse as finite numbers compare numerically, other
//!   values compare lexicographically, and numbers order before text so that mixed
//!   columns still form a total order.
//! - **Chronological**: values are parsed as calendar instants (RFC 3339, ISO
//!   dates and date-times, `MM/DD/YYYY`, or epoch milliseconds for numbers).
//! - Missing, null, and unparsable values have no sort key. They tie with each
//!   other and always sort after keyed values, whatever the direction.

use crate::domain::{SortKind, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// Applies the direction to an ascending ordering.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active sort: which field, which way, and how values are ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Field to order by.
    pub field: String,
    /// Ascending or descending.
    #[serde(default)]
    pub direction: SortDirection,
    /// Comparator kind.
    #[serde(default)]
    pub kind: SortKind,
}

impl SortState {
    /// Creates a sort state.
    pub fn new(field: impl Into<String>, direction: SortDirection, kind: SortKind) -> Self {
        Self {
            field: field.into(),
            direction,
            kind,
        }
    }
}

/// Precomputed sort key of a single value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SortKey<'a> {
    Number(f64),
    Text(Cow<'a, str>),
    Instant(DateTime<Utc>),
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Text(_) => 1,
            Self::Instant(_) => 2,
        }
    }

    pub(crate) fn cmp_key(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Instant(a), Self::Instant(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

type KeyFn = for<'a> fn(&'a Value) -> Option<SortKey<'a>>;

/// Ordering function resolved from the registry.
#[derive(Clone, Copy)]
pub struct Comparator {
    kind: SortKind,
    key: KeyFn,
}

impl std::fmt::Debug for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparator").field("kind", &self.kind).finish()
    }
}

/// Resolves the comparator for a kind.
///
/// # Example
///
/// ```rust
/// use recordview::domain::{SortKind, Value};
/// use recordview::engine::comparator_for;
/// use std::cmp::Ordering;
///
/// let natural = comparator_for(SortKind::Default);
/// let nine = Value::from("9");
/// let ten = Value::from("10");
/// assert_eq!(natural.compare(Some(&nine), Some(&ten)), Ordering::Less);
/// ```
#[must_use]
pub fn comparator_for(kind: SortKind) -> Comparator {
    let key: KeyFn = match kind {
        SortKind::Default => natural_key,
        SortKind::Chronological => instant_key,
    };
    Comparator { kind, key }
}

impl Comparator {
    /// The kind this comparator was resolved for.
    #[must_use]
    pub const fn kind(&self) -> SortKind {
        self.kind
    }

    pub(crate) fn key<'a>(&self, value: Option<&'a Value>) -> Option<SortKey<'a>> {
        value.and_then(self.key)
    }

    /// Three-way ascending comparison of two optional field values.
    ///
    /// Values without a sort key order after keyed values and tie with each other.
    #[must_use]
    pub fn compare(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        compare_keys(self.key(a).as_ref(), self.key(b).as_ref(), SortDirection::Asc)
    }
}

/// Compares two optional keys, applying `direction` only between keyed values.
pub(crate) fn compare_keys(
    a: Option<&SortKey<'_>>,
    b: Option<&SortKey<'_>>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => direction.apply(x.cmp_key(y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn natural_key(value: &Value) -> Option<SortKey<'_>> {
    match value {
        Value::Number(n) if n.is_finite() => Some(SortKey::Number(*n)),
        Value::Text(s) => Some(
            parse_number(s).map_or_else(|| SortKey::Text(Cow::Borrowed(s.as_str())), SortKey::Number),
        ),
        other => other.scalar_text().map(SortKey::Text),
    }
}

fn instant_key(value: &Value) -> Option<SortKey<'_>> {
    match value {
        Value::Number(ms) if ms.is_finite() => {
            #[allow(clippy::cast_possible_truncation)]
            let millis = *ms as i64;
            Utc.timestamp_millis_opt(millis).single().map(SortKey::Instant)
        }
        Value::Text(s) => parse_instant(s).map(SortKey::Instant),
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parses a calendar instant, interpreting zone-less values as UTC.
#[must_use]
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }
    }
    None
}
