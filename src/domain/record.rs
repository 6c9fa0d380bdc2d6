//! Record domain model.
//!
//! A [`Record`] is one displayed row: an opaque, key-ordered mapping from field name
//! to [`Value`]. Records are never mutated in place by the engine; the whole record
//! set is replaced when the caller's data source changes.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// A single field value.
///
/// Deserialized untagged from JSON, so `null`, booleans, numbers, strings, arrays
/// and objects map directly onto the variants. A nested status list is a
/// [`Value::List`] of [`Value::Nested`] entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit absence of a value.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Free text, dates, codes.
    Text(String),
    /// List of elements.
    List(Vec<Value>),
    /// Nested object, e.g. one entry of a status history.
    Nested(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the scalar text representation used for filtering and sorting.
    ///
    /// Integral numbers are printed without a fractional part so `3.0` reads as
    /// `"3"`. `Null`, lists and nested objects have no scalar text.
    #[must_use]
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Number(n) => Some(Cow::Owned(format_number(*n))),
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Null | Self::List(_) | Self::Nested(_) => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Identifier of a record, taken from the configured identifier field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One displayed row.
///
/// # Examples
///
/// ```
/// use recordview::Record;
///
/// let record = Record::new()
///     .with("id", "1")
///     .with("event", "birth")
///     .with("date", "2020-01-01");
///
/// assert_eq!(record.id("id").unwrap().as_str(), "1");
/// assert!(record.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns the value of `field`, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the scalar text of `field`, treating absent and non-scalar values alike.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).and_then(Value::scalar_text)
    }

    /// Returns the record identifier stored under `id_field`.
    #[must_use]
    pub fn id(&self, id_field: &str) -> Option<RecordId> {
        self.text(id_field).map(|s| RecordId::new(s.into_owned()))
    }

    /// Iterates fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
