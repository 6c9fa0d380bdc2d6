//! JSON record loading.
//!
//! Record sets are plain JSON arrays of objects. Each object becomes one
//! [`Record`]; field values map onto [`Value`](crate::domain::Value) variants.
//!
//! # File Format
//!
//! ```json
//! [
//!   { "id": "1", "event": "birth", "date": "2020-01-01" },
//!   { "id": "2", "event": "death", "date": "2021-06-15", "tags": ["verified"] }
//! ]
//! ```

use super::RecordStore;
use crate::domain::error::Result;
use crate::domain::Record;
use std::path::Path;

impl RecordStore {
    /// Parses a record set from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`RecordViewError::Json`](crate::RecordViewError::Json) if the text
    /// is not an array of objects.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recordview::store::RecordStore;
    ///
    /// let store = RecordStore::from_json_str(r#"[{"id": "1"}, {"id": "2"}]"#)?;
    /// assert_eq!(store.len(), 2);
    /// # Ok::<(), recordview::RecordViewError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        tracing::debug!(count = records.len(), "records parsed from JSON");
        Ok(Self::new(records))
    }

    /// Reads and parses a record set from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a JSON error if its
    /// content is not an array of objects.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading records");
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serializes the record set back to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.records())?)
    }
}
