//! Domain layer for the record view engine.
//!
//! This module contains the core domain types, independent of any presentation
//! surface: the opaque [`Record`] row, column descriptors, and error types.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Record, value and identifier types
//! - [`column`]: Column descriptors and comparator kinds
//!
//! # Examples
//!
//! ```
//! use recordview::domain::{Column, Columns, Result};
//!
//! fn columns() -> Result<Columns> {
//!     Columns::new(vec![Column::new("event"), Column::new("date").chronological()])
//! }
//!
//! assert!(columns().is_ok());
//! ```

pub mod column;
pub mod error;
pub mod record;

pub use column::{Column, Columns, SortKind};
pub use error::{RecordViewError, Result};
pub use record::{Record, RecordId, Value};
