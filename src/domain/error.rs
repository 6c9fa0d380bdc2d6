//! Error types for the record view engine.
//!
//! This module defines the centralized error type [`RecordViewError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. Errors only surface
//! at construction, configuration, and loading boundaries; runtime view mutations
//! clamp or ignore invalid input instead of failing.

use thiserror::Error;

/// The main error type for record view operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]` for
/// automatic conversion.
///
/// # Examples
///
/// ```
/// use recordview::RecordViewError;
///
/// fn validate() -> Result<(), RecordViewError> {
///     Err(RecordViewError::Config("unknown match strategy".to_string()))
/// }
///
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum RecordViewError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, typically while reading a
    /// record file or a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record data could not be decoded.
    ///
    /// Occurs when a record file is not a JSON array of objects.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be decoded.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration is invalid.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A page size of zero was supplied.
    #[error("Invalid page size: {0} (must be greater than zero)")]
    InvalidPageSize(usize),

    /// Two column descriptors share the same field name.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}

/// A specialized `Result` type for record view operations.
pub type Result<T> = std::result::Result<T, RecordViewError>;
