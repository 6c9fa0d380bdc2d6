//! Recordview: a data-view engine for in-memory record collections.
//!
//! Recordview takes an in-memory collection of opaque records and derives the view a
//! table or result list shows:
//! - Conjunctive `field = value` filtering
//! - Stable single-field sorting with natural and chronological comparators
//! - Pagination with clamped page requests
//! - Single-row expansion
//! - Controlled mode, where an external owner applies changes and the engine only
//!   reports intent
//! - Debounced incremental search for autocomplete inputs

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Demo Binary (main.rs)                              │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Mode rules
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Engine        │   │ Store         │   │ Search        │
//! │ (engine/)     │   │ (store/)      │   │ (search/)     │
//! │ - Filter      │   │ - Record set  │   │ - Debounce    │
//! │ - Sort        │   │ - JSON I/O    │   │ - Matching    │
//! │ - Paginate    │   │               │   │ - Selection   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & View Layers                               │
//! │  - Records and values (domain/record)               │
//! │  - Column descriptors (domain/column)               │
//! │  - Error types (domain/error)                       │
//! │  - View model (view/)                               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber setup                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: View controller with event/action model
//! - [`domain`]: Core domain types (records, columns, errors)
//! - [`engine`]: Pure filter, sort, paginate, and expansion functions
//! - [`store`]: Record store and JSON loading
//! - [`view`]: View model delivered to the presentation layer
//! - [`search`]: Debounced autocomplete
//! - [`observability`]: tracing subscriber initialization
//!
//! # Configuration
//!
//! Configuration comes from a string map or a TOML file:
//!
//! ```toml
//! page_size = 20
//! initial_page = 1
//! id_field = "id"
//! debounce_ms = 300
//! max_suggestions = 10
//! match_strategy = "prefix"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use recordview::{handle_event, Event, FieldConstraint, Record, ViewController};
//!
//! let records: Vec<Record> = (1..=25)
//!     .map(|i| {
//!         Record::new()
//!             .with("id", i.to_string())
//!             .with("parity", if i % 2 == 0 { "even" } else { "odd" })
//!     })
//!     .collect();
//!
//! let mut controller = ViewController::builder(records).build()?;
//! handle_event(&mut controller, &Event::PageChanged(3));
//! handle_event(
//!     &mut controller,
//!     &Event::FilterChanged(FieldConstraint::new("parity", "even")),
//! );
//!
//! let view = controller.compute_viewmodel();
//! assert_eq!(view.total_count, 12);
//! assert_eq!(view.pagination.current_page, 1);
//! # Ok::<(), recordview::RecordViewError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Explicit Modes
//!
//! Each mutation kind (filter, sort, page) has a [`Mode`] fixed at construction.
//! Uncontrolled mutations update internal state and recompute; controlled ones
//! only return an [`Action`] for the owner; disabled ones are ignored.
//!
//! ## Total Ordering
//!
//! Missing values and unparsable dates sort last in both directions, and numbers
//! order before text, so every comparator is a total order and sorting is stable.
//!
//! ## Virtual-Time Debounce
//!
//! The autocomplete arms timers through a [`search::Scheduler`] instead of
//! sleeping, so hosts decide how time passes and tests are deterministic.

pub mod app;
pub mod domain;
pub mod engine;
pub mod search;
pub mod store;
pub mod view;

pub mod observability;

pub use app::{handle_event, Action, Event, Mode, Modes, ViewController, ViewControllerBuilder};
pub use domain::{Column, Columns, Record, RecordId, RecordViewError, Result, SortKind, Value};
pub use engine::{FieldConstraint, FilterState, SortDirection, SortState};
pub use search::MatchStrategy;
pub use store::RecordStore;
pub use view::ViewModel;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Engine configuration.
///
/// # Example
///
/// ```rust
/// use recordview::Config;
///
/// let config = Config::from_toml_str("page_size = 25\nmatch_strategy = \"fuzzy\"")?;
/// assert_eq!(config.page_size, 25);
/// assert_eq!(config.debounce_ms, 300);
/// # Ok::<(), recordview::RecordViewError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Records per page. Default: 10
    pub page_size: usize,

    /// 1-based page shown after construction and record replacement. Default: 1
    pub initial_page: usize,

    /// Field holding each record's identifier. Default: `"id"`
    pub id_field: String,

    /// Autocomplete quiet period in milliseconds. Default: 300
    pub debounce_ms: u64,

    /// Maximum autocomplete suggestions. Default: 10
    pub max_suggestions: usize,

    /// Autocomplete matching. Default: prefix
    pub match_strategy: MatchStrategy,

    /// Tracing level.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: 10,
            initial_page: 1,
            id_field: "id".to_string(),
            debounce_ms: 300,
            max_suggestions: 10,
            match_strategy: MatchStrategy::Prefix,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// Each key falls back to its default when missing or unparsable. Zero page
    /// sizes, pages, and suggestion caps also fall back.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use recordview::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.debounce_ms, 300);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let positive = |key: &str, default: usize| {
            map.get(key)
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(default)
        };

        let debounce_ms = map
            .get("debounce_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);

        let match_strategy = map
            .get("match_strategy")
            .and_then(|s| {
                s.parse::<MatchStrategy>()
                    .map_err(|e| tracing::debug!(error = %e, "ignoring match_strategy"))
                    .ok()
            })
            .unwrap_or(defaults.match_strategy);

        let id_field = map
            .get("id_field")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.id_field, String::from);

        Self {
            page_size: positive("page_size", defaults.page_size),
            initial_page: positive("initial_page", defaults.initial_page),
            id_field,
            debounce_ms,
            max_suggestions: positive("max_suggestions", defaults.max_suggestions),
            match_strategy,
            trace_level: map.get("trace_level").cloned(),
        }
    }

    /// Parses and validates a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RecordViewError::Toml`] for malformed TOML and the errors of
    /// [`Config::validate`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`RecordViewError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// - [`RecordViewError::InvalidPageSize`] if `page_size` is zero
    /// - [`RecordViewError::Config`] if `initial_page` or `max_suggestions` is zero,
    ///   or `id_field` is empty
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(RecordViewError::InvalidPageSize(0));
        }
        if self.initial_page == 0 {
            return Err(RecordViewError::Config("initial_page must be at least 1".to_string()));
        }
        if self.max_suggestions == 0 {
            return Err(RecordViewError::Config(
                "max_suggestions must be at least 1".to_string(),
            ));
        }
        if self.id_field.trim().is_empty() {
            return Err(RecordViewError::Config("id_field must not be empty".to_string()));
        }
        Ok(())
    }
}
