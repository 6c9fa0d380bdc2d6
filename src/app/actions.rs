//! Actions representing outward events raised by the controller.
//!
//! The event handler returns a `Vec<Action>` after processing each event. In
//! controlled mode these carry the intent the external owner must act on; the
//! expansion toggle is reported in every mode so the owner can react to row clicks.
//!
//! # Example
//!
//! ```rust
//! use recordview::app::{Action, FilterChange};
//! use recordview::domain::SortKind;
//! use recordview::engine::{FieldConstraint, FilterState};
//!
//! let action = Action::FilterChange(FilterChange {
//!     all_values: FilterState::new().with("event", "birth"),
//!     changed_value: FieldConstraint::new("event", "birth"),
//!     field_kind: SortKind::Default,
//! });
//! assert!(matches!(action, Action::FilterChange(_)));
//! ```

use crate::domain::{RecordId, SortKind};
use crate::engine::{FieldConstraint, FilterState, SortState};
use serde::Serialize;

/// Filter intent: the complete selection plus the widget that changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChange {
    /// Every filter selection after the change.
    pub all_values: FilterState,
    /// The constraint that changed.
    pub changed_value: FieldConstraint,
    /// Comparator kind of the changed field.
    pub field_kind: SortKind,
}

/// Sort intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortChange {
    /// The complete requested sort.
    pub all_values: SortState,
    /// Field whose header was activated.
    pub changed_value: String,
    /// Comparator kind of that field.
    pub field_kind: SortKind,
}

/// Page intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageChange {
    /// Requested 1-based page.
    pub requested: usize,
    /// Page shown before the request.
    pub previous: usize,
    /// Page count known to the controller.
    pub total_pages: usize,
}

/// Outward events for the embedding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Action {
    /// Filter selection changed under controlled filtering.
    FilterChange(FilterChange),

    /// Sort selection changed under controlled sorting.
    SortChange(SortChange),

    /// Page requested under controlled paging.
    PageChange(PageChange),

    /// A row click toggled expansion.
    ExpansionToggled {
        /// Record that was clicked.
        id: RecordId,
        /// Whether it is now expanded.
        expanded: bool,
    },
}
