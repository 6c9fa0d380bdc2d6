//! View model types representing derived view state.
//!
//! View models are computed from the controller's state and handed to whatever
//! presentation layer draws the table. They contain no business logic, only
//! display-ready data, and are never persisted.
//!
//! # Example
//!
//! ```rust
//! use recordview::{Record, ViewController};
//!
//! let records = vec![Record::new().with("id", "1")];
//! let controller = ViewController::builder(records).build()?;
//!
//! let vm = controller.compute_viewmodel();
//! assert_eq!(vm.display_records.len(), 1);
//! assert_eq!(vm.pagination.total_pages, 1);
//! # Ok::<(), recordview::RecordViewError>(())
//! ```

use crate::domain::{Record, RecordId};
use crate::engine::{FilterState, SortState};
use serde::Serialize;

/// Complete derived view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    /// Every record passing the filter, in sorted order.
    pub filtered_sorted_records: Vec<Record>,

    /// The contiguous slice of `filtered_sorted_records` shown on the current page.
    pub display_records: Vec<Record>,

    /// Number of records across all pages.
    pub total_count: usize,

    /// Pagination controls state.
    pub pagination: PaginationInfo,

    /// Currently expanded record, if any.
    pub expanded: Option<RecordId>,

    /// Selections echoed back to the filter and sort widgets.
    pub echo: WidgetEcho,
}

impl ViewModel {
    /// Whether `id` is the expanded record.
    #[must_use]
    pub fn is_expanded(&self, id: &RecordId) -> bool {
        self.expanded.as_ref() == Some(id)
    }
}

/// Pagination display information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    /// Active 1-based page.
    pub current_page: usize,

    /// Derived page count.
    pub total_pages: usize,

    /// Items per page.
    pub page_size: usize,

    /// Whether the "previous" control is enabled.
    pub can_go_previous: bool,

    /// Whether the "next" control is enabled.
    pub can_go_next: bool,

    /// 1-based index of the first item on the page (`0` when empty).
    pub first_index: usize,

    /// 1-based index of the last item on the page (`0` when empty).
    pub last_index: usize,
}

impl PaginationInfo {
    /// Summary label such as `"11-20 of 25"`.
    #[must_use]
    pub fn label(&self, total_count: usize) -> String {
        format!("{}-{} of {total_count}", self.first_index, self.last_index)
    }
}

/// Current widget selections, kept in both controlled and uncontrolled modes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WidgetEcho {
    /// Selected filter values.
    pub filter: FilterState,

    /// Selected sort, if any.
    pub sort: Option<SortState>,
}
