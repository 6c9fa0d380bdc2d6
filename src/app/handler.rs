//! Event handling and state transition logic.
//!
//! This module implements the event handler that translates input from the
//! presentation layer and the owning application into [`ViewController`]
//! mutations and outward [`Action`]s.
//!
//! # Architecture
//!
//! ```text
//! Widget / Owner Input → Event → handle_event → ViewController → (needs_render, Actions)
//! ```
//!
//! # Event Types
//!
//! - **Widgets**: `FilterChanged`, `SortChanged`, `SortByColumn`, `PageChanged`,
//!   `NextPage`, `PreviousPage`, `RowClicked`
//! - **Owner**: `RecordsReplaced`, `ExternalPage`
//!
//! # Example
//!
//! ```rust
//! use recordview::{handle_event, Event, Record, ViewController};
//!
//! let mut controller = ViewController::builder(vec![Record::new().with("id", "1")]).build()?;
//! let (needs_render, actions) = handle_event(&mut controller, &Event::NextPage);
//! assert!(!needs_render);
//! assert!(actions.is_empty());
//! # Ok::<(), recordview::RecordViewError>(())
//! ```

use crate::app::{Action, ViewController};
use crate::domain::{Record, RecordId, SortKind};
use crate::engine::{FieldConstraint, SortDirection};

/// Input to the view controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A filter widget changed value.
    FilterChanged(FieldConstraint),

    /// An explicit sort was requested.
    SortChanged {
        /// Field to sort by.
        field: String,
        /// Requested direction.
        direction: SortDirection,
        /// Comparator kind; `None` uses the column's declared kind.
        kind: Option<SortKind>,
    },

    /// A column header was clicked.
    SortByColumn(String),

    /// A specific page was requested.
    PageChanged(usize),

    /// The "next" pagination control was activated.
    NextPage,

    /// The "previous" pagination control was activated.
    PreviousPage,

    /// A row was clicked.
    RowClicked(RecordId),

    /// The owner supplied a new record set.
    RecordsReplaced(Vec<Record>),

    /// The owner reported its page position under controlled paging.
    ExternalPage {
        /// Page the owner is showing.
        current_page: usize,
        /// Result count known to the owner.
        total_count: usize,
    },
}

/// Processes an event, mutates the controller, and returns whether the view needs
/// to be redrawn together with the outward actions raised.
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(controller: &mut ViewController, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::FilterChanged(constraint) => controller.on_filter_change(constraint.clone()),
        Event::SortChanged {
            field,
            direction,
            kind,
        } => controller.on_sort_change(field, *direction, *kind),
        Event::SortByColumn(field) => controller.sort_by_column(field),
        Event::PageChanged(page) => controller.on_page_change(*page),
        Event::NextPage => controller.next_page(),
        Event::PreviousPage => controller.previous_page(),
        Event::RowClicked(id) => controller.toggle_expansion(id),
        Event::RecordsReplaced(records) => {
            let changed = controller.replace_records(records.clone());
            if !changed {
                tracing::debug!("records unchanged, skipping render");
            }
            (changed, vec![])
        }
        Event::ExternalPage {
            current_page,
            total_count,
        } => (
            controller.set_external_page(*current_page, *total_count),
            vec![],
        ),
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::FilterChanged(_) => "filter_changed",
        Event::SortChanged { .. } => "sort_changed",
        Event::SortByColumn(_) => "sort_by_column",
        Event::PageChanged(_) => "page_changed",
        Event::NextPage => "next_page",
        Event::PreviousPage => "previous_page",
        Event::RowClicked(_) => "row_clicked",
        Event::RecordsReplaced(_) => "records_replaced",
        Event::ExternalPage { .. } => "external_page",
    }
}
