//! View controller state and view model computation.
//!
//! This module defines [`ViewController`], the single owner of a view's record
//! store and its filter, sort, page and expansion state. It decides per mutation
//! kind whether to recompute the derived view itself or report intent outward,
//! and computes the [`ViewModel`] handed to the presentation layer.
//!
//! # Pipeline
//!
//! ```text
//! RecordStore → filter (uncontrolled only) → sort (uncontrolled only) → page slice
//! ```
//!
//! The filtered and sorted set is cached after every recomputation; page slicing
//! happens when the view model is computed.
//!
//! # Example
//!
//! ```rust
//! use recordview::{Record, ViewController};
//! use recordview::engine::FieldConstraint;
//!
//! let records: Vec<Record> = (1..=25)
//!     .map(|i| Record::new().with("id", i.to_string()).with("parity", if i % 2 == 0 { "even" } else { "odd" }))
//!     .collect();
//!
//! let mut controller = ViewController::builder(records).page_size(10).build()?;
//! controller.on_page_change(3);
//! controller.on_filter_change(FieldConstraint::new("parity", "even"));
//!
//! let vm = controller.compute_viewmodel();
//! assert_eq!(vm.pagination.current_page, 1);
//! assert_eq!(vm.total_count, 12);
//! # Ok::<(), recordview::RecordViewError>(())
//! ```

use super::actions::{Action, FilterChange, PageChange, SortChange};
use super::modes::{Mode, Modes};
use crate::domain::error::Result;
use crate::domain::{Column, Columns, Record, RecordId, SortKind, Value};
use crate::engine::comparator::comparator_for;
use crate::engine::{
    apply_filter, page_slice, sort_records, Expansion, FieldConstraint, FilterState, PageState,
    SortDirection, SortState,
};
use crate::store::RecordStore;
use crate::view::{PaginationInfo, ViewModel, WidgetEcho};
use crate::Config;

/// Builder for [`ViewController`].
///
/// Every setting is fixed once [`build`](Self::build) runs; in particular the
/// [`Modes`] never change for the lifetime of the view.
#[derive(Debug, Clone)]
pub struct ViewControllerBuilder {
    records: Vec<Record>,
    columns: Vec<Column>,
    modes: Modes,
    page_size: usize,
    initial_page: usize,
    id_field: String,
    filter: FilterState,
    sort: Option<SortState>,
    expandable: bool,
    external_total: Option<usize>,
}

impl ViewControllerBuilder {
    /// Applies page size, initial page and identifier field from `config`.
    #[must_use]
    pub fn config(mut self, config: &Config) -> Self {
        self.page_size = config.page_size;
        self.initial_page = config.initial_page;
        self.id_field.clone_from(&config.id_field);
        self
    }

    /// Declares the column descriptors.
    #[must_use]
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Sets all three modes at once.
    #[must_use]
    pub fn modes(mut self, modes: Modes) -> Self {
        self.modes = modes;
        self
    }

    /// Sets the filter mode.
    #[must_use]
    pub fn filter_mode(mut self, mode: Mode) -> Self {
        self.modes.filter = mode;
        self
    }

    /// Sets the sort mode.
    #[must_use]
    pub fn sort_mode(mut self, mode: Mode) -> Self {
        self.modes.sort = mode;
        self
    }

    /// Sets the page mode.
    #[must_use]
    pub fn page_mode(mut self, mode: Mode) -> Self {
        self.modes.page = mode;
        self
    }

    /// Items per page.
    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Page shown after construction and after the record set is replaced.
    #[must_use]
    pub fn initial_page(mut self, page: usize) -> Self {
        self.initial_page = page;
        self
    }

    /// Field holding each record's identifier.
    #[must_use]
    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Initial filter selection.
    #[must_use]
    pub fn initial_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    /// Initial sort selection.
    #[must_use]
    pub fn initial_sort(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Result count the owner already knows under controlled paging.
    ///
    /// Without it the initial page is taken as given until the owner reports its
    /// total through [`ViewController::set_external_page`].
    #[must_use]
    pub fn external_total(mut self, total_count: usize) -> Self {
        self.external_total = Some(total_count);
        self
    }

    /// Whether rows can be expanded.
    #[must_use]
    pub fn expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    /// Validates the settings and computes the first view.
    ///
    /// # Errors
    ///
    /// Returns [`RecordViewError::InvalidPageSize`](crate::RecordViewError::InvalidPageSize)
    /// for a zero page size and
    /// [`RecordViewError::DuplicateColumn`](crate::RecordViewError::DuplicateColumn)
    /// for repeated column names.
    pub fn build(self) -> Result<ViewController> {
        let columns = Columns::new(self.columns)?;
        let page = PageState::new(self.page_size)?;

        tracing::debug!(
            records = self.records.len(),
            page_size = self.page_size,
            modes = ?self.modes,
            expandable = self.expandable,
            "building view controller"
        );

        let external_total = if self.modes.page.is_controlled() {
            self.external_total
        } else {
            None
        };

        let mut controller = ViewController {
            store: RecordStore::new(self.records),
            columns,
            modes: self.modes,
            id_field: self.id_field,
            initial_page: self.initial_page,
            filter: self.filter,
            sort: self.sort,
            page,
            expansion: Expansion::new(self.expandable),
            external_total,
            derived: Vec::new(),
        };
        controller.recompute();
        if controller.owner_total_unknown() {
            controller.page.place(controller.initial_page);
        } else {
            controller.page.change_page(controller.initial_page);
        }
        Ok(controller)
    }
}

/// Owner of one view's record store and derived-view state.
///
/// Mutated through the `on_*` entry points (or [`handle_event`](super::handle_event)).
/// Each entry point returns whether the view needs to be redrawn and the outward
/// actions raised.
#[derive(Debug, Clone)]
pub struct ViewController {
    store: RecordStore,
    columns: Columns,
    modes: Modes,
    id_field: String,
    initial_page: usize,
    filter: FilterState,
    sort: Option<SortState>,
    page: PageState,
    expansion: Expansion,

    /// Result count reported by the owner under controlled paging.
    external_total: Option<usize>,

    /// Filtered and sorted records, cached after each recomputation.
    derived: Vec<Record>,
}

impl ViewController {
    /// Starts building a controller over `records`.
    #[must_use]
    pub fn builder(records: Vec<Record>) -> ViewControllerBuilder {
        let config = Config::default();
        ViewControllerBuilder {
            records,
            columns: Vec::new(),
            modes: Modes::default(),
            page_size: config.page_size,
            initial_page: config.initial_page,
            id_field: config.id_field,
            filter: FilterState::new(),
            sort: None,
            expandable: false,
            external_total: None,
        }
    }

    /// Mode of each mutation kind.
    #[must_use]
    pub const fn modes(&self) -> Modes {
        self.modes
    }

    /// Current filter selection.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Current sort selection.
    #[must_use]
    pub const fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Current page state.
    #[must_use]
    pub const fn page(&self) -> &PageState {
        &self.page
    }

    /// The full record store.
    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Filtered and sorted records across all pages.
    #[must_use]
    pub fn filtered_sorted_records(&self) -> &[Record] {
        &self.derived
    }

    /// Whether `id` is the expanded record.
    #[must_use]
    pub fn is_expanded(&self, id: &RecordId) -> bool {
        self.expansion.is_expanded(id)
    }

    /// Applies a filter widget change.
    ///
    /// Controlled filtering reports a [`FilterChange`] and only updates the echoed
    /// selection. Uncontrolled filtering recomputes the view and returns to page 1.
    pub fn on_filter_change(&mut self, constraint: FieldConstraint) -> (bool, Vec<Action>) {
        if self.modes.filter.is_disabled() {
            tracing::debug!(field = %constraint.field, "filtering disabled, ignoring change");
            return (false, vec![]);
        }
        if !self.columns.accepts(&constraint.field) {
            tracing::debug!(field = %constraint.field, "field not filterable, ignoring change");
            return (false, vec![]);
        }
        if !self.filter.set(&constraint) {
            tracing::trace!(field = %constraint.field, "filter value unchanged");
            return (false, vec![]);
        }

        tracing::debug!(
            field = %constraint.field,
            value = %constraint.value,
            mode = ?self.modes.filter,
            "filter changed"
        );

        if self.modes.filter.is_controlled() {
            let field_kind = self.columns.kind_of(&constraint.field);
            return (
                true,
                vec![Action::FilterChange(FilterChange {
                    all_values: self.filter.clone(),
                    changed_value: constraint,
                    field_kind,
                })],
            );
        }

        let actions = self.return_to_first_page();
        self.recompute();
        (true, actions)
    }

    /// Applies a sort request. A `kind` of `None` uses the column's declared kind.
    ///
    /// Controlled sorting reports a [`SortChange`]; uncontrolled sorting recomputes
    /// the view and returns to page 1.
    pub fn on_sort_change(
        &mut self,
        field: &str,
        direction: SortDirection,
        kind: Option<SortKind>,
    ) -> (bool, Vec<Action>) {
        if self.modes.sort.is_disabled() {
            tracing::debug!(field = %field, "sorting disabled, ignoring change");
            return (false, vec![]);
        }
        if !self.columns.accepts(field) {
            tracing::debug!(field = %field, "field not sortable, ignoring change");
            return (false, vec![]);
        }

        let kind = kind.unwrap_or_else(|| self.columns.kind_of(field));
        let requested = SortState::new(field, direction, kind);
        if self.sort.as_ref() == Some(&requested) {
            tracing::trace!(field = %field, "sort unchanged");
            return (false, vec![]);
        }

        tracing::debug!(
            field = %field,
            direction = ?direction,
            kind = ?kind,
            mode = ?self.modes.sort,
            "sort changed"
        );
        self.sort = Some(requested.clone());

        if self.modes.sort.is_controlled() {
            return (
                true,
                vec![Action::SortChange(SortChange {
                    all_values: requested,
                    changed_value: field.to_string(),
                    field_kind: kind,
                })],
            );
        }

        let actions = self.return_to_first_page();
        self.recompute();
        (true, actions)
    }

    /// Header click: sorts ascending by `field`, or flips the direction when it is
    /// already the sorted field.
    pub fn sort_by_column(&mut self, field: &str) -> (bool, Vec<Action>) {
        let direction = match &self.sort {
            Some(current) if current.field == field => current.direction.reversed(),
            _ => SortDirection::Asc,
        };
        self.on_sort_change(field, direction, None)
    }

    /// Requests a page. Never resets or recomputes filter/sort state.
    ///
    /// Uncontrolled paging clamps the request into range. Controlled paging
    /// reports a [`PageChange`]; the request is clamped only once the owner has
    /// reported its result count, and a request for the current page is dropped.
    pub fn on_page_change(&mut self, requested: usize) -> (bool, Vec<Action>) {
        let previous = self.page.current_page();
        match self.modes.page {
            Mode::Disabled => {
                tracing::debug!(requested, "paging disabled, ignoring change");
                (false, vec![])
            }
            Mode::Controlled => {
                let target = if self.owner_total_unknown() {
                    requested.max(1)
                } else {
                    let mut next = self.page;
                    next.change_page(requested)
                };
                if target == previous {
                    tracing::trace!(requested, previous, "already on requested page");
                    return (false, vec![]);
                }
                tracing::debug!(requested, target, previous, "page change requested");
                (
                    false,
                    vec![Action::PageChange(PageChange {
                        requested: target,
                        previous,
                        total_pages: self.page.total_pages(),
                    })],
                )
            }
            Mode::Uncontrolled => {
                let reached = self.page.change_page(requested);
                tracing::debug!(requested, reached, previous, "page changed");
                (reached != previous, vec![])
            }
        }
    }

    /// Moves one page forward if possible. Always forwarded while a controlling
    /// owner has not reported its result count.
    pub fn next_page(&mut self) -> (bool, Vec<Action>) {
        if !self.can_go_next() {
            return (false, vec![]);
        }
        self.on_page_change(self.page.current_page() + 1)
    }

    /// Moves one page back if possible.
    pub fn previous_page(&mut self) -> (bool, Vec<Action>) {
        if !self.page.can_go_previous() {
            return (false, vec![]);
        }
        self.on_page_change(self.page.current_page() - 1)
    }

    /// Records the page and result count chosen by the owner under controlled
    /// paging. Ignored in other modes.
    pub fn set_external_page(&mut self, current_page: usize, total_count: usize) -> bool {
        if !self.modes.page.is_controlled() {
            tracing::debug!(current_page, total_count, "paging not controlled, ignoring external page");
            return false;
        }
        let before = self.page;
        self.external_total = Some(total_count);
        self.page.set_total(total_count);
        self.page.change_page(current_page);
        tracing::debug!(
            current_page = self.page.current_page(),
            total_pages = self.page.total_pages(),
            "external page applied"
        );
        self.page != before
    }

    /// Replaces the record store when the new set differs by value.
    ///
    /// The derived view is rebuilt from scratch with the current filter and sort.
    /// The page returns to the initial page unless paging is controlled, and an
    /// expanded record that no longer exists is collapsed.
    pub fn replace_records(&mut self, records: Vec<Record>) -> bool {
        if !self.store.replace(records) {
            return false;
        }

        if let Some(id) = self.expansion.expanded().cloned() {
            if !self.store.contains_id(&self.id_field, &id) {
                tracing::debug!(id = %id, "expanded record removed, collapsing");
                self.expansion.collapse();
            }
        }

        self.recompute();
        if !self.modes.page.is_controlled() {
            self.page.change_page(self.initial_page);
        }
        true
    }

    /// Toggles expansion of the clicked row.
    pub fn toggle_expansion(&mut self, id: &RecordId) -> (bool, Vec<Action>) {
        if !self.expansion.toggle(id) {
            tracing::trace!(id = %id, "view not expandable, ignoring row click");
            return (false, vec![]);
        }
        let expanded = self.expansion.is_expanded(id);
        tracing::debug!(id = %id, expanded, "row expansion toggled");
        (
            true,
            vec![Action::ExpansionToggled {
                id: id.clone(),
                expanded,
            }],
        )
    }

    /// Distinct scalar values of `field` across the whole store, in natural order.
    ///
    /// These are the options a select-style filter widget offers.
    #[must_use]
    pub fn filter_options(&self, field: &str) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for text in self.store.records().iter().filter_map(|r| r.text(field)) {
            if !values.iter().any(|v| *v == *text) {
                values.push(text.into_owned());
            }
        }
        let comparator = comparator_for(SortKind::Default);
        values.sort_by(|a, b| {
            comparator.compare(Some(&Value::from(a.as_str())), Some(&Value::from(b.as_str())))
        });
        values
    }

    /// Computes the view model for the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ViewModel {
        let total_count = self.total_count();

        let (display_records, page_size, first_index, last_index) = if self.modes.page.is_disabled()
        {
            let len = self.derived.len();
            (self.derived.clone(), len, usize::from(len > 0), len)
        } else {
            let page_size = self.page.page_size();
            let display = page_slice(&self.derived, self.page.current_page(), page_size).to_vec();
            let (first, last) = self.page.item_range(total_count).unwrap_or((0, 0));
            (display, page_size, first, last)
        };

        ViewModel {
            filtered_sorted_records: self.derived.clone(),
            display_records,
            total_count,
            pagination: PaginationInfo {
                current_page: self.page.current_page(),
                total_pages: self.page.total_pages(),
                page_size,
                can_go_previous: self.page.can_go_previous(),
                can_go_next: self.can_go_next(),
                first_index,
                last_index,
            },
            expanded: self.expansion.expanded().cloned(),
            echo: WidgetEcho {
                filter: self.filter.clone(),
                sort: self.sort.clone(),
            },
        }
    }

    /// Paging is controlled but the owner has not said how many results exist.
    fn owner_total_unknown(&self) -> bool {
        self.modes.page.is_controlled() && self.external_total.is_none()
    }

    fn can_go_next(&self) -> bool {
        self.owner_total_unknown() || self.page.can_go_next()
    }

    fn total_count(&self) -> usize {
        match (self.modes.page, self.external_total) {
            (Mode::Controlled, Some(total)) => total,
            _ => self.derived.len(),
        }
    }

    /// Filter and sort mutations return to page 1. Under controlled paging the
    /// owner is asked to do so instead.
    fn return_to_first_page(&mut self) -> Vec<Action> {
        match self.modes.page {
            Mode::Uncontrolled => {
                self.page.reset();
                vec![]
            }
            Mode::Controlled if self.page.current_page() != 1 => {
                vec![Action::PageChange(PageChange {
                    requested: 1,
                    previous: self.page.current_page(),
                    total_pages: self.page.total_pages(),
                })]
            }
            Mode::Controlled | Mode::Disabled => vec![],
        }
    }

    /// Rebuilds the filtered and sorted set from the store snapshot.
    fn recompute(&mut self) {
        let _span = tracing::debug_span!("recompute",
            total_records = self.store.len(),
            filter_mode = ?self.modes.filter,
            sort_mode = ?self.modes.sort,
        )
        .entered();

        let filtered = if self.modes.filter.is_uncontrolled() {
            apply_filter(self.store.records(), &self.filter)
        } else {
            self.store.records().to_vec()
        };

        self.derived = match (&self.sort, self.modes.sort) {
            (Some(sort), Mode::Uncontrolled) => sort_records(&filtered, sort),
            _ => filtered,
        };

        match self.modes.page {
            Mode::Disabled => self.page.set_total(usize::from(!self.derived.is_empty())),
            Mode::Controlled if self.external_total.is_none() => {
                self.page.set_total_unclamped(self.derived.len());
            }
            _ => self.page.set_total(self.total_count()),
        }

        tracing::debug!(
            filtered_count = self.derived.len(),
            total_pages = self.page.total_pages(),
            current_page = self.page.current_page(),
            "view recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Vec<Record> {
        (1..=count)
            .map(|i| {
                Record::new()
                    .with("id", i.to_string())
                    .with("group", if i <= 5 { "small" } else { "large" })
            })
            .collect()
    }

    fn ids(records: &[Record]) -> Vec<String> {
        records.iter().filter_map(|r| r.id("id")).map(|id| id.to_string()).collect()
    }

    #[test]
    fn build_rejects_zero_page_size() {
        assert!(ViewController::builder(vec![]).page_size(0).build().is_err());
    }

    #[test]
    fn initial_page_is_clamped() {
        let controller = ViewController::builder(numbered(25)).initial_page(9).build().unwrap();
        assert_eq!(controller.page().current_page(), 3);
    }

    #[test]
    fn page_change_keeps_filter_and_sort() {
        let mut controller = ViewController::builder(numbered(25))
            .initial_sort(SortState::new("id", SortDirection::Desc, SortKind::Default))
            .build()
            .unwrap();

        let (changed, actions) = controller.on_page_change(2);
        assert!(changed);
        assert!(actions.is_empty());

        let vm = controller.compute_viewmodel();
        assert_eq!(vm.pagination.current_page, 2);
        assert_eq!(ids(&vm.display_records)[0], "15");
    }

    #[test]
    fn sort_change_resets_page() {
        let mut controller = ViewController::builder(numbered(25)).build().unwrap();
        controller.on_page_change(3);
        controller.on_sort_change("id", SortDirection::Desc, None);
        assert_eq!(controller.page().current_page(), 1);
        assert_eq!(ids(controller.filtered_sorted_records())[0], "25");
    }

    #[test]
    fn controlled_filter_reports_intent_without_recomputing() {
        let mut controller = ViewController::builder(numbered(25))
            .filter_mode(Mode::Controlled)
            .build()
            .unwrap();
        controller.on_page_change(2);

        let (changed, actions) = controller.on_filter_change(FieldConstraint::new("group", "small"));

        assert!(changed);
        assert_eq!(
            actions,
            vec![Action::FilterChange(FilterChange {
                all_values: FilterState::new().with("group", "small"),
                changed_value: FieldConstraint::new("group", "small"),
                field_kind: SortKind::Default,
            })]
        );
        assert_eq!(controller.filtered_sorted_records().len(), 25);
        assert_eq!(controller.page().current_page(), 2);
        assert_eq!(controller.compute_viewmodel().echo.filter.get("group"), Some("small"));
    }

    #[test]
    fn controlled_sort_carries_column_kind() {
        let mut controller = ViewController::builder(vec![])
            .columns(vec![Column::new("date").chronological()])
            .sort_mode(Mode::Controlled)
            .build()
            .unwrap();

        let (_, actions) = controller.on_sort_change("date", SortDirection::Desc, None);
        assert_eq!(
            actions,
            vec![Action::SortChange(SortChange {
                all_values: SortState::new("date", SortDirection::Desc, SortKind::Chronological),
                changed_value: "date".to_string(),
                field_kind: SortKind::Chronological,
            })]
        );
    }

    #[test]
    fn controlled_page_reports_clamped_request() {
        let mut controller = ViewController::builder(numbered(25))
            .page_mode(Mode::Controlled)
            .external_total(25)
            .build()
            .unwrap();

        let (changed, actions) = controller.on_page_change(9);
        assert!(!changed);
        assert_eq!(
            actions,
            vec![Action::PageChange(PageChange {
                requested: 3,
                previous: 1,
                total_pages: 3,
            })]
        );
        assert_eq!(controller.page().current_page(), 1);
    }

    #[test]
    fn controlled_page_forwards_request_before_owner_total() {
        let mut controller = ViewController::builder(numbered(10))
            .page_mode(Mode::Controlled)
            .build()
            .unwrap();

        let (changed, actions) = controller.on_page_change(2);
        assert!(!changed);
        assert_eq!(
            actions,
            vec![Action::PageChange(PageChange {
                requested: 2,
                previous: 1,
                total_pages: 1,
            })]
        );

        let (_, actions) = controller.next_page();
        assert!(matches!(
            actions.as_slice(),
            [Action::PageChange(PageChange { requested: 2, .. })]
        ));
        assert!(controller.compute_viewmodel().pagination.can_go_next);
        assert_eq!(controller.page().current_page(), 1);
    }

    #[test]
    fn controlled_request_for_current_page_is_dropped() {
        let mut controller = ViewController::builder(numbered(10))
            .page_mode(Mode::Controlled)
            .build()
            .unwrap();
        assert_eq!(controller.on_page_change(1), (false, vec![]));
        assert_eq!(controller.on_page_change(0), (false, vec![]));

        controller.set_external_page(3, 30);
        assert_eq!(controller.on_page_change(8), (false, vec![]));
    }

    #[test]
    fn controlled_initial_page_uses_owner_total() {
        let controller = ViewController::builder(numbered(10))
            .page_mode(Mode::Controlled)
            .initial_page(3)
            .external_total(45)
            .build()
            .unwrap();

        let vm = controller.compute_viewmodel();
        assert_eq!(vm.pagination.current_page, 3);
        assert_eq!(vm.pagination.total_pages, 5);
        assert_eq!(vm.display_records.len(), 10);
        assert_eq!(vm.pagination.label(vm.total_count), "21-30 of 45");
    }

    #[test]
    fn controlled_initial_page_kept_until_owner_reports() {
        let mut controller = ViewController::builder(numbered(10))
            .page_mode(Mode::Controlled)
            .initial_page(3)
            .build()
            .unwrap();
        assert_eq!(controller.page().current_page(), 3);

        controller.replace_records(numbered(8));
        assert_eq!(controller.page().current_page(), 3);
    }

    #[test]
    fn owner_total_ignored_without_controlled_paging() {
        let controller = ViewController::builder(numbered(10))
            .initial_page(3)
            .external_total(45)
            .build()
            .unwrap();

        assert_eq!(controller.page().current_page(), 1);
        assert_eq!(controller.compute_viewmodel().total_count, 10);
    }

    #[test]
    fn uncontrolled_filter_under_controlled_paging_asks_for_page_one() {
        let mut controller = ViewController::builder(numbered(10))
            .page_mode(Mode::Controlled)
            .build()
            .unwrap();
        controller.set_external_page(4, 100);

        let (_, actions) = controller.on_filter_change(FieldConstraint::new("group", "large"));
        assert_eq!(
            actions,
            vec![Action::PageChange(PageChange {
                requested: 1,
                previous: 4,
                total_pages: 10,
            })]
        );
    }

    #[test]
    fn external_page_drives_pass_through_display() {
        let mut controller = ViewController::builder(numbered(10))
            .page_mode(Mode::Controlled)
            .build()
            .unwrap();

        assert!(controller.set_external_page(3, 45));
        let vm = controller.compute_viewmodel();
        assert_eq!(vm.total_count, 45);
        assert_eq!(vm.pagination.total_pages, 5);
        assert_eq!(vm.pagination.current_page, 3);
        assert_eq!(vm.display_records.len(), 10);
        assert_eq!(vm.pagination.label(vm.total_count), "21-30 of 45");
    }

    #[test]
    fn external_page_ignored_when_uncontrolled() {
        let mut controller = ViewController::builder(numbered(10)).build().unwrap();
        assert!(!controller.set_external_page(3, 45));
        assert_eq!(controller.compute_viewmodel().total_count, 10);
    }

    #[test]
    fn disabled_modes_ignore_requests() {
        let mut controller = ViewController::builder(numbered(25))
            .modes(Modes {
                filter: Mode::Disabled,
                sort: Mode::Disabled,
                page: Mode::Disabled,
            })
            .build()
            .unwrap();

        assert_eq!(controller.on_filter_change(FieldConstraint::new("group", "small")), (false, vec![]));
        assert_eq!(controller.on_sort_change("id", SortDirection::Desc, None), (false, vec![]));
        assert_eq!(controller.on_page_change(2), (false, vec![]));

        let vm = controller.compute_viewmodel();
        assert_eq!(vm.display_records.len(), 25);
        assert_eq!(vm.pagination.total_pages, 1);
        assert_eq!((vm.pagination.first_index, vm.pagination.last_index), (1, 25));
    }

    #[test]
    fn disabled_paging_reports_all_records_as_page_size() {
        let controller = ViewController::builder(numbered(25))
            .page_mode(Mode::Disabled)
            .page_size(10)
            .build()
            .unwrap();

        let vm = controller.compute_viewmodel();
        assert_eq!(vm.pagination.page_size, 25);
        assert_eq!(vm.pagination.page_size, vm.display_records.len());
    }

    #[test]
    fn excluded_columns_ignore_filter_and_sort() {
        let mut controller = ViewController::builder(numbered(5))
            .columns(vec![Column::new("id"), Column::new("group").excluded()])
            .build()
            .unwrap();

        assert_eq!(controller.on_filter_change(FieldConstraint::new("group", "small")), (false, vec![]));
        assert_eq!(controller.on_sort_change("group", SortDirection::Asc, None), (false, vec![]));
        assert!(controller.filter().is_empty());
        assert!(controller.sort().is_none());
    }

    #[test]
    fn sort_by_column_toggles_direction() {
        let mut controller = ViewController::builder(numbered(3)).build().unwrap();
        controller.sort_by_column("id");
        assert_eq!(controller.sort().map(|s| s.direction), Some(SortDirection::Asc));
        controller.sort_by_column("id");
        assert_eq!(controller.sort().map(|s| s.direction), Some(SortDirection::Desc));
        assert_eq!(ids(controller.filtered_sorted_records()), vec!["3", "2", "1"]);
    }

    #[test]
    fn next_and_previous_stop_at_bounds() {
        let mut controller = ViewController::builder(numbered(15)).build().unwrap();
        assert_eq!(controller.previous_page(), (false, vec![]));
        assert!(controller.next_page().0);
        assert_eq!(controller.next_page(), (false, vec![]));
        assert_eq!(controller.page().current_page(), 2);
    }

    #[test]
    fn replacing_records_resets_page_and_keeps_filter() {
        let mut controller = ViewController::builder(numbered(25))
            .initial_filter(FilterState::new().with("group", "large"))
            .build()
            .unwrap();
        controller.on_page_change(2);

        assert!(controller.replace_records(numbered(30)));
        assert_eq!(controller.page().current_page(), 1);
        assert_eq!(controller.filtered_sorted_records().len(), 25);
        assert!(!controller.replace_records(numbered(30)));
    }

    #[test]
    fn replacing_records_collapses_vanished_expansion() {
        let mut controller = ViewController::builder(numbered(5)).expandable(true).build().unwrap();
        controller.toggle_expansion(&RecordId::new("5"));

        controller.replace_records(numbered(6));
        assert!(controller.is_expanded(&RecordId::new("5")));

        controller.replace_records(numbered(3));
        assert!(!controller.is_expanded(&RecordId::new("5")));
    }

    #[test]
    fn row_click_raises_expansion_action() {
        let mut controller = ViewController::builder(numbered(3)).expandable(true).build().unwrap();
        let id = RecordId::new("2");

        let (changed, actions) = controller.toggle_expansion(&id);
        assert!(changed);
        assert_eq!(actions, vec![Action::ExpansionToggled { id: id.clone(), expanded: true }]);
        assert!(controller.compute_viewmodel().is_expanded(&id));
    }

    #[test]
    fn filter_options_are_distinct_and_ordered() {
        let records = vec![
            Record::new().with("n", "10"),
            Record::new().with("n", "9"),
            Record::new().with("n", "10"),
            Record::new().with("n", "b"),
            Record::new(),
        ];
        let controller = ViewController::builder(records).build().unwrap();
        assert_eq!(controller.filter_options("n"), vec!["9", "10", "b"]);
    }

    #[test]
    fn config_applies_page_size() {
        let config = Config {
            page_size: 4,
            ..Config::default()
        };
        let controller = ViewController::builder(numbered(10)).config(&config).build().unwrap();
        assert_eq!(controller.page().total_pages(), 3);
    }
}
