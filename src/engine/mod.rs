//! Pure view-derivation building blocks.
//!
//! Every function here is synchronous and side-effect free; the application layer
//! composes them into the filter → sort → paginate pipeline.
//!
//! # Modules
//!
//! - [`comparator`]: Comparator registry keyed by [`SortKind`](crate::domain::SortKind)
//! - [`filter`]: Conjunctive `field = value` filtering
//! - [`sort`]: Stable single-field sorting
//! - [`paginate`]: Page counts, slicing, and page clamping
//! - [`expansion`]: Single expanded-row tracking

pub mod comparator;
pub mod expansion;
pub mod filter;
pub mod paginate;
pub mod sort;

pub use comparator::{comparator_for, parse_instant, Comparator, SortDirection, SortState};
pub use expansion::Expansion;
pub use filter::{apply as apply_filter, FieldConstraint, FilterState};
pub use paginate::{slice as page_slice, total_pages, PageState};
pub use sort::{sort as sort_records, sort_newest_first, sort_oldest_first};
