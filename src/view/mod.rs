//! Derived view layer.
//!
//! ```text
//! ViewController → compute_viewmodel → ViewModel → presentation layer
//! ```
//!
//! - [`viewmodel`]: View model types delivered to the presentation layer

pub mod viewmodel;

pub use viewmodel::{PaginationInfo, ViewModel, WidgetEcho};
