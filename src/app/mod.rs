//! Application layer coordinating view state, events, and actions.
//!
//! This module sits between the presentation layer (which raises widget events and
//! draws view models) and the pure engine functions. It implements the
//! event-driven flow that keeps a view's derived state consistent.
//!
//! # Architecture
//!
//! ```text
//! Widget Input → Events → Event Handler → Controller Mutations → Actions → Owner
//!                                                ↓
//!                                           View Model
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Outward events raised by the controller
//! - [`handler`]: Event processing and dispatch
//! - [`modes`]: Controlled / uncontrolled / disabled mode per mutation kind
//! - [`state`]: View controller and view model computation
//!
//! # Example
//!
//! ```rust
//! use recordview::app::{handle_event, Event, ViewController};
//! use recordview::Record;
//!
//! let mut controller = ViewController::builder(vec![Record::new().with("id", "1")]).build()?;
//! let (_needs_render, _actions) = handle_event(&mut controller, &Event::PageChanged(2));
//! # Ok::<(), recordview::RecordViewError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, FilterChange, PageChange, SortChange};
pub use handler::{handle_event, Event};
pub use modes::{Mode, Modes};
pub use state::{ViewController, ViewControllerBuilder};
