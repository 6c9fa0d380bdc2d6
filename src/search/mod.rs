//! Debounced incremental search for autocomplete inputs.
//!
//! # Modules
//!
//! - [`autocomplete`]: Selection state machine and debounce handling
//! - [`matcher`]: Prefix and fuzzy candidate matching
//! - [`timer`]: Scheduler trait and virtual-time timer queue
//!
//! # Example
//!
//! ```rust
//! use recordview::search::{Autocomplete, Candidate, SearchEvent, TimerQueue, handle_search_event};
//! use recordview::Config;
//! use std::time::Duration;
//!
//! let candidates = vec![Candidate::new("1", "Harbour", "Harbour")];
//! let mut search = Autocomplete::new(candidates, &Config::default());
//! let mut timers = TimerQueue::new();
//!
//! handle_search_event(&mut search, &mut timers, &SearchEvent::Input("har".into()));
//! for id in timers.advance(Duration::from_millis(300)) {
//!     handle_search_event(&mut search, &mut timers, &SearchEvent::TimerFired(id));
//! }
//! assert_eq!(search.matches().len(), 1);
//! ```

pub mod autocomplete;
pub mod matcher;
pub mod timer;

pub use autocomplete::{handle_search_event, Autocomplete, SearchAction, SearchEvent, SearchState};
pub use matcher::{filter_candidates, Candidate, MatchStrategy};
pub use timer::{Scheduler, TimerId, TimerQueue};
