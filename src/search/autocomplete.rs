//! Debounced incremental search with a small selection state machine.
//!
//! Keystrokes update the displayed text immediately and re-arm a quiet-period
//! timer. Filtering runs only when the timer elapses uninterrupted.
//!
//! ```text
//!          input            timer (≥1 match)        choose
//! Idle ──────────→ Typing ──────────────────→ DropdownOpen ──────→ Selected
//!                    ↑  │ timer (0 matches)        │ input            │ input
//!                    │  └──────→ Typing/Idle       ↓                  ↓
//!                    └──────────────────────── Typing ←───────────────┘
//! ```
//!
//! Blurring in any state but `Selected` reports a free-text candidate.

use super::matcher::{filter_candidates, Candidate, MatchStrategy};
use super::timer::{Scheduler, TimerId};
use crate::Config;
use serde::Serialize;
use std::time::Duration;

/// Selection state of the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    /// Nothing typed, or input committed on blur.
    #[default]
    Idle,
    /// Text changed since the last evaluation, or it matched nothing.
    Typing,
    /// Matches are shown.
    DropdownOpen,
    /// A candidate was chosen.
    Selected,
}

/// Input to the autocomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The input text changed.
    Input(String),
    /// A scheduler timer elapsed.
    TimerFired(TimerId),
    /// A dropdown entry was clicked.
    Choose(usize),
    /// The keyboard-highlighted entry was confirmed.
    ChooseHighlighted,
    /// Move the keyboard highlight down.
    HighlightNext,
    /// Move the keyboard highlight up.
    HighlightPrevious,
    /// The input lost focus.
    Blur,
    /// The widget is going away.
    Teardown,
}

/// Outward events raised by the autocomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SearchAction {
    /// A candidate was chosen, or free text was committed on blur.
    Selected(Candidate),
}

/// Debounced autocomplete over a static candidate list.
#[derive(Debug)]
pub struct Autocomplete {
    candidates: Vec<Candidate>,
    text: String,
    state: SearchState,
    matches: Vec<Candidate>,
    highlighted: Option<usize>,
    pending: Option<TimerId>,
    debounce: Duration,
    max_suggestions: usize,
    strategy: MatchStrategy,
    evaluations: usize,
    torn_down: bool,
}

impl Autocomplete {
    /// Creates an autocomplete using the debounce, cap, and strategy from `config`.
    #[must_use]
    pub fn new(candidates: Vec<Candidate>, config: &Config) -> Self {
        Self {
            candidates,
            text: String::new(),
            state: SearchState::Idle,
            matches: Vec::new(),
            highlighted: None,
            pending: None,
            debounce: Duration::from_millis(config.debounce_ms),
            max_suggestions: config.max_suggestions,
            strategy: config.match_strategy,
            evaluations: 0,
            torn_down: false,
        }
    }

    /// Text currently shown in the input.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current selection state.
    #[must_use]
    pub const fn state(&self) -> SearchState {
        self.state
    }

    /// Entries shown in the dropdown; empty unless it is open.
    #[must_use]
    pub fn matches(&self) -> &[Candidate] {
        if self.state == SearchState::DropdownOpen {
            &self.matches
        } else {
            &[]
        }
    }

    /// Index of the keyboard-highlighted match, if any.
    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Number of filter passes run so far.
    #[must_use]
    pub const fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Whether a debounce timer is armed.
    #[must_use]
    pub const fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    /// Updates the displayed text and re-arms the debounce timer.
    pub fn on_input<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, text: &str) {
        if self.torn_down {
            return;
        }

        self.text = text.to_string();
        self.state = SearchState::Typing;
        self.highlighted = None;

        if let Some(previous) = self.pending.take() {
            scheduler.cancel(previous);
        }
        self.pending = Some(scheduler.schedule(self.debounce));

        tracing::trace!(text_len = self.text.len(), "search input, debounce re-armed");
    }

    /// Runs the filter if `id` is the armed debounce timer. Returns whether it was.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.torn_down || self.pending != Some(id) {
            return false;
        }
        self.pending = None;

        let _span = tracing::debug_span!("search_evaluate", query_len = self.text.len()).entered();

        self.matches = filter_candidates(
            &self.candidates,
            &self.text,
            self.strategy,
            self.max_suggestions,
        );
        self.evaluations += 1;
        self.highlighted = None;
        self.state = if !self.matches.is_empty() {
            SearchState::DropdownOpen
        } else if self.text.trim().is_empty() {
            SearchState::Idle
        } else {
            SearchState::Typing
        };

        tracing::debug!(
            matched = self.matches.len(),
            state = ?self.state,
            "search evaluated"
        );
        true
    }

    /// Selects the dropdown entry at `index`.
    pub fn choose<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        index: usize,
    ) -> Option<SearchAction> {
        if self.torn_down || self.state != SearchState::DropdownOpen {
            return None;
        }
        let candidate = self.matches.get(index)?.clone();

        if let Some(pending) = self.pending.take() {
            scheduler.cancel(pending);
        }
        self.text.clone_from(&candidate.display_label);
        self.state = SearchState::Selected;
        self.matches.clear();
        self.highlighted = None;

        tracing::debug!(id = %candidate.id, "candidate selected");
        Some(SearchAction::Selected(candidate))
    }

    /// Selects the keyboard-highlighted entry, if any.
    pub fn choose_highlighted<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
    ) -> Option<SearchAction> {
        let index = self.highlighted?;
        self.choose(scheduler, index)
    }

    /// Moves the highlight down, wrapping to the first entry.
    pub fn highlight_next(&mut self) {
        let count = self.matches().len();
        if count == 0 {
            return;
        }
        self.highlighted = Some(self.highlighted.map_or(0, |i| (i + 1) % count));
    }

    /// Moves the highlight up, wrapping to the last entry.
    pub fn highlight_previous(&mut self) {
        let count = self.matches().len();
        if count == 0 {
            return;
        }
        self.highlighted = Some(self.highlighted.map_or(count - 1, |i| (i + count - 1) % count));
    }

    /// Commits the raw text as a free-text candidate unless a candidate was chosen.
    pub fn on_blur<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> Option<SearchAction> {
        if self.torn_down || self.state == SearchState::Selected {
            return None;
        }

        if let Some(pending) = self.pending.take() {
            scheduler.cancel(pending);
        }
        self.state = SearchState::Idle;
        self.matches.clear();
        self.highlighted = None;

        tracing::debug!(text_len = self.text.len(), "blur without selection, committing free text");
        Some(SearchAction::Selected(Candidate::free_text(self.text.clone())))
    }

    /// Cancels any armed timer. Later events are ignored.
    pub fn teardown<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(pending) = self.pending.take() {
            let cancelled = scheduler.cancel(pending);
            tracing::debug!(cancelled, "search teardown");
        }
        self.torn_down = true;
        self.state = SearchState::Idle;
        self.matches.clear();
        self.highlighted = None;
    }
}

/// Dispatches a search event and returns the raised actions.
pub fn handle_search_event<S: Scheduler + ?Sized>(
    autocomplete: &mut Autocomplete,
    scheduler: &mut S,
    event: &SearchEvent,
) -> Vec<SearchAction> {
    let action = match event {
        SearchEvent::Input(text) => {
            autocomplete.on_input(scheduler, text);
            None
        }
        SearchEvent::TimerFired(id) => {
            autocomplete.on_timer(*id);
            None
        }
        SearchEvent::Choose(index) => autocomplete.choose(scheduler, *index),
        SearchEvent::ChooseHighlighted => autocomplete.choose_highlighted(scheduler),
        SearchEvent::HighlightNext => {
            autocomplete.highlight_next();
            None
        }
        SearchEvent::HighlightPrevious => {
            autocomplete.highlight_previous();
            None
        }
        SearchEvent::Blur => autocomplete.on_blur(scheduler),
        SearchEvent::Teardown => {
            autocomplete.teardown(scheduler);
            None
        }
    };

    action.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::TimerQueue;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn locations() -> Vec<Candidate> {
        vec![
            Candidate::new("loc-1", "Location one", "Location one"),
            Candidate::new("loc-2", "Location two", "Location two"),
            Candidate::new("loc-3", "Location three", "Location three"),
        ]
    }

    fn setup() -> (Autocomplete, TimerQueue) {
        (Autocomplete::new(locations(), &Config::default()), TimerQueue::new())
    }

    fn drive(autocomplete: &mut Autocomplete, queue: &mut TimerQueue, by: Duration) {
        for id in queue.advance(by) {
            autocomplete.on_timer(id);
        }
    }

    #[test]
    fn text_updates_before_filtering() {
        let (mut search, mut queue) = setup();
        search.on_input(&mut queue, "Loc");

        assert_eq!(search.text(), "Loc");
        assert_eq!(search.state(), SearchState::Typing);
        assert_eq!(search.evaluations(), 0);
        assert!(search.matches().is_empty());
    }

    #[test]
    fn keystrokes_within_quiet_period_evaluate_once() {
        let (mut search, mut queue) = setup();
        search.on_input(&mut queue, "L");
        drive(&mut search, &mut queue, ms(50));
        search.on_input(&mut queue, "Lo");
        drive(&mut search, &mut queue, ms(50));
        search.on_input(&mut queue, "Loc");

        drive(&mut search, &mut queue, ms(299));
        assert_eq!(search.evaluations(), 0);

        drive(&mut search, &mut queue, ms(1));
        assert_eq!(search.evaluations(), 1);
        assert_eq!(search.state(), SearchState::DropdownOpen);
        assert_eq!(search.matches().len(), 3);

        drive(&mut search, &mut queue, ms(1000));
        assert_eq!(search.evaluations(), 1);
    }

    #[test]
    fn no_match_stays_typing() {
        let (mut search, mut queue) = setup();
        search.on_input(&mut queue, "Warehouse");
        drive(&mut search, &mut queue, ms(300));

        assert_eq!(search.state(), SearchState::Typing);
        assert!(search.matches().is_empty());
    }

    #[test]
    fn choosing_sets_label_and_emits_candidate() {
        let (mut search, mut queue) = setup();
        search.on_input(&mut queue, "location t");
        drive(&mut search, &mut queue, ms(300));

        let action = search.choose(&mut queue, 1);
        assert_eq!(action, Some(SearchAction::Selected(locations()[2].clone())));
        assert_eq!(search.state(), SearchState::Selected);
        assert_eq!(search.text(), "Location three");
        assert!(search.matches().is_empty());

        assert_eq!(search.on_blur(&mut queue), None);
    }

    #[test]
    fn choose_out_of_range_is_ignored() {
        let (mut search, mut queue) = setup();
        search.on_input(&mut queue, "Location");
        drive(&mut search, &mut queue, ms(300));

        assert_eq!(search.choose(&mut queue, 7), None);
        assert_eq!(search.state(), SearchState::DropdownOpen);
    }

    #[test]
    fn highlight_wraps_both_ways() {
        let (mut search, mut queue) = setup();
        search.on_input(&mut queue, "Location");
        drive(&mut search, &mut queue, ms(300));

        search.highlight_previous();
        assert_eq!(search.highlighted(), Some(2));
        search.highlight_next();
        assert_eq!(search.highlighted(), Some(0));
        search.highlight_next();

        let action = search.choose_highlighted(&mut queue);
        assert_eq!(action, Some(SearchAction::Selected(locations()[1].clone())));
    }

    #[test]
    fn blur_without_selection_commits_free_text() {
        let (mut search, mut queue) = setup();
        search.on_input(&mut queue, "Unlisted place");

        let action = search.on_blur(&mut queue);
        let Some(SearchAction::Selected(candidate)) = action else {
            panic!("expected a selection");
        };
        assert!(candidate.is_free_text());
        assert_eq!(candidate.display_label, "Unlisted place");
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn teardown_cancels_pending_timer() {
        let (mut search, mut queue) = setup();
        search.on_input(&mut queue, "Loc");
        let stale = queue.advance(ms(0));
        assert!(stale.is_empty());

        search.teardown(&mut queue);
        assert_eq!(queue.pending_count(), 0);
        assert!(!search.has_pending_timer());

        drive(&mut search, &mut queue, ms(1000));
        assert_eq!(search.evaluations(), 0);
        search.on_input(&mut queue, "Location");
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn events_dispatch_through_handler() {
        let (mut search, mut queue) = setup();
        handle_search_event(&mut search, &mut queue, &SearchEvent::Input("Location o".into()));
        for id in queue.advance(ms(300)) {
            handle_search_event(&mut search, &mut queue, &SearchEvent::TimerFired(id));
        }
        handle_search_event(&mut search, &mut queue, &SearchEvent::HighlightNext);
        let actions = handle_search_event(&mut search, &mut queue, &SearchEvent::ChooseHighlighted);

        assert_eq!(actions, vec![SearchAction::Selected(locations()[0].clone())]);
    }
}
