//! Expansion controller.
//!
//! Tracks at most one expanded record. Views that are not declared expandable
//! ignore toggles entirely.

use crate::domain::RecordId;

/// Single optional expanded record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    enabled: bool,
    expanded: Option<RecordId>,
}

impl Expansion {
    /// Creates an expansion controller; `enabled` is the view's expandable flag.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            expanded: None,
        }
    }

    /// Whether the surrounding view is expandable.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Collapses `id` if it is expanded, otherwise expands it in place of any
    /// previously expanded record.
    ///
    /// Returns `true` if the state changed.
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        if !self.enabled {
            return false;
        }
        if self.expanded.as_ref() == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.clone());
        }
        true
    }

    /// Whether `id` is the expanded record.
    #[must_use]
    pub fn is_expanded(&self, id: &RecordId) -> bool {
        self.expanded.as_ref() == Some(id)
    }

    /// Currently expanded record, if any.
    #[must_use]
    pub const fn expanded(&self) -> Option<&RecordId> {
        self.expanded.as_ref()
    }

    /// Collapses whatever is expanded. Returns `true` if something was.
    pub fn collapse(&mut self) -> bool {
        self.expanded.take().is_some()
    }
}
