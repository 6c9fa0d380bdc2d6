//! Ownership modes for view mutations.
//!
//! Each mutation kind (filter, sort, page) has a [`Mode`] fixed when the controller
//! is built:
//! - **Uncontrolled**: the controller recomputes the view itself
//! - **Controlled**: an external owner recomputes; the controller only reports intent
//!   and echoes the widget selection
//! - **Disabled**: the view does not offer this mutation; requests are ignored
//!
//! # Example
//!
//! ```rust
//! use recordview::app::{Mode, Modes};
//!
//! let modes = Modes {
//!     page: Mode::Controlled,
//!     ..Modes::default()
//! };
//! assert_eq!(modes.filter, Mode::Uncontrolled);
//! ```

use serde::{Deserialize, Serialize};

/// Who computes the next derived state for one mutation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The controller applies the mutation and recomputes the view.
    #[default]
    Uncontrolled,

    /// The mutation is reported outward as an action; the owner supplies the result.
    Controlled,

    /// The mutation is not offered; requests are dropped and the stage is skipped.
    Disabled,
}

impl Mode {
    /// Whether the controller computes this stage itself.
    #[must_use]
    pub const fn is_uncontrolled(self) -> bool {
        matches!(self, Self::Uncontrolled)
    }

    /// Whether an external owner computes this stage.
    #[must_use]
    pub const fn is_controlled(self) -> bool {
        matches!(self, Self::Controlled)
    }

    /// Whether this mutation is switched off.
    #[must_use]
    pub const fn is_disabled(self) -> bool {
        matches!(self, Self::Disabled)
    }
}

/// Modes for every mutation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modes {
    /// Filter mutations.
    #[serde(default)]
    pub filter: Mode,
    /// Sort mutations.
    #[serde(default)]
    pub sort: Mode,
    /// Page changes.
    #[serde(default)]
    pub page: Mode,
}

impl Modes {
    /// Every mutation kind controlled by an external owner.
    #[must_use]
    pub const fn controlled() -> Self {
        Self {
            filter: Mode::Controlled,
            sort: Mode::Controlled,
            page: Mode::Controlled,
        }
    }
}
