//! Input focus state for the application.
//!
//! The focus decides how keys are interpreted. While typing, printable keys
//! edit the search box; while navigating, they trigger per-entry actions.
//!
//! # Example
//!
//! ```rust
//! use sysref::app::modes::Focus;
//!
//! let focus = Focus::default();
//! assert_eq!(focus, Focus::Typing);
//! ```

/// Where keyboard input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The search box has focus.
    ///
    /// Accepts characters, backspace, enter (submit and move to results), tab
    /// (cycle category) and arrows (move selection).
    #[default]
    Typing,

    /// The result list has focus.
    ///
    /// Accepts j/k for movement, v/e/d/c for entry actions, `/` or Ctrl+K to
    /// return to the search box, `?` for shortcuts and q to quit.
    Navigating,
}

impl Focus {
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Typing)
    }
}
