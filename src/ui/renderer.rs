//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view model
//! computation and delegation to UI components.
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`,
//!    then decorate it with the runtime overlays
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! The result is one frame of ANSI text that the terminal runtime writes in a
//! single call.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::overlay::Overlays;

/// Clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Renders one full frame.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `overlays` - Visible notifications and shortcut help
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// ANSI-styled frame text, starting with a clear-screen sequence.
#[must_use]
pub fn render(state: &AppState, overlays: &Overlays, rows: usize, cols: usize) -> String {
    let mut viewmodel = state.compute_viewmodel(rows, cols);
    viewmodel.toasts = overlays.toasts();
    viewmodel.show_shortcuts = overlays.shortcuts_visible();

    let mut frame = String::with_capacity(rows * cols * 2);
    frame.push_str(CLEAR_SCREEN);
    components::render_layout(&mut frame, &viewmodel, &state.theme, cols, rows);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::Result;
    use crate::search::{Clipboard, ManualClock, Notification, Prompt, SearchSession, SessionSettings};
    use crate::ui::components::SHORTCUTS;
    use crate::ui::theme::Theme;
    use std::sync::Arc;
    use std::time::Instant;

    struct NoPrompt;
    impl Prompt for NoPrompt {
        fn confirm(&mut self, _question: &str) -> bool {
            false
        }
    }

    struct NoClipboard;
    impl Clipboard for NoClipboard {
        fn write_text(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    fn state() -> AppState {
        let session = SearchSession::new(Arc::new(ManualClock::new()), SessionSettings::default());
        AppState::new(
            session,
            Theme::default(),
            "http://localhost:8000",
            Box::new(NoPrompt),
            Box::new(NoClipboard),
        )
    }

    #[test]
    fn fresh_state_renders_loading_placeholder() {
        let frame = render(&state(), &Overlays::default(), 24, 80);
        assert!(frame.starts_with(CLEAR_SCREEN));
        assert!(frame.contains("Recent Entries"));
        assert!(frame.contains("Loading..."));
        assert!(frame.contains("All Categories"));
    }

    #[test]
    fn overlays_are_drawn_on_top() {
        let now = Instant::now();
        let mut overlays = Overlays::default();
        overlays.notify(Notification::success("Entry deleted successfully"), now);
        overlays.show_shortcuts(now);

        let frame = render(&state(), &overlays, 24, 80);
        assert!(frame.contains("Entry deleted successfully"));
        for (key, what) in SHORTCUTS {
            assert!(frame.contains(key));
            assert!(frame.contains(what));
        }
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let frame = render(&state(), &Overlays::default(), 3, 5);
        assert!(!frame.is_empty());
    }
}
