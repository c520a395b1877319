//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! clock ticks, and worker responses, translating them into state changes and
//! action sequences. It serves as the primary control flow coordinator for the
//! interactive client.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the terminal runtime or the worker pool
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and `SearchSession` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Input**: `Char`, `Backspace`, `ClearInput`, `Submit`
//! - **Filter**: `NextCategory`, `PreviousCategory`, `ClearSearch`
//! - **Navigation**: `SelectNext`, `SelectPrevious`, `FocusSearch`, `FocusResults`
//! - **Entry actions**: `EntryAction` keyed by entry id
//! - **System**: `Started`, `Tick`, `WorkerResponse`

use crate::app::{Action, AppState};
use crate::app::modes::Focus;
use crate::app::state::EntryPage;
use crate::domain::error::Result;
use crate::domain::EntryId;
use crate::search::Effect;
use crate::worker::WorkerResponse;

/// What to do with one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    /// Open the entry page in the browser.
    View,
    /// Open the edit page in the browser.
    Edit,
    /// Delete after confirmation.
    Delete,
    /// Copy the full content to the clipboard.
    Copy,
}

/// Events triggered by user input, the clock, or worker responses.
///
/// The event handler processes these sequentially, so state transitions are
/// deterministic for a given event order.
#[derive(Debug)]
pub enum Event {
    /// The runtime is up; load categories and recent entries.
    Started,

    /// Appends a character to the search box.
    Char(char),
    /// Removes the last character from the search box.
    Backspace,
    /// Empties the search box.
    ClearInput,
    /// Runs the search immediately and moves focus to the results.
    Submit,

    /// Selects the next category filter.
    NextCategory,
    /// Selects the previous category filter.
    PreviousCategory,
    /// Resets search text and category and shows recent entries.
    ClearSearch,

    /// Moves selection cursor down by one position (wraps to top).
    SelectNext,
    /// Moves selection cursor up by one position (wraps to bottom).
    SelectPrevious,
    /// Focuses the search box.
    FocusSearch,
    /// Focuses the result list.
    FocusResults,

    /// Runs an action on the entry with the given id.
    EntryAction { id: EntryId, action: EntryAction },

    /// Shows the keyboard shortcut overlay.
    ShowShortcuts,
    /// Leaves the client.
    Quit,

    /// Periodic clock tick; fires debounced searches.
    Tick,

    /// Wraps a response from the catalog worker pool.
    WorkerResponse(WorkerResponse),
}

fn actions(effects: Vec<Effect>) -> Vec<Action> {
    effects.into_iter().map(Action::from).collect()
}

/// Moves the category filter one step. With an empty query this clears the
/// search, which also resets the filter.
fn cycle_category(state: &mut AppState, forward: bool) -> Vec<Action> {
    let category = state.adjacent_category(forward);
    tracing::debug!(category = %category, "category filter changed");
    actions(state.session.filter_changed(&category))
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// A flag asking for a re-render, and the actions to execute in order. The
/// list may be empty if the event needs no side effects.
///
/// # Errors
///
/// Catalog failures never surface here; they become placeholders or
/// notifications. The `Result` is kept for runtime-level failures.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let outcome = match event {
        Event::Started => {
            tracing::info!("loading categories and recent entries");
            (true, actions(state.session.start()))
        }

        Event::Char(c) => {
            if !state.focus.is_typing() {
                return Ok((false, vec![]));
            }
            let mut query = state.session.state().query_text().to_string();
            query.push(c);
            tracing::trace!(query = %query, "search input updated");
            (true, actions(state.session.input_changed(&query)))
        }
        Event::Backspace => {
            if !state.focus.is_typing() {
                return Ok((false, vec![]));
            }
            let mut query = state.session.state().query_text().to_string();
            if query.pop().is_none() {
                return Ok((false, vec![]));
            }
            (true, actions(state.session.input_changed(&query)))
        }
        Event::ClearInput => (true, actions(state.session.input_changed(""))),
        Event::Submit => {
            let effects = state.session.submit();
            state.focus = Focus::Navigating;
            (true, actions(effects))
        }

        Event::NextCategory => (true, cycle_category(state, true)),
        Event::PreviousCategory => (true, cycle_category(state, false)),
        Event::ClearSearch => {
            state.focus = Focus::Typing;
            state.selected_index = 0;
            (true, actions(state.session.clear()))
        }

        Event::SelectNext => {
            state.move_selection_down();
            (true, vec![])
        }
        Event::SelectPrevious => {
            state.move_selection_up();
            (true, vec![])
        }
        Event::FocusSearch => {
            state.focus = Focus::Typing;
            (true, vec![])
        }
        Event::FocusResults => {
            state.focus = Focus::Navigating;
            (true, vec![])
        }

        Event::EntryAction { id, action } => {
            tracing::debug!(%id, ?action, "entry action");
            match action {
                EntryAction::View => (false, vec![Action::OpenUrl(state.entry_url(id, EntryPage::View))]),
                EntryAction::Edit => (false, vec![Action::OpenUrl(state.entry_url(id, EntryPage::Edit))]),
                EntryAction::Delete => {
                    let effects = state.session.delete_entry(id, state.prompt.as_mut());
                    // The prompt may have drawn over the screen.
                    (true, actions(effects))
                }
                EntryAction::Copy => (false, actions(state.session.copy_entry(id))),
            }
        }

        Event::ShowShortcuts => (true, vec![Action::ShowShortcuts]),
        Event::Quit => (false, vec![Action::Quit]),

        Event::Tick => {
            let effects = state.session.tick();
            (!effects.is_empty(), actions(effects))
        }

        Event::WorkerResponse(response) => {
            let effects = state.session.on_response(response, state.clipboard.as_mut());
            (true, actions(effects))
        }
    };

    let (render, actions) = outcome;
    let redrawn = state.sync_selection();
    Ok((render || redrawn, actions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Clipboard, ManualClock, Prompt, SearchSession, SessionSettings};
    use crate::ui::Theme;
    use crate::worker::WorkerMessage;
    use std::sync::Arc;

    struct No;
    impl Prompt for No {
        fn confirm(&mut self, _question: &str) -> bool {
            false
        }
    }
    impl Clipboard for No {
        fn write_text(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    fn state() -> AppState {
        let session = SearchSession::new(Arc::new(ManualClock::new()), SessionSettings::default());
        AppState::new(session, Theme::default(), "http://localhost:8000", Box::new(No), Box::new(No))
    }

    #[test]
    fn started_requests_categories_and_recent_entries() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, Event::Started).expect("handled");
        assert!(render);
        assert!(matches!(
            actions.as_slice(),
            [
                Action::PostToWorker(WorkerMessage::Categories { .. }),
                Action::PostToWorker(WorkerMessage::Recent { limit: 3, .. })
            ]
        ));
    }

    #[test]
    fn characters_are_ignored_while_navigating() {
        let mut state = state();
        state.focus = Focus::Navigating;
        let (render, actions) = handle_event(&mut state, Event::Char('x')).expect("handled");
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.session.state().query_text(), "");
    }

    #[test]
    fn typing_edits_the_query_and_submit_moves_focus() {
        let mut state = state();
        for c in "lsof".chars() {
            handle_event(&mut state, Event::Char(c)).expect("handled");
        }
        handle_event(&mut state, Event::Backspace).expect("handled");
        assert_eq!(state.session.state().query_text(), "lso");

        let (_, actions) = handle_event(&mut state, Event::Submit).expect("handled");
        assert_eq!(state.focus, Focus::Navigating);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::Search { query, .. })] if query.text == "lso"
        ));
    }

    #[test]
    fn clear_search_returns_to_typing() {
        let mut state = state();
        handle_event(&mut state, Event::Char('a')).expect("handled");
        state.focus = Focus::Navigating;
        state.selected_index = 4;

        handle_event(&mut state, Event::ClearSearch).expect("handled");
        assert_eq!(state.focus, Focus::Typing);
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.session.state().query_text(), "");
        assert_eq!(state.session.next_deadline(), None);
    }

    #[test]
    fn view_and_edit_open_the_browser() {
        let mut state = state();
        let (_, actions) = handle_event(
            &mut state,
            Event::EntryAction {
                id: EntryId(8),
                action: EntryAction::Edit,
            },
        )
        .expect("handled");
        assert_eq!(actions, vec![Action::OpenUrl("http://localhost:8000/edit/8".to_string())]);
    }

    #[test]
    fn quit_and_shortcuts_pass_through() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, Event::ShowShortcuts).expect("handled");
        assert_eq!(actions, vec![Action::ShowShortcuts]);
        let (_, actions) = handle_event(&mut state, Event::Quit).expect("handled");
        assert_eq!(actions, vec![Action::Quit]);
    }
}
