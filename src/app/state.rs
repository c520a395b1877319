//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! interactive client. The search-and-view logic lives in the
//! [`SearchSession`]; `AppState` adds what only the terminal needs: the
//! selection cursor, input focus, theme, and the prompt and clipboard
//! capabilities handed to entry actions.
//!
//! # View Model Computation
//!
//! The `compute_viewmodel` method transforms state into a renderable UI
//! representation, handling windowing over entry cards, snippet and title
//! highlighting, and empty or error placeholders.
//!
//! # Example
//!
//! ```rust,no_run
//! use sysref::app::AppState;
//! use sysref::search::{SearchSession, SessionSettings, SystemClock};
//! use sysref::terminal::{SystemClipboard, TerminalPrompt};
//! use sysref::ui::Theme;
//! use std::sync::Arc;
//!
//! let session = SearchSession::new(Arc::new(SystemClock), SessionSettings::default());
//! let state = AppState::new(
//!     session,
//!     Theme::default(),
//!     "http://localhost:8000",
//!     Box::new(TerminalPrompt),
//!     Box::new(SystemClipboard::new()),
//! );
//! let viewmodel = state.compute_viewmodel(24, 80);
//! ```

use super::modes::Focus;
use crate::domain::{Entry, EntryId};
use crate::search::{Clipboard, Prompt, SearchSession, ViewContent, ViewTarget};
use crate::ui::helpers::{coalesce_indices, strip_marks};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, EntryCard, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Label of the "no category filter" choice.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Rows taken by one entry card, including its spacer line.
pub const CARD_HEIGHT: usize = 4;

/// Rows taken by the header, search bar, borders, and footer.
const CHROME_ROWS: usize = 9;

/// Browser page for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPage {
    View,
    Edit,
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input and worker
/// responses. View models are computed on demand from state snapshots.
pub struct AppState {
    /// Search-and-view state machine.
    pub session: SearchSession,

    /// Zero-based index of the selected card within the displayed entries.
    ///
    /// Clamped whenever the displayed list changes.
    pub selected_index: usize,

    /// Where keystrokes go.
    pub focus: Focus,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Server root used to build view/edit URLs.
    pub base_url: String,

    pub(crate) prompt: Box<dyn Prompt>,
    pub(crate) clipboard: Box<dyn Clipboard>,

    /// Render revision the selection was last clamped against.
    seen_revision: u64,
}

impl AppState {
    /// Creates application state around a fresh session.
    ///
    /// # Parameters
    ///
    /// * `session` - Search session, not yet started
    /// * `theme` - Color scheme for UI rendering
    /// * `base_url` - Server root for browser links
    /// * `prompt` - Confirmation capability for deletes
    /// * `clipboard` - Clipboard capability for copies
    #[must_use]
    pub fn new(
        session: SearchSession,
        theme: Theme,
        base_url: &str,
        prompt: Box<dyn Prompt>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let seen_revision = session.revision();
        Self {
            session,
            selected_index: 0,
            focus: Focus::default(),
            theme,
            base_url: base_url.trim_end_matches('/').to_string(),
            prompt,
            clipboard,
            seen_revision,
        }
    }

    /// Entries currently on screen.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        self.session.view().entries()
    }

    /// The entry under the cursor, if any.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries().get(self.selected_index)
    }

    /// Moves selection cursor down by one position, wrapping to top if at end.
    pub fn move_selection_down(&mut self) {
        let len = self.entries().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves selection cursor up by one position, wrapping to bottom if at start.
    pub fn move_selection_up(&mut self) {
        let len = self.entries().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Clamps the selection after the displayed list changed.
    ///
    /// Returns `true` if the results area was re-rendered since the last call.
    pub fn sync_selection(&mut self) -> bool {
        let revision = self.session.revision();
        if revision == self.seen_revision {
            return false;
        }
        self.seen_revision = revision;
        let len = self.entries().len();
        self.selected_index = if len == 0 { 0 } else { self.selected_index.min(len - 1) };
        true
    }

    /// Category filter choices, "all categories" (empty) first.
    #[must_use]
    pub fn category_options(&self) -> Vec<&str> {
        std::iter::once("")
            .chain(self.session.categories().iter().map(String::as_str))
            .collect()
    }

    /// The category after (or before) the selected one, wrapping around.
    #[must_use]
    pub fn adjacent_category(&self, forward: bool) -> String {
        let options = self.category_options();
        let current = self.session.state().category();
        let index = options.iter().position(|c| *c == current).unwrap_or(0);
        let len = options.len();
        let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
        options[next].to_string()
    }

    /// Web UI URL for an entry page.
    #[must_use]
    pub fn entry_url(&self, id: EntryId, page: EntryPage) -> String {
        let segment = match page {
            EntryPage::View => "view",
            EntryPage::Edit => "edit",
        };
        format!("{}/{segment}/{id}", self.base_url)
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate how many cards fit after subtracting UI chrome
    /// 2. Center window around selected index (selected index at midpoint)
    /// 3. Adjust window if near the end to maximize visible cards
    /// 4. Compute relative selection index within visible window
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let content = self.session.view();
        let entries = content.entries();
        let mut viewmodel = UIViewModel {
            header: self.compute_header(content),
            search_bar: self.compute_search_bar(),
            cards: vec![],
            selected_index: 0,
            placeholder: Self::compute_placeholder(content),
            footer: self.compute_footer(),
            toasts: vec![],
            show_shortcuts: false,
        };

        if entries.is_empty() {
            return viewmodel;
        }

        let capacity = (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1);
        let mut visible_start = self.selected_index.saturating_sub(capacity / 2);
        let visible_end = (visible_start + capacity).min(entries.len());
        if visible_end - visible_start < capacity && entries.len() >= capacity {
            visible_start = visible_end.saturating_sub(capacity);
        }

        let is_search = content.target() == ViewTarget::SearchResults;
        let query = self.session.committed_query();
        let matcher = (is_search && !query.is_empty()).then(SkimMatcherV2::default);

        viewmodel.cards = entries[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                let is_selected = visible_start + offset == self.selected_index;
                Self::compute_card(entry, is_search, is_selected, query, matcher.as_ref())
            })
            .collect();
        viewmodel.selected_index = self.selected_index.saturating_sub(visible_start);
        viewmodel
    }

    /// Builds one entry card.
    ///
    /// Search results show the server snippet with its marked ranges; recent
    /// entries show a content preview. Titles of search results get fuzzy
    /// highlights for the committed query.
    fn compute_card(
        entry: &Entry,
        is_search: bool,
        is_selected: bool,
        query: &str,
        matcher: Option<&SkimMatcherV2>,
    ) -> EntryCard {
        use fuzzy_matcher::FuzzyMatcher;

        let (body, body_ranges) = match entry.snippet.as_deref() {
            Some(snippet) if is_search => strip_marks(snippet),
            _ => (entry.preview(), vec![]),
        };
        let title_ranges = matcher
            .and_then(|m| m.fuzzy_indices(&entry.title, query))
            .map(|(_, indices)| coalesce_indices(&indices))
            .unwrap_or_default();

        EntryCard {
            id: entry.id,
            title: entry.title.clone(),
            title_ranges,
            category: entry.category.clone(),
            updated: entry.updated_display(),
            tags: entry.tags.clone(),
            body: body.replace(['\n', '\r', '\t'], " "),
            body_ranges,
            is_selected,
        }
    }

    fn compute_header(&self, content: &ViewContent) -> HeaderInfo {
        let title = match (self.session.state().view_target(), content) {
            (ViewTarget::SearchResults, ViewContent::Entries { entries, .. }) if !entries.is_empty() => {
                format!("Search Results ({})", entries.len())
            }
            (ViewTarget::SearchResults, _) => "Search Results".to_string(),
            (ViewTarget::RecentEntries, _) => "Recent Entries".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        let state = self.session.state();
        let category = if state.category().is_empty() {
            ALL_CATEGORIES.to_string()
        } else {
            state.category().to_string()
        };
        SearchBarInfo {
            query: state.query_text().to_string(),
            category,
            focused: self.focus.is_typing(),
        }
    }

    fn compute_placeholder(content: &ViewContent) -> Option<EmptyState> {
        match content {
            ViewContent::Loading(_) => Some(EmptyState {
                message: "Loading...".to_string(),
                subtitle: String::new(),
            }),
            ViewContent::Failed { message, .. } => Some(EmptyState {
                message: message.clone(),
                subtitle: "Press Enter to retry or Esc to go back".to_string(),
            }),
            ViewContent::Entries { target, entries } if entries.is_empty() => Some(match target {
                ViewTarget::SearchResults => EmptyState {
                    message: "No results found for your search.".to_string(),
                    subtitle: String::new(),
                },
                ViewTarget::RecentEntries => EmptyState {
                    message: "No entries found.".to_string(),
                    subtitle: "Add your first entry in the SysRef web UI.".to_string(),
                },
            }),
            ViewContent::Entries { .. } => None,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus {
            Focus::Typing => "Enter: search  Tab: category  \u{2191}/\u{2193}: results  Esc: clear  Ctrl+C: quit",
            Focus::Navigating => {
                "v: view  e: edit  d: delete  c: copy  j/k: move  /: search  Esc: clear  ?: help  q: quit"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Result;
    use crate::search::{ManualClock, SessionSettings};
    use crate::worker::{WorkerMessage, WorkerResponse};
    use chrono::Utc;
    use std::sync::Arc;

    struct Yes;
    impl Prompt for Yes {
        fn confirm(&mut self, _question: &str) -> bool {
            true
        }
    }

    struct Null;
    impl Clipboard for Null {
        fn write_text(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    fn entry(id: i64, title: &str, snippet: Option<&str>) -> Entry {
        Entry {
            id: EntryId(id),
            title: title.to_string(),
            category: "Linux".to_string(),
            tags: vec!["net".to_string()],
            content: "line one\nline two".to_string(),
            updated_at: Utc::now(),
            created_at: None,
            snippet: snippet.map(String::from),
        }
    }

    /// State showing `recent` as the recent list, categories known.
    fn state_with(recent: Vec<Entry>, categories: &[&str]) -> AppState {
        let session = SearchSession::new(Arc::new(ManualClock::new()), SessionSettings::default());
        let mut state = AppState::new(session, Theme::default(), "http://localhost:8000/", Box::new(Yes), Box::new(Null));
        let mut clipboard = Null;
        for effect in state.session.start() {
            let crate::search::Effect::Request(message) = effect else {
                continue;
            };
            let response = match message {
                WorkerMessage::Categories { ticket } => WorkerResponse::CategoriesLoaded {
                    ticket,
                    result: Ok(categories.iter().map(ToString::to_string).collect()),
                },
                WorkerMessage::Recent { ticket, .. } => WorkerResponse::RecentLoaded {
                    ticket,
                    result: Ok(recent.clone()),
                },
                other => panic!("unexpected {other:?}"),
            };
            state.session.on_response(response, &mut clipboard);
        }
        state.sync_selection();
        state
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = state_with(vec![entry(1, "a", None), entry(2, "b", None), entry(3, "c", None)], &[]);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_entry().map(|e| e.id), Some(EntryId(1)));
    }

    #[test]
    fn selection_is_clamped_when_the_list_shrinks() {
        let mut state = state_with(vec![entry(1, "a", None), entry(2, "b", None)], &[]);
        state.selected_index = 1;

        let mut clipboard = Null;
        let effects = state.session.reconcile();
        let crate::search::Effect::Request(WorkerMessage::Recent { ticket, .. }) = effects[0].clone() else {
            panic!("expected a recent reload");
        };
        state.session.on_response(
            WorkerResponse::RecentLoaded {
                ticket,
                result: Ok(vec![entry(1, "a", None)]),
            },
            &mut clipboard,
        );

        assert!(state.sync_selection());
        assert_eq!(state.selected_index, 0);
        assert!(!state.sync_selection());
    }

    #[test]
    fn category_cycle_starts_with_all_and_wraps() {
        let state = state_with(vec![], &["Docker", "Linux"]);
        assert_eq!(state.category_options(), vec!["", "Docker", "Linux"]);
        assert_eq!(state.adjacent_category(true), "Docker");
        assert_eq!(state.adjacent_category(false), "Linux");
    }

    #[test]
    fn entry_urls_point_at_the_web_ui() {
        let state = state_with(vec![], &[]);
        assert_eq!(state.entry_url(EntryId(12), EntryPage::View), "http://localhost:8000/view/12");
        assert_eq!(state.entry_url(EntryId(12), EntryPage::Edit), "http://localhost:8000/edit/12");
    }

    #[test]
    fn recent_cards_show_single_line_previews() {
        let state = state_with(vec![entry(1, "ip route", Some("<mark>ignored</mark>"))], &[]);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.title, "Recent Entries");
        assert_eq!(vm.cards[0].body, "line one line two");
        assert!(vm.cards[0].body_ranges.is_empty());
        assert!(vm.cards[0].is_selected);
        assert_eq!(vm.search_bar.category, ALL_CATEGORIES);
    }

    #[test]
    fn window_follows_the_selection() {
        let entries: Vec<Entry> = (0..20).map(|i| entry(i, &format!("entry {i}"), None)).collect();
        let mut state = state_with(entries, &[]);
        state.selected_index = 19;

        // 24 rows leave room for (24 - 9) / 4 = 3 cards.
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.cards.len(), 3);
        assert_eq!(vm.cards[2].title, "entry 19");
        assert_eq!(vm.selected_index, 2);
    }
}
