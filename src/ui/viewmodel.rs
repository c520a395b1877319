//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! View models are optimized for rendering and contain pre-computed display
//! information like highlight ranges and selection state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()`, decorated with
//! the runtime overlays (toasts, shortcut help), and consumed by the renderer.
//! They contain no business logic, only display-ready data.

use crate::domain::EntryId;
use crate::search::NotificationKind;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (current view and count).
    pub header: HeaderInfo,

    /// Search box and category filter.
    pub search_bar: SearchBarInfo,

    /// Entry cards in the visible window.
    pub cards: Vec<EntryCard>,

    /// Index of the selected card within `cards`.
    pub selected_index: usize,

    /// Loading, error, or empty message shown instead of cards.
    pub placeholder: Option<EmptyState>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,

    /// Notifications still within their display time, oldest first.
    pub toasts: Vec<ToastInfo>,

    /// Whether the shortcut overlay is showing.
    pub show_shortcuts: bool,
}

/// Display information for a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCard {
    pub id: EntryId,

    pub title: String,

    /// Character ranges of the title matching the query.
    pub title_ranges: Vec<(usize, usize)>,

    pub category: String,

    /// Local "updated" timestamp, already formatted.
    pub updated: String,

    pub tags: Vec<String>,

    /// Snippet (search results) or preview (recent entries), single line.
    pub body: String,

    /// Character ranges of `body` marked by the server.
    pub body_ranges: Vec<(usize, usize)>,

    /// Whether this card is under the cursor.
    pub is_selected: bool,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text, e.g. "Recent Entries" or "Search Results (4)".
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Placeholder message shown in place of the card list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No entries found.").
    pub message: String,

    /// Secondary explanatory text, possibly empty.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search box text.
    pub query: String,

    /// Category filter label.
    pub category: String,

    /// Whether the search box has keyboard focus.
    pub focused: bool,
}

/// One notification in the toast area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    pub message: String,
    pub kind: NotificationKind,
}
