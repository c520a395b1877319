//! Composable UI component renderers.
//!
//! Each component renders one part of the interface into the frame buffer
//! and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with the current view
//! - [`search`]: Search input box with category filter
//! - [`cards`]: Entry cards (title, meta, snippet or preview)
//! - [`empty`]: Loading, error, and empty-list placeholders
//! - [`footer`]: Keybinding hints
//! - [`toast`]: Notifications and the shortcut help box
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Border]
//! [Cards or placeholder]
//! [Border]
//! [Footer]
//! ```

mod cards;
mod empty;
mod footer;
mod header;
mod search;
mod toast;

pub use toast::SHORTCUTS;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use cards::render_cards;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use toast::{render_shortcuts, render_toasts};

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the full screen layout.
///
/// Overlays (toasts, shortcut help) are drawn last so they sit on top.
pub fn render_layout(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);

    if let Some(placeholder) = &vm.placeholder {
        render_empty_state(out, current_row, placeholder, theme, cols);
    } else {
        render_cards(out, current_row, &vm.cards, theme, cols);
    }

    let border_row = rows.saturating_sub(1).max(current_row);
    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, border_row + 1, &vm.footer, theme, cols);

    render_toasts(out, 2, &vm.toasts, theme, cols);
    if vm.show_shortcuts {
        render_shortcuts(out, border_row.saturating_sub(1), theme, cols);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryId;
    use crate::ui::viewmodel::{EntryCard, FooterInfo, HeaderInfo, SearchBarInfo};

    fn viewmodel(cards: Vec<EntryCard>) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo {
                title: "Search Results (1)".to_string(),
            },
            search_bar: SearchBarInfo {
                query: "dig".to_string(),
                category: "Networking".to_string(),
                focused: true,
            },
            cards,
            selected_index: 0,
            placeholder: None,
            footer: FooterInfo {
                keybindings: "q: quit".to_string(),
            },
            toasts: vec![],
            show_shortcuts: false,
        }
    }

    #[test]
    fn cards_show_title_meta_and_highlighted_body() {
        let theme = Theme::default();
        let card = EntryCard {
            id: EntryId(3),
            title: "dig +short".to_string(),
            title_ranges: vec![(0, 3)],
            category: "Networking".to_string(),
            updated: "2024-05-01 14:02".to_string(),
            tags: vec!["dns".to_string()],
            body: "query a record with dig".to_string(),
            body_ranges: vec![(20, 23)],
            is_selected: false,
        };
        let mut out = String::new();
        render_layout(&mut out, &viewmodel(vec![card]), &theme, 80, 24);

        assert!(out.contains("SysRef \u{00b7} Search Results (1)"));
        assert!(out.contains("Search: dig_"));
        assert!(out.contains("[Networking]"));
        assert!(out.contains("Updated: 2024-05-01 14:02"));
        assert!(out.contains("#dns"));
        let highlight = Theme::bg(&theme.colors.match_highlight_bg);
        assert!(out.contains(&format!("{highlight}dig")));
        assert!(out.contains("q: quit"));
    }

    #[test]
    fn placeholder_replaces_cards() {
        let theme = Theme::default();
        let mut vm = viewmodel(vec![]);
        vm.placeholder = Some(crate::ui::viewmodel::EmptyState {
            message: "No results found for your search.".to_string(),
            subtitle: String::new(),
        });
        let mut out = String::new();
        render_layout(&mut out, &vm, &theme, 80, 24);
        assert!(out.contains("No results found for your search."));
    }
}
