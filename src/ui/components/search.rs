//! Search bar component renderer.
//!
//! Renders the search input box with a bordered frame, the query text, and
//! the active category filter.

use crate::ui::helpers::{position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the search input box at the specified row.
///
/// # Returns
///
/// The next available row position (row + 3, since search box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────────────────┐ [margin]
/// [margin] │ Search: query_      [All Categories] │ [margin]
/// [margin] └──────────────────────────────────────┘ [margin]
/// ```
///
/// The border uses `search_bar_border` while the box has focus and `border`
/// otherwise. A trailing `_` marks the input position while typing.
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        Theme::fg(&theme.colors.search_bar_border)
    } else {
        Theme::fg(&theme.colors.border)
    };

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&border);
    out.push('┌');
    out.push_str(&"─".repeat(inner_width));
    out.push('┐');
    out.push_str(Theme::reset());

    let (category, category_len) = truncate_to_width(&format!("[{}] ", search.category), inner_width / 2);
    let cursor = if search.focused { "_" } else { "" };
    let (search_text, search_len) = truncate_to_width(
        &format!(" Search: {}{cursor}", search.query),
        inner_width.saturating_sub(category_len),
    );
    let padding = inner_width.saturating_sub(search_len + category_len);

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&search_text);
    out.push_str(&" ".repeat(padding));
    out.push_str(&Theme::fg(&theme.colors.category_fg));
    out.push_str(&category);
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&border);
    out.push('└');
    out.push_str(&"─".repeat(inner_width));
    out.push('┘');
    out.push_str(Theme::reset());

    row + 3
}
