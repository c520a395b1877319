//! Placeholder component renderer.
//!
//! Renders the loading, error, and empty-list messages shown in place of the
//! entry cards.

use crate::ui::helpers::{position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line placeholder starting two rows below `row`.
///
/// The message uses the `empty_state_fg` theme color, and the subtitle uses
/// `text_dim` with dim styling. An empty subtitle leaves its line blank.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let (message, msg_len) = truncate_to_width(&empty.message, cols);
    let msg_padding = cols.saturating_sub(msg_len) / 2;

    position_cursor(out, row + 2, 1);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&" ".repeat(msg_padding));
    out.push_str(&message);
    out.push_str(Theme::reset());

    if empty.subtitle.is_empty() {
        return;
    }

    let (subtitle, sub_len) = truncate_to_width(&empty.subtitle, cols);
    let sub_padding = cols.saturating_sub(sub_len) / 2;

    position_cursor(out, row + 3, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(sub_padding));
    out.push_str(&subtitle);
    out.push_str(Theme::reset());
}
