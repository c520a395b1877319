//! Header component renderer.
//!
//! Renders the title bar with centered text, theme-aware colors, and optional
//! background styling.

use crate::ui::helpers::{position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at the specified row.
///
/// Displays "SysRef · {title}" centered horizontally with bold styling and
/// pads the line to fill the entire terminal width.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let (title, title_len) = truncate_to_width(&format!("SysRef \u{00b7} {}", header.title), cols);
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(padding));
    out.push_str(&title);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + title_len)));

    out.push_str(Theme::reset());
    row + 1
}
