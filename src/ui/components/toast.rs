//! Notification toasts and the shortcut help box.

use crate::ui::helpers::{position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

/// Shortcut help lines, key then description.
pub const SHORTCUTS: [(&str, &str); 6] = [
    ("Ctrl+K", "Focus search"),
    ("Esc", "Clear search"),
    ("?", "Show shortcuts"),
    ("Tab", "Next category"),
    ("v / e", "View / edit entry"),
    ("d / c", "Delete / copy entry"),
];

/// Renders toasts right-aligned, one per row, starting at `row`.
pub fn render_toasts(out: &mut String, row: usize, toasts: &[ToastInfo], theme: &Theme, cols: usize) {
    for (offset, toast) in toasts.iter().enumerate() {
        let (message, len) = truncate_to_width(&format!(" {} ", toast.message), cols.saturating_sub(2));
        position_cursor(out, row + offset, cols.saturating_sub(len + 1).max(1));
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.toast_fg));
        out.push_str(&Theme::bg(theme.colors.toast_bg(toast.kind)));
        out.push_str(&message);
        out.push_str(Theme::reset());
    }
}

/// Renders the shortcut help box so that its last line sits on `bottom_row`.
pub fn render_shortcuts(out: &mut String, bottom_row: usize, theme: &Theme, cols: usize) {
    let lines: Vec<String> = SHORTCUTS
        .iter()
        .map(|(key, what)| format!(" {key:<7} {what} "))
        .collect();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let top = bottom_row.saturating_sub(lines.len() - 1).max(1);
    let col = cols.saturating_sub(width + 1).max(1);

    for (offset, line) in lines.iter().enumerate() {
        position_cursor(out, top + offset, col);
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
        out.push_str(line);
        out.push_str(&" ".repeat(width - line.chars().count()));
        out.push_str(Theme::reset());
    }
}
