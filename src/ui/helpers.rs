//! Shared rendering utilities and helpers.
//!
//! This module provides low-level rendering utilities used across multiple UI
//! components: cursor positioning, highlighted text with proper ANSI escape
//! sequence management, server `<mark>` parsing, and width-aware truncation.
//!
//! All functions write into a `String` frame buffer; the terminal runtime
//! flushes the frame in one write.
//!
//! Highlight ranges are `(start, end)` character indices, end exclusive.

use crate::ui::theme::Theme;
use std::fmt::Write;
use unicode_width::UnicodeWidthChar;

const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";

/// Positions the cursor at a specific row and column (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Strips `<mark>`/`</mark>` markers from a server snippet.
///
/// Returns the plain text and the character ranges that were marked. An
/// unclosed marker runs to the end of the text; a stray closing marker is
/// dropped.
///
/// # Example
///
/// ```rust
/// use sysref::ui::helpers::strip_marks;
///
/// let (text, ranges) = strip_marks("use <mark>sqlite</mark> here");
/// assert_eq!(text, "use sqlite here");
/// assert_eq!(ranges, vec![(4, 10)]);
/// ```
#[must_use]
pub fn strip_marks(snippet: &str) -> (String, Vec<(usize, usize)>) {
    let mut text = String::with_capacity(snippet.len());
    let mut ranges = Vec::new();
    let mut chars = 0usize;
    let mut open: Option<usize> = None;
    let mut rest = snippet;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(MARK_OPEN) {
            open.get_or_insert(chars);
            rest = after;
        } else if let Some(after) = rest.strip_prefix(MARK_CLOSE) {
            if let Some(start) = open.take() {
                if start < chars {
                    ranges.push((start, chars));
                }
            }
            rest = after;
        } else if let Some(c) = rest.chars().next() {
            text.push(c);
            chars += 1;
            rest = &rest[c.len_utf8()..];
        }
    }

    if let Some(start) = open {
        if start < chars {
            ranges.push((start, chars));
        }
    }

    (text, ranges)
}

/// Coalesces sorted match indices into contiguous `(start, end)` ranges.
///
/// # Example
///
/// ```rust
/// use sysref::ui::helpers::coalesce_indices;
///
/// assert_eq!(coalesce_indices(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
/// ```
#[must_use]
pub fn coalesce_indices(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Truncates `text` to at most `max_width` terminal columns.
///
/// Appends `...` when something was cut. Returns the (possibly shortened)
/// text and its display width.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> (String, usize) {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return (text.to_string(), total);
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        out.push(c);
        width += w;
    }
    let dots = max_width.min(3);
    out.push_str(&".".repeat(dots));
    (out, width + dots)
}

/// Writes text with highlighted character ranges.
///
/// Highlighted sections use match highlight colors unless the item is
/// selected, in which case the selection colors are kept for the whole text.
/// Ranges past the end of `text` are clipped.
///
/// `base` is the escape sequence to restore after each highlighted section.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    base: &str,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(base);

        current_pos = end;
    }

    if current_pos < chars.len() {
        out.extend(&chars[current_pos..]);
    }
}
