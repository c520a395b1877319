//! Entry card renderer.
//!
//! Each entry takes [`CARD_HEIGHT`](crate::app::state::CARD_HEIGHT) rows:
//!
//! ```text
//! ▌ Title with highlighted match
//!   [category]  Updated: 2024-05-01 14:02  #tag #tag
//!   snippet or preview text...
//!
//! ```

use crate::ui::helpers::{self, position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EntryCard;

const INDENT: usize = 2;

/// Renders all cards starting at the specified row.
///
/// # Returns
///
/// The next available row position.
pub fn render_cards(out: &mut String, row: usize, cards: &[EntryCard], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        current_row = render_card(out, current_row, card, theme, cols);
    }
    current_row
}

/// Renders one card.
///
/// The selected card gets a selection-colored title row; match highlights
/// are suppressed there so they do not fight the selection background.
fn render_card(out: &mut String, row: usize, card: &EntryCard, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(INDENT);

    // Title
    position_cursor(out, row, 1);
    let base = if card.is_selected {
        format!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal))
    };
    out.push_str(&base);
    out.push_str(if card.is_selected { "\u{258c} " } else { "  " });
    let (title, title_len) = truncate_to_width(&card.title, width);
    helpers::render_highlighted_text(out, &title, &card.title_ranges, theme, &base, card.is_selected);
    out.push_str(&" ".repeat(width.saturating_sub(title_len)));
    out.push_str(Theme::reset());

    // Meta line
    position_cursor(out, row + 1, 1);
    let category = format!("[{}]", card.category);
    let updated = format!("  Updated: {}", card.updated);
    let tags: String = card.tags.iter().map(|t| format!("  #{t}")).collect();
    let (meta, _) = truncate_to_width(&format!("{category}{updated}{tags}"), width);
    let mut remaining = meta.as_str();
    out.push_str(&" ".repeat(INDENT));
    for (part, color) in [
        (category.as_str(), &theme.colors.category_fg),
        (updated.as_str(), &theme.colors.text_dim),
        (tags.as_str(), &theme.colors.tag_fg),
    ] {
        let take = remaining
            .char_indices()
            .nth(part.chars().count())
            .map_or(remaining.len(), |(i, _)| i);
        out.push_str(&Theme::fg(color));
        out.push_str(&remaining[..take]);
        remaining = &remaining[take..];
    }
    out.push_str(Theme::reset());

    // Body
    position_cursor(out, row + 2, 1);
    let dim = Theme::fg(&theme.colors.text_dim);
    out.push_str(&" ".repeat(INDENT));
    out.push_str(&dim);
    let (body, _) = truncate_to_width(&card.body, width);
    helpers::render_highlighted_text(out, &body, &card.body_ranges, theme, &dim, false);
    out.push_str(Theme::reset());

    row + 4
}
