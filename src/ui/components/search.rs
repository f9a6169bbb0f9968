//! Search bar component renderer.
//!
//! This module renders the input box (catalog search or table filter) with a
//! bordered frame, and the suggestion dropdown that hangs below it.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchBarInfo, SuggestionPanel};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search input box at the specified row.
///
/// Displays a 3-line bordered box containing the label and query text. The
/// box is horizontally centered with margins on both sides. An empty query
/// shows the placeholder, dimmed.
///
/// # Returns
///
/// The next available row position (row + 3, since search box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let prompt = format!(" {}: ", search.label);
    let cursor = if search.focused { "▏" } else { "" };
    let (text, text_color) = if search.query.is_empty() {
        (format!("{cursor}{}", search.placeholder), &theme.colors.text_dim)
    } else {
        (format!("{}{cursor}", search.query), &theme.colors.text_normal)
    };
    let text_width = inner_width.saturating_sub(prompt.chars().count());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&prompt, inner_width));
    print!("{}", Theme::fg(text_color));
    print!("{}", fit(&text, text_width));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Renders the suggestion dropdown from `row` downwards, stopping before
/// `max_row`.
///
/// Each group starts with its header; groups are separated by a divider line.
/// The active suggestion is highlighted.
pub fn render_suggestions(
    row: usize,
    panel: &SuggestionPanel,
    theme: &Theme,
    cols: usize,
    max_row: usize,
) -> usize {
    let width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2 + 2);
    let mut current_row = row;

    let line = |current_row: &mut usize, style: String, text: &str| {
        if *current_row >= max_row {
            return;
        }
        position_cursor(*current_row, SEARCH_BOX_MARGIN + 2);
        print!("{style}{}{}", fit(text, width), Theme::reset());
        *current_row += 1;
    };

    for (index, group) in panel.groups.iter().enumerate() {
        if index > 0 {
            let divider = "─".repeat(width);
            line(&mut current_row, Theme::fg(&theme.colors.border), &divider);
        }
        line(
            &mut current_row,
            format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)),
            &format!(" {}", group.header),
        );
        for item in &group.items {
            let style = if item.active {
                format!(
                    "{}{}",
                    Theme::fg(&theme.colors.selection_fg),
                    Theme::bg(&theme.colors.selection_bg)
                )
            } else {
                Theme::fg(&theme.colors.text_normal)
            };
            line(&mut current_row, style, &format!("   {}", item.label));
        }
    }

    current_row
}
