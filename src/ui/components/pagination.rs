//! Pagination line renderer.
//!
//! ```text
//!  «  ‹  1 [2] 3 4 5  ›  »     Showing 10 of 23 entries     Page size: 10
//! ```

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

pub fn render_pagination(row: usize, info: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let arrow_color = |disabled: bool| {
        if disabled {
            Theme::fg(&theme.colors.text_dim)
        } else {
            Theme::fg(&theme.colors.text_normal)
        }
    };

    let mut used = 0;
    let previous = arrow_color(info.window.previous_disabled);
    print!("{previous} «  ‹ ");
    used += 6;

    for button in &info.window.buttons {
        let label = if button.active {
            format!("[{}]", button.label)
        } else {
            format!(" {} ", button.label)
        };
        if button.active {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{label}{}", Theme::reset());
        used += label.chars().count();
    }

    let next = arrow_color(info.window.next_disabled);
    print!("{next} ›  » {}", Theme::reset());
    used += 6;

    let mut summary = String::new();
    if let Some(label) = &info.label {
        summary.push_str("    ");
        summary.push_str(label);
    }
    summary.push_str(&format!("    Page size: {}", info.page_size));

    let remaining = cols.saturating_sub(used);
    let summary: String = summary.chars().take(remaining).collect();
    print!("{}{summary}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(remaining - summary.chars().count()));
    print!("{}", Theme::reset());

    row + 1
}
