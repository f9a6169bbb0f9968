//! Overlays: the access link modal and the error banner.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ModalInfo;

/// Widest the modal box gets, borders included.
const MODAL_MAX_WIDTH: usize = 72;

/// Lines of the modal box, borders included.
const MODAL_HEIGHT: usize = 9;

/// Renders the dismissible error banner on one line.
pub fn render_alert(row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    let text = format!(" ✖ {message}  (Esc: dismiss)");
    position_cursor(row, 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.error_fg));
    print!("{}", fit(&text, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the access link modal centered on screen.
///
/// ```text
/// ┌ Your Access Link ─────────────────────┐
/// │                                       │
/// │ URL:         https://...              │
/// │ Password:    s3cret                   │
/// │ Valid until: 2024-06-01               │
/// │                                       │
/// │ o: open in browser  Esc: close        │
/// │                                       │
/// └───────────────────────────────────────┘
/// ```
pub fn render_modal(modal: &ModalInfo, theme: &Theme, cols: usize, rows: usize) {
    let width = cols.saturating_sub(4).min(MODAL_MAX_WIDTH);
    let inner = width.saturating_sub(2);
    if inner < 4 {
        return;
    }
    let left = (cols - width) / 2 + 1;
    let top = rows.saturating_sub(MODAL_HEIGHT) / 2 + 1;

    let title = fit(&format!(" {} ", modal.title), inner.saturating_sub(1));
    let title_len = title.trim_end().chars().count();
    position_cursor(top, left);
    print!("{}┌─", Theme::fg(&theme.colors.search_bar_border));
    print!("{}{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), title.trim_end());
    print!("{}{}", Theme::reset(), Theme::fg(&theme.colors.search_bar_border));
    print!("{}┐{}", "─".repeat(inner.saturating_sub(1 + title_len)), Theme::reset());

    let lines = [
        (String::new(), &theme.colors.text_normal),
        (format!(" URL:         {}", modal.url), &theme.colors.link_fg),
        (format!(" Password:    {}", modal.password), &theme.colors.text_normal),
        (format!(" Valid until: {}", modal.valid_until), &theme.colors.text_normal),
        (String::new(), &theme.colors.text_normal),
        (" o: open in browser  Esc: close".to_string(), &theme.colors.text_dim),
        (String::new(), &theme.colors.text_normal),
    ];
    for (offset, (text, color)) in lines.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{}│", Theme::fg(&theme.colors.search_bar_border));
        print!("{}{}", Theme::fg(color), fit(text, inner));
        print!("{}│{}", Theme::fg(&theme.colors.search_bar_border), Theme::reset());
    }

    position_cursor(top + MODAL_HEIGHT - 1, left);
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘{}", "─".repeat(inner), Theme::reset());
}
