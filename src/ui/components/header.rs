//! Header component renderer.
//!
//! This module renders the plugin title bar with centered text, the panel tabs
//! underneath it and, on the right of the tabs, the download button.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title line and the tab line starting at `row`.
///
/// The title is centered horizontally with bold styling. Padding is split
/// evenly on both sides; if the width cannot evenly divide, the right padding
/// is slightly larger.
///
/// # Returns
///
/// The next available row position (row + 2)
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [right padding]
///  Applications │ Contacts │ Attachments        [d] Download Data
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.chars().count();
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));

    print!("{}", Theme::reset());

    render_tabs(row + 1, header, theme, cols)
}

fn render_tabs(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let mut used = 0;
    for (index, tab) in header.tabs.iter().enumerate() {
        if index > 0 {
            print!("{} │ {}", Theme::fg(&theme.colors.border), Theme::reset());
            used += 3;
        } else {
            print!(" ");
            used += 1;
        }
        if tab.active {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent_fg));
            print!("{}{}", Theme::underline(), tab.label);
        } else {
            print!("{}{}", Theme::fg(&theme.colors.text_dim), tab.label);
        }
        print!("{}", Theme::reset());
        used += tab.label.chars().count();
    }

    if let Some(label) = &header.download {
        let button = format!("[d] {label} ");
        let width = button.chars().count();
        print!("{}", " ".repeat(cols.saturating_sub(used + width)));
        print!("{}{button}{}", Theme::fg(&theme.colors.link_fg), Theme::reset());
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    }

    row + 1
}
