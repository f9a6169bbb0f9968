//! Table component renderer.
//!
//! This module renders the active panel as a table: a header line with the
//! column labels, their sort keys and sort markers, then one line per visible
//! row. Expanded rows are followed by their detail lines.

use crate::table::SortIndicator;
use crate::ui::helpers::{self, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CellView, HeaderCell, RowView, TableView};

/// Indentation of the label/value lines of an expanded row.
const DETAIL_INDENT: usize = 4;

const fn indicator_glyph(indicator: SortIndicator) -> &'static str {
    match indicator {
        SortIndicator::None | SortIndicator::Unsorted => "",
        SortIndicator::Ascending => " ▲",
        SortIndicator::Descending => " ▼",
    }
}

/// Renders the header line and the rows, never writing at or below `max_row`.
///
/// # Returns
///
/// The next available row position
pub fn render_table(row: usize, view: &TableView, theme: &Theme, max_row: usize) -> usize {
    if row >= max_row {
        return row;
    }
    let mut current_row = render_table_headers(row, &view.headers, theme);
    for row_view in &view.rows {
        if current_row >= max_row {
            break;
        }
        current_row = render_table_row(current_row, row_view, &view.headers, theme, max_row);
    }
    current_row
}

/// Renders the column headers at the specified row.
///
/// Sortable columns are prefixed with the digit key that sorts them.
fn render_table_headers(row: usize, headers: &[HeaderCell], theme: &Theme) -> usize {
    position_cursor(row, 1);
    for (index, header) in headers.iter().enumerate() {
        if index > 0 {
            print!(" ");
        }
        let key = header.sort_key.map(|k| format!("{k} ")).unwrap_or_default();
        let key_width = key.chars().count().min(header.width);

        print!("{}{}", Theme::fg(&theme.colors.text_dim), fit(&key, key_width));
        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
        let label = format!("{}{}", header.label, indicator_glyph(header.indicator));
        print!("{}", fit(&label, header.width - key_width));
        print!("{}", Theme::reset());
    }
    row + 1
}

/// Renders a single table row.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Filter match highlights
/// 3. Link color, then the cell's tone
fn render_table_row(
    row: usize,
    row_view: &RowView,
    headers: &[HeaderCell],
    theme: &Theme,
    max_row: usize,
) -> usize {
    position_cursor(row, 1);

    let selection = if row_view.is_selected {
        Theme::bg(&theme.colors.selection_bg)
    } else {
        String::new()
    };

    for (index, (cell, header)) in row_view.cells.iter().zip(headers).enumerate() {
        if index > 0 {
            print!("{selection} ");
        }
        let base = format!("{selection}{}", cell_color(cell, row_view.is_selected, theme));
        print!("{base}");
        if cell.is_link && !row_view.is_selected {
            print!("{}", Theme::underline());
        }

        let text = fit(&cell.content.text, header.width);
        let trimmed = text.trim_end();
        helpers::render_highlighted_text(trimmed, &cell.highlight_ranges, theme, &base);
        print!("{}", Theme::reset());
        print!("{selection}{}", " ".repeat(header.width - trimmed.chars().count()));
        print!("{}", Theme::reset());
    }

    let mut current_row = row + 1;
    let label_width = row_view
        .details
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in &row_view.details {
        if current_row >= max_row {
            break;
        }
        position_cursor(current_row, DETAIL_INDENT + 1);
        print!("{}{}{}", Theme::bold(), Theme::fg(&theme.colors.text_dim), fit(label, label_width));
        print!("{}  {}{value}", Theme::reset(), Theme::fg(&theme.colors.text_normal));
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row
}

fn cell_color(cell: &CellView, selected: bool, theme: &Theme) -> String {
    if selected {
        Theme::fg(&theme.colors.selection_fg)
    } else if cell.is_link {
        Theme::fg(&theme.colors.link_fg)
    } else {
        Theme::fg(theme.tone(cell.content.tone))
    }
}
