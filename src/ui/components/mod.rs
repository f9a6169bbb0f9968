//! Composable UI component renderers.
//!
//! Each component prints one part of the interface at a given row and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar, panel tabs and the download button
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search or filter input box and the suggestion dropdown
//! - [`table`]: Column headers and the visible rows of the active table
//! - [`pagination`]: Page buttons and the entry count
//! - [`empty`]: Message shown in place of a table
//! - [`modal`]: The access link dialog and the error banner
//!
//! # Layout
//!
//! [`render_layout`] stacks the components:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Tabs]
//! [Border]
//! [Search Bar - 3 lines, when shown]
//! [Table Headers]
//! [Table Rows]
//! ...
//! [Alert]
//! [Pagination]
//! [Border]
//! [Footer]
//! ```
//!
//! The suggestion dropdown and the modal are drawn last, over the table.

mod empty;
mod footer;
mod header;
mod modal;
mod pagination;
mod search;
mod table;

pub use empty::render_empty_state;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, UIViewModel};

use footer::render_footer;
use header::render_header;
use modal::{render_alert, render_modal};
use pagination::render_pagination;
use search::{render_search_bar, render_suggestions};
use table::render_table;

/// Rows taken by the bottom chrome: alert, pagination, border, footer and the
/// unused last line.
pub const BOTTOM_CHROME_ROWS: usize = 5;

/// Rows above the table body: blank line, header, tabs, border and the
/// table's column headers.
pub const TOP_CHROME_ROWS: usize = 5;

/// Height of the search input box.
pub const SEARCH_BAR_ROWS: usize = 3;

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/table, table/footer).
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole interface for a view model.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let dropdown_row = vm.search_bar.as_ref().map(|search| {
        current_row = render_search_bar(current_row, search, theme, cols);
        current_row
    });

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let pagination_row = border_row.saturating_sub(1);
    let alert_row = pagination_row.saturating_sub(1);

    match &vm.body {
        BodyView::Table(view) => {
            render_table(current_row, view, theme, alert_row);
        }
        BodyView::Empty(empty) => render_empty_state(current_row + 1, empty, theme, cols),
    }

    if let Some(alert) = &vm.alert {
        render_alert(alert_row, alert, theme, cols);
    }
    if let Some(pagination) = &vm.pagination {
        render_pagination(pagination_row, pagination, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let (Some(row), Some(panel)) = (
        dropdown_row,
        vm.search_bar.as_ref().and_then(|s| s.suggestions.as_ref()),
    ) {
        render_suggestions(row, panel, theme, cols, alert_row);
    }
    if let Some(modal) = &vm.modal {
        render_modal(modal, theme, cols, rows);
    }
}
