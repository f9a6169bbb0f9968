//! Filtering, sorting and paging over catalog rows.
//!
//! [`TableEngine`] owns a table's rows, its column definitions and a
//! [`TableState`]. Every mutation goes through one of the engine operations,
//! which keep the state inside its invariants (page index within the last page,
//! selection cursor within the visible rows). The visible subset is always
//! recomputed from scratch by [`derive_visible_rows`], so any renderer can call
//! it after a mutation without caching.

use super::column::Column;
use crate::domain::{CatalogError, Result, Row, RowId};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Page sizes a user can pick from.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

/// Page size of a freshly created table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Features enabled for a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableOptions {
    /// Global text filter.
    pub search: bool,
    pub pagination: bool,
    pub sort: bool,
    /// Rows can be expanded into a detail panel.
    pub expandable: bool,
    /// Initial sort column and direction (`true` = descending).
    pub default_sort: Option<(String, bool)>,
    pub search_placeholder: String,
}

impl TableOptions {
    /// Sets the initial sort from a column id and an order string.
    ///
    /// Any order other than `"asc"` sorts descending.
    #[must_use]
    pub fn with_default_sort(mut self, column_id: impl Into<String>, order: &str) -> Self {
        self.default_sort = Some((column_id.into(), order != "asc"));
        self
    }
}

/// Mutable view state of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub filter_text: String,
    pub sort_column_id: Option<String>,
    pub sort_descending: bool,
    pub page_index: usize,
    pub page_size: usize,
    pub expanded_row_ids: BTreeSet<RowId>,
}

impl TableState {
    /// Creates the initial state for a table with `options`.
    #[must_use]
    pub fn new(options: &TableOptions) -> Self {
        let (sort_column_id, sort_descending) = options
            .default_sort
            .clone()
            .map_or((None, true), |(id, desc)| (Some(id), desc));

        Self {
            filter_text: String::new(),
            sort_column_id,
            sort_descending,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            expanded_row_ids: BTreeSet::new(),
        }
    }
}

/// Sort marker shown next to a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Column can't be sorted.
    None,
    Unsorted,
    Ascending,
    Descending,
}

/// Result of deriving the visible rows of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRows<'a> {
    /// Rows of the current page, in display order.
    pub rows: Vec<&'a Row>,
    /// Number of rows matching the filter.
    pub filtered_count: usize,
    pub page_count: usize,
}

fn matches_filter(row: &Row, columns: &[Column], needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    columns
        .iter()
        .filter(|c| c.filterable)
        .any(|c| c.value(row).to_string().to_lowercase().contains(needle))
}

fn compare_rows(a: &Row, b: &Row, column: &Column, descending: bool) -> Ordering {
    let (va, vb) = (column.value(a), column.value(b));
    match (va.is_null(), vb.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if descending => vb.compare(va),
        (false, false) => va.compare(vb),
    }
}

fn page_count_for(filtered_count: usize, page_size: usize) -> usize {
    filtered_count.div_ceil(page_size.max(1)).max(1)
}

/// Returns the rows matching the filter, sorted per `state`.
fn filtered_sorted<'a>(
    rows: &'a [Row],
    columns: &[Column],
    options: &TableOptions,
    state: &TableState,
) -> Vec<&'a Row> {
    let needle = state.filter_text.to_lowercase();
    let mut filtered: Vec<&Row> = rows
        .iter()
        .filter(|row| matches_filter(row, columns, &needle))
        .collect();

    if options.sort {
        let sort_column = state
            .sort_column_id
            .as_deref()
            .and_then(|id| columns.iter().find(|c| c.id == id && c.sortable));
        if let Some(column) = sort_column {
            filtered.sort_by(|a, b| compare_rows(a, b, column, state.sort_descending));
        }
    }

    filtered
}

/// Derives the visible rows: filter, then sort, then page slice.
///
/// Without pagination every filtered and sorted row is returned and the page
/// count is one.
#[must_use]
pub fn derive_visible_rows<'a>(
    rows: &'a [Row],
    columns: &[Column],
    options: &TableOptions,
    state: &TableState,
) -> VisibleRows<'a> {
    let filtered = filtered_sorted(rows, columns, options, state);
    let filtered_count = filtered.len();

    if !options.pagination {
        return VisibleRows {
            rows: filtered,
            filtered_count,
            page_count: 1,
        };
    }

    let page_count = page_count_for(filtered_count, state.page_size);
    let page_index = state.page_index.min(page_count - 1);
    let rows = filtered
        .into_iter()
        .skip(page_index * state.page_size)
        .take(state.page_size)
        .collect();

    VisibleRows {
        rows,
        filtered_count,
        page_count,
    }
}

/// A table: rows, columns, options and view state.
#[derive(Debug, Clone)]
pub struct TableEngine {
    rows: Vec<Row>,
    columns: Vec<Column>,
    options: TableOptions,
    state: TableState,
    selected: usize,
}

impl TableEngine {
    #[must_use]
    pub fn new(rows: Vec<Row>, columns: Vec<Column>, options: TableOptions) -> Self {
        let state = TableState::new(&options);
        Self {
            rows,
            columns,
            options,
            state,
            selected: 0,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    #[must_use]
    pub const fn state(&self) -> &TableState {
        &self.state
    }

    /// Replaces the row data, keeping filter, sort and page size.
    ///
    /// Expanded ids that no longer name a row are dropped.
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        let ids: BTreeSet<RowId> = self.rows.iter().map(|r| r.id).collect();
        self.state.expanded_row_ids.retain(|id| ids.contains(id));
        self.clamp();
    }

    /// Sets the global filter text and returns to the first page.
    pub fn set_filter(&mut self, text: &str) {
        let _span = tracing::debug_span!("set_filter", filter_len = text.len()).entered();

        self.state.filter_text = text.to_string();
        self.state.page_index = 0;
        self.selected = 0;
        self.clamp();

        tracing::debug!(filtered_count = self.filtered_count(), "table filter applied");
    }

    /// Sorts by `column_id`, toggling the direction if it is already the sort column.
    ///
    /// Unknown and non-sortable columns are ignored, as is every call when
    /// sorting is disabled for the table.
    pub fn set_sort(&mut self, column_id: &str) {
        if !self.options.sort {
            return;
        }
        let Some(column) = self.columns.iter().find(|c| c.id == column_id) else {
            tracing::debug!(column_id, "sort requested on unknown column");
            return;
        };
        if !column.sortable {
            return;
        }

        if self.state.sort_column_id.as_deref() == Some(column_id) {
            self.state.sort_descending = !self.state.sort_descending;
        } else {
            self.state.sort_column_id = Some(column_id.to_string());
            self.state.sort_descending = column.default_descending;
        }

        tracing::debug!(
            column_id,
            descending = self.state.sort_descending,
            "table sort changed"
        );
    }

    /// Changes the page size, keeping the page index within the last page.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPageSize`] when `size` is not one of
    /// [`PAGE_SIZE_OPTIONS`]; the state is left untouched.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return Err(CatalogError::InvalidPageSize(size));
        }

        let filtered = self.filtered_count();
        self.state.page_size = size;
        self.state.page_index = self
            .state
            .page_index
            .min(filtered.saturating_sub(1) / size);
        self.clamp();
        Ok(())
    }

    /// Jumps to page `index`, clamped to the existing pages.
    pub fn goto_page(&mut self, index: usize) {
        if !self.options.pagination {
            return;
        }
        let last = self.page_count() - 1;
        let target = index.min(last);
        if target != self.state.page_index {
            self.state.page_index = target;
            self.selected = 0;
        }
    }

    pub fn next_page(&mut self) {
        if self.state.page_index + 1 < self.page_count() {
            self.goto_page(self.state.page_index + 1);
        }
    }

    pub fn previous_page(&mut self) {
        if self.state.page_index > 0 {
            self.goto_page(self.state.page_index - 1);
        }
    }

    /// Flips the expanded state of `row_id`. Does nothing for non-expandable tables.
    pub fn toggle_expand(&mut self, row_id: RowId) {
        if !self.options.expandable {
            return;
        }
        if !self.state.expanded_row_ids.remove(&row_id) {
            self.state.expanded_row_ids.insert(row_id);
        }
    }

    #[must_use]
    pub fn is_expanded(&self, row_id: RowId) -> bool {
        self.state.expanded_row_ids.contains(&row_id)
    }

    /// Rows shown on the current page, in display order.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&Row> {
        self.derive().rows
    }

    #[must_use]
    pub fn derive(&self) -> VisibleRows<'_> {
        derive_visible_rows(&self.rows, &self.columns, &self.options, &self.state)
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        let needle = self.state.filter_text.to_lowercase();
        self.rows
            .iter()
            .filter(|row| matches_filter(row, &self.columns, &needle))
            .count()
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        if self.options.pagination {
            page_count_for(self.filtered_count(), self.state.page_size)
        } else {
            1
        }
    }

    /// `"Showing {n} of {total} entries"`, only for paginated tables.
    #[must_use]
    pub fn displayed_rows_label(&self) -> Option<String> {
        self.options.pagination.then(|| {
            format!(
                "Showing {} of {} entries",
                self.visible_rows().len(),
                self.rows.len()
            )
        })
    }

    /// Sort marker for the header of `column`.
    #[must_use]
    pub fn sort_indicator(&self, column: &Column) -> SortIndicator {
        if !self.options.sort || !column.sortable {
            return SortIndicator::None;
        }
        match self.state.sort_column_id.as_deref() {
            Some(id) if id == column.id && self.state.sort_descending => SortIndicator::Descending,
            Some(id) if id == column.id => SortIndicator::Ascending,
            _ => SortIndicator::Unsorted,
        }
    }

    /// Position of the keyboard cursor within the visible rows.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<&Row> {
        self.visible_rows().get(self.selected).copied()
    }

    /// Moves the cursor down, wrapping to the first visible row.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// Moves the cursor up, wrapping to the last visible row.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        if self.selected == 0 {
            self.selected = len - 1;
        } else {
            self.selected -= 1;
        }
    }

    fn clamp(&mut self) {
        let last_page = self.page_count() - 1;
        self.state.page_index = self.state.page_index.min(last_page);

        let visible = self.visible_rows().len();
        self.selected = if visible == 0 {
            0
        } else {
            self.selected.min(visible - 1)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellValue;

    fn letters(values: &[&str]) -> Vec<Row> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Row::new(i).with("n", *v))
            .collect()
    }

    fn names(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.text("n")).collect()
    }

    fn sortable_options() -> TableOptions {
        TableOptions {
            sort: true,
            ..TableOptions::default()
        }
    }

    fn numbered(count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| Row::new(i).with("n", format!("row {i}")))
            .collect()
    }

    fn paged(count: usize) -> TableEngine {
        TableEngine::new(
            numbered(count),
            vec![Column::new("n", "N")],
            TableOptions {
                pagination: true,
                search: true,
                ..TableOptions::default()
            },
        )
    }

    #[test]
    fn sorts_ascending_and_descending() {
        let columns = vec![Column::new("n", "N").ascending_first()];
        let mut table = TableEngine::new(letters(&["b", "a", "c"]), columns, sortable_options());

        table.set_sort("n");
        assert_eq!(names(&table.visible_rows()), vec!["a", "b", "c"]);

        table.set_sort("n");
        assert_eq!(names(&table.visible_rows()), vec!["c", "b", "a"]);
    }

    #[test]
    fn new_sort_column_defaults_to_descending() {
        let mut table = TableEngine::new(
            letters(&["b", "a", "c"]),
            vec![Column::new("n", "N")],
            sortable_options(),
        );
        table.set_sort("n");
        assert!(table.state().sort_descending);
        assert_eq!(names(&table.visible_rows()), vec!["c", "b", "a"]);
    }

    #[test]
    fn double_toggle_restores_direction_with_stable_ties() {
        let rows = vec![
            Row::new(0).with("k", "x").with("tag", "first"),
            Row::new(1).with("k", "a").with("tag", "second"),
            Row::new(2).with("k", "x").with("tag", "third"),
            Row::new(3).with("k", "a").with("tag", "fourth"),
        ];
        let mut table = TableEngine::new(rows, vec![Column::new("k", "K")], sortable_options());

        table.set_sort("k");
        let first: Vec<RowId> = table.visible_rows().iter().map(|r| r.id).collect();
        table.set_sort("k");
        table.set_sort("k");
        let again: Vec<RowId> = table.visible_rows().iter().map(|r| r.id).collect();

        assert_eq!(first, again);
        assert_eq!(first, vec![0, 2, 1, 3]);
    }

    #[test]
    fn nulls_sort_last_in_both_directions() {
        let rows = vec![
            Row::new(0).with("size", CellValue::Null),
            Row::new(1).with("size", 10.0),
            Row::new(2),
            Row::new(3).with("size", 2.0),
        ];
        let mut table = TableEngine::new(rows, vec![Column::new("size", "Size")], sortable_options());

        table.set_sort("size");
        let ids: Vec<RowId> = table.visible_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 0, 2]);

        table.set_sort("size");
        let ids: Vec<RowId> = table.visible_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 0, 2]);
    }

    #[test]
    fn numbers_sort_by_value() {
        let rows = vec![
            Row::new(0).with("size", 100.0),
            Row::new(1).with("size", 9.0),
            Row::new(2).with("size", 25.0),
        ];
        let columns = vec![Column::new("size", "Size").ascending_first()];
        let mut table = TableEngine::new(rows, columns, sortable_options());
        table.set_sort("size");
        let ids: Vec<RowId> = table.visible_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 0]);
    }

    #[test]
    fn mixed_number_and_text_column_sorts_without_panicking() {
        #[allow(clippy::cast_precision_loss)]
        let rows: Vec<Row> = (0..200)
            .map(|i| {
                let n = i / 3;
                let value = match i % 3 {
                    0 => CellValue::from(n as f64),
                    1 => CellValue::from(format!("{n}a")),
                    _ => CellValue::from(format!("{n}")),
                };
                Row::new(i).with("k", value)
            })
            .collect();
        let columns = vec![Column::new("k", "K").ascending_first()];
        let mut table = TableEngine::new(rows, columns, sortable_options());

        table.set_sort("k");
        let sorted = table.visible_rows();
        assert_eq!(sorted.len(), 200);
        assert!(sorted[..67]
            .iter()
            .all(|row| matches!(row.value("k"), CellValue::Number(_))));
        assert!(sorted
            .windows(2)
            .all(|pair| pair[0].value("k").compare(pair[1].value("k")).is_le()));

        table.set_sort("k");
        assert_eq!(table.visible_rows().len(), 200);
    }

    #[test]
    fn non_sortable_and_unknown_columns_are_ignored() {
        let columns = vec![Column::new("n", "N").not_sortable()];
        let mut table = TableEngine::new(letters(&["b", "a"]), columns, sortable_options());
        table.set_sort("n");
        table.set_sort("missing");
        assert_eq!(table.state().sort_column_id, None);
        assert_eq!(names(&table.visible_rows()), vec!["b", "a"]);
    }

    #[test]
    fn sort_disabled_ignores_requests_and_default() {
        let options = TableOptions::default().with_default_sort("n", "asc");
        let mut table = TableEngine::new(letters(&["b", "a"]), vec![Column::new("n", "N")], options);
        table.set_sort("n");
        assert_eq!(names(&table.visible_rows()), vec!["b", "a"]);
    }

    #[test]
    fn default_sort_order_is_descending_unless_asc() {
        let desc = TableOptions::default().with_default_sort("n", "whatever");
        assert_eq!(desc.default_sort, Some(("n".to_string(), true)));
        let asc = TableOptions::default().with_default_sort("n", "asc");
        assert_eq!(asc.default_sort, Some(("n".to_string(), false)));
    }

    #[test]
    fn filter_matches_filterable_columns_case_insensitively() {
        let rows = vec![
            Row::new(0).with("name", "Luxembourg cohort").with("state", "approved"),
            Row::new(1).with("name", "Other").with("state", "LUX-hidden"),
        ];
        let columns = vec![
            Column::new("name", "Name"),
            Column::new("state", "State").not_filterable(),
        ];
        let mut table = TableEngine::new(rows, columns, TableOptions::default());

        table.set_filter("lux");
        let ids: Vec<RowId> = table.visible_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0]);
    }

    #[test]
    fn empty_filter_restores_full_count() {
        let mut table = paged(23);
        table.set_filter("row 1");
        assert_eq!(table.filtered_count(), 11);
        table.set_filter("");
        assert_eq!(table.filtered_count(), 23);
    }

    #[test]
    fn filter_resets_page_index() {
        let mut table = paged(23);
        table.goto_page(2);
        assert_eq!(table.state().page_index, 2);
        table.set_filter("row");
        assert_eq!(table.state().page_index, 0);
    }

    #[test]
    fn filtering_to_nothing_yields_single_empty_page() {
        let mut table = paged(23);
        table.goto_page(1);
        table.set_filter("no such row");
        assert_eq!(table.page_count(), 1);
        assert_eq!(table.state().page_index, 0);
        assert!(table.visible_rows().is_empty());
        assert!(table.selected_row().is_none());
    }

    #[test]
    fn page_size_change_clamps_page_index() {
        let mut table = paged(23);
        table.goto_page(2);
        assert_eq!(table.visible_rows().len(), 3);

        assert!(table.set_page_size(50).is_ok());
        assert_eq!(table.state().page_index, 0);
        assert_eq!(table.page_count(), 1);
        assert_eq!(table.visible_rows().len(), 23);
    }

    #[test]
    fn page_size_shrink_keeps_reachable_index() {
        let mut table = paged(23);
        table.goto_page(2);
        assert!(table.set_page_size(5).is_ok());
        assert_eq!(table.state().page_index, 2);
        assert_eq!(table.page_count(), 5);
    }

    #[test]
    fn unsupported_page_size_is_rejected() {
        let mut table = paged(23);
        let result = table.set_page_size(7);
        assert!(matches!(result, Err(CatalogError::InvalidPageSize(7))));
        assert_eq!(table.state().page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_navigation_stays_in_bounds() {
        let mut table = paged(23);
        table.previous_page();
        assert_eq!(table.state().page_index, 0);

        table.goto_page(99);
        assert_eq!(table.state().page_index, 2);
        table.next_page();
        assert_eq!(table.state().page_index, 2);

        table.previous_page();
        assert_eq!(table.state().page_index, 1);
    }

    #[test]
    fn displayed_rows_label_counts_page_and_total() {
        let mut table = paged(23);
        table.goto_page(2);
        assert_eq!(
            table.displayed_rows_label(),
            Some("Showing 3 of 23 entries".to_string())
        );

        let plain = TableEngine::new(numbered(3), vec![Column::new("n", "N")], TableOptions::default());
        assert_eq!(plain.displayed_rows_label(), None);
        assert_eq!(plain.page_count(), 1);
        assert_eq!(plain.visible_rows().len(), 3);
    }

    #[test]
    fn expansion_persists_across_sort_and_filter() {
        let options = TableOptions {
            expandable: true,
            sort: true,
            search: true,
            ..TableOptions::default()
        };
        let mut table = TableEngine::new(letters(&["b", "a", "c"]), vec![Column::new("n", "N")], options);

        table.toggle_expand(1);
        table.set_sort("n");
        table.set_filter("a");
        table.set_filter("");
        assert!(table.is_expanded(1));

        table.toggle_expand(1);
        assert!(!table.is_expanded(1));
    }

    #[test]
    fn expansion_requires_expandable_table() {
        let mut table = paged(3);
        table.toggle_expand(0);
        assert!(!table.is_expanded(0));
    }

    #[test]
    fn selection_wraps_within_visible_rows() {
        let mut table = paged(12);
        table.move_selection_up();
        assert_eq!(table.selected_index(), 9);
        table.move_selection_down();
        assert_eq!(table.selected_index(), 0);

        table.next_page();
        assert_eq!(table.selected_index(), 0);
        table.move_selection_up();
        assert_eq!(table.selected_index(), 1);
        assert_eq!(table.selected_row().map(|r| r.id), Some(11));
    }

    #[test]
    fn sort_indicator_tracks_state() {
        let columns = vec![Column::new("a", "A"), Column::new("b", "B").not_sortable()];
        let options = sortable_options().with_default_sort("a", "desc");
        let mut table = TableEngine::new(vec![], columns.clone(), options);

        assert_eq!(table.sort_indicator(&columns[0]), SortIndicator::Descending);
        assert_eq!(table.sort_indicator(&columns[1]), SortIndicator::None);
        table.set_sort("a");
        assert_eq!(table.sort_indicator(&columns[0]), SortIndicator::Ascending);
    }

    #[test]
    fn replace_rows_drops_stale_expansions() {
        let options = TableOptions {
            expandable: true,
            ..TableOptions::default()
        };
        let mut table = TableEngine::new(letters(&["a", "b"]), vec![Column::new("n", "N")], options);
        table.toggle_expand(1);
        table.replace_rows(letters(&["a"]));
        assert!(!table.is_expanded(1));
    }
}
