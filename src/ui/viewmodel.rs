//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! View models are optimized for rendering and contain pre-computed display
//! information like column widths, highlight ranges and selection state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use zcatalog::ui::viewmodel::{BodyView, EmptyState, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Catalog ".to_string(), tabs: vec![], download: None },
//!     search_bar: None,
//!     body: BodyView::Empty(EmptyState {
//!         message: "Loading...".to_string(),
//!         subtitle: String::new(),
//!     }),
//!     pagination: None,
//!     alert: None,
//!     modal: None,
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert!(vm.modal.is_none());
//! ```

use crate::table::{CellText, PageWindow, SortIndicator};

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Search or filter input, when shown.
    pub search_bar: Option<SearchBarInfo>,

    /// The active panel's table or a message in its place.
    pub body: BodyView,

    /// Pager of the active table, for paginated tables.
    pub pagination: Option<PaginationInfo>,

    /// Dismissible error banner.
    pub alert: Option<String>,

    /// Access link modal, drawn over everything else.
    pub modal: Option<ModalInfo>,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
    pub tabs: Vec<TabInfo>,
    /// Label of the download button, when the entity offers one.
    pub download: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub label: String,
    pub active: bool,
}

/// Footer display information.
///
/// Contains help text and keybinding hints for the bottom of the UI.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "q: quit  /: filter  Tab: next panel").
    pub keybindings: String,
}

/// Message shown instead of a table (loading, failure, no rows).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Prompt before the query, e.g. `"Search"`.
    pub label: String,
    pub query: String,
    /// Shown dimmed while the query is empty.
    pub placeholder: String,
    /// Whether typed characters currently go into this input.
    pub focused: bool,
    pub suggestions: Option<SuggestionPanel>,
}

/// The autocomplete dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionPanel {
    pub groups: Vec<SuggestionGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionGroup {
    pub header: String,
    pub items: Vec<SuggestionLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionLine {
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub enum BodyView {
    Table(TableView),
    Empty(EmptyState),
}

/// Display-ready slice of a table.
#[derive(Debug, Clone)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub indicator: SortIndicator,
    /// Width in terminal columns.
    pub width: usize,
    /// Digit key that sorts by this column, if sortable.
    pub sort_key: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct CellView {
    pub content: CellText,
    /// Whether the cell opens a link.
    pub is_link: bool,
    /// Character ranges matching the table filter.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct RowView {
    pub cells: Vec<CellView>,
    pub is_selected: bool,
    /// Label/value lines of the expanded detail panel; empty when collapsed.
    pub details: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub window: PageWindow,
    /// `"Showing n of m entries"`.
    pub label: Option<String>,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalInfo {
    pub title: String,
    pub url: String,
    pub password: String,
    pub valid_until: String,
}
