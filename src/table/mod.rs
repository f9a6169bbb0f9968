//! Generic sortable, filterable, paginated table.
//!
//! - [`column`]: column descriptors and width normalisation
//! - [`engine`]: table state and the filter/sort/page derivation
//! - [`window`]: the pager's sliding window of page buttons

pub mod column;
pub mod engine;
pub mod window;

pub use column::{normalize_widths, CellRenderer, CellText, Column, ColumnKind, ColumnWidth, Tone};
pub use engine::{
    derive_visible_rows, SortIndicator, TableEngine, TableOptions, TableState, VisibleRows,
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
pub use window::{page_window, PageButton, PageWindow};
