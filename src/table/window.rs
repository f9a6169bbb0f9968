//! Sliding window of page buttons around the current page.
//!
//! The pager shows at most five numbered buttons: two before the current page,
//! the current page, and two after it. Slots that would fall outside
//! `[0, page_count)` are omitted rather than shifted, so the window shrinks near
//! the edges instead of sliding.

/// Number of page slots shown on each side of the current page.
const WINDOW_RADIUS: usize = 2;

/// A single numbered page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    /// Zero-based page index the button navigates to.
    pub index: usize,
    /// One-based label shown to the user.
    pub label: usize,
    /// Whether this is the current page.
    pub active: bool,
}

/// Pager description for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Buttons in ascending page order.
    pub buttons: Vec<PageButton>,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl PageWindow {
    /// Returns the active button.
    #[must_use]
    pub fn current(&self) -> Option<&PageButton> {
        self.buttons.iter().find(|b| b.active)
    }
}

/// Computes the pager window for `current_page` out of `page_count` pages.
///
/// Out-of-contract input is clamped: a `page_count` of zero is treated as one
/// page and a `current_page` past the end as the last page.
///
/// # Example
///
/// ```
/// use zcatalog::table::page_window;
///
/// let window = page_window(0, 1);
/// assert_eq!(window.buttons.len(), 1);
/// assert!(window.previous_disabled && window.next_disabled);
/// ```
#[must_use]
pub fn page_window(current_page: usize, page_count: usize) -> PageWindow {
    let page_count = page_count.max(1);
    let current = current_page.min(page_count - 1);

    let first = current.saturating_sub(WINDOW_RADIUS);
    let last = (current + WINDOW_RADIUS).min(page_count - 1);

    let buttons = (first..=last)
        .map(|index| PageButton {
            index,
            label: index + 1,
            active: index == current,
        })
        .collect();

    PageWindow {
        buttons,
        previous_disabled: current == 0,
        next_disabled: current == page_count - 1,
    }
}
