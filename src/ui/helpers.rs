//! Shared rendering utilities and helpers.
//!
//! This module provides low-level utilities used across multiple UI
//! components: cursor positioning, fitting text into fixed-width cells,
//! resolving column widths to terminal columns, and filter-match highlighting.
//!
//! All widths are counted in `char`s, not bytes.
//!
//! # Example
//!
//! ```rust
//! use zcatalog::ui::helpers::{fit, match_ranges};
//!
//! assert_eq!(fit("Luxembourg", 6), "Luxem…");
//! assert_eq!(fit("Lux", 6), "Lux   ");
//! assert_eq!(match_ranges("Cohort LUX lux", "lux"), vec![(7, 10), (11, 14)]);
//! ```

use crate::table::ColumnWidth;
use crate::ui::theme::Theme;

/// Terminal columns per pixel-ish unit of a fixed column width.
const PIXELS_PER_COLUMN: u16 = 10;

/// Narrowest width given to any column.
const MIN_COLUMN_WIDTH: usize = 3;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Truncates or pads `text` to exactly `width` characters.
///
/// Truncated text ends with `…`.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{text}{}", " ".repeat(width - len));
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Case-insensitive occurrences of `needle` in `text`, as character ranges
/// `(start, end)` with an exclusive end. Occurrences do not overlap.
#[must_use]
pub fn match_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = needle.to_lowercase().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let haystack: Vec<char> = text.to_lowercase().chars().collect();
    if haystack.len() != text.chars().count() {
        // Lower-casing changed the length; positions would not line up.
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == needle[..] {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Resolves normalised column widths into terminal columns for a table `cols`
/// wide.
///
/// Percent widths take their share of `cols`; fixed widths are scaled down
/// from pixels. Columns without any width share the space equally. When the
/// total overflows, the widest columns shrink first.
#[must_use]
pub fn column_widths(widths: &[Option<ColumnWidth>], cols: usize) -> Vec<usize> {
    if widths.is_empty() {
        return Vec::new();
    }
    // One separating space between columns.
    let usable = cols.saturating_sub(widths.len() - 1);

    let mut resolved: Vec<usize> = widths
        .iter()
        .map(|width| match width {
            Some(ColumnWidth::Percent(p)) => usable * usize::from(*p) / 100,
            Some(ColumnWidth::Fixed(px)) => usize::from(*px / PIXELS_PER_COLUMN),
            None => usable / widths.len(),
        })
        .map(|w| w.max(MIN_COLUMN_WIDTH))
        .collect();

    let mut total: usize = resolved.iter().sum();
    while total > usable {
        let Some((index, widest)) = resolved
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, w)| *w)
        else {
            break;
        };
        if widest <= MIN_COLUMN_WIDTH {
            break;
        }
        resolved[index] -= 1;
        total -= 1;
    }
    resolved
}

/// Prints `text` with the characters in `ranges` highlighted.
///
/// `base` is the escape sequence restored after each highlighted section, so
/// the surrounding cell keeps its colours (selection background included).
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, base: &str) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos {
            continue;
        }
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{base}");

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
