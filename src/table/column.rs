//! Column descriptors for catalog tables.
//!
//! A [`Column`] names the field it reads from each [`Row`], its header, and how
//! the engine may use it (sorting, global filtering). Columns are built once
//! with the builder methods and never change for the lifetime of a table.

use crate::domain::{CellValue, Row};

/// Fixed width, in pixels, given to columns without an explicit width when at
/// least one column of the table declares one.
pub const DEFAULT_FIXED_WIDTH: u16 = 150;

/// Produces the displayed content of a cell from its row.
pub type CellRenderer = fn(&Row) -> CellText;

/// Colour role of a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Info,
    Success,
    Danger,
    Muted,
}

/// Rendered content of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellText {
    pub text: String,
    pub tone: Tone,
}

impl CellText {
    #[must_use]
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Normal)
    }
}

/// What a column displays, beyond its plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    /// Plain text.
    Text,
    /// A date; sorted chronologically.
    Date,
    /// An icon name derived from the value.
    Icon,
    /// A link whose target is read from another field of the row.
    Link {
        /// Accessor of the field holding the target URL.
        href: String,
    },
    /// A row action (for example closing an application).
    Action,
    /// Toggles the expanded detail panel of the row.
    Expander,
}

/// Resolved width of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Share of the table width, in percent.
    Percent(u8),
    /// Fixed width in pixels.
    Fixed(u16),
}

/// A single column definition.
#[derive(Debug, Clone)]
pub struct Column {
    pub id: String,
    pub accessor: String,
    pub header: String,
    pub kind: ColumnKind,
    pub sortable: bool,
    pub filterable: bool,
    /// Width in percent, if declared.
    pub width: Option<u8>,
    /// Direction used when the column is first selected for sorting.
    pub default_descending: bool,
    pub renderer: Option<CellRenderer>,
}

impl Column {
    /// Creates a sortable, filterable text column whose accessor equals its id.
    #[must_use]
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: id.clone(),
            id,
            header: header.into(),
            kind: ColumnKind::Text,
            sortable: true,
            filterable: true,
            width: None,
            default_descending: true,
            renderer: None,
        }
    }

    #[must_use]
    pub fn accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = accessor.into();
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn width(mut self, percent: u8) -> Self {
        self.width = Some(percent);
        self
    }

    #[must_use]
    pub const fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    #[must_use]
    pub const fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    #[must_use]
    pub const fn ascending_first(mut self) -> Self {
        self.default_descending = false;
        self
    }

    #[must_use]
    pub fn renderer(mut self, renderer: CellRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Raw value of this column in `row`.
    #[must_use]
    pub fn value<'a>(&self, row: &'a Row) -> &'a CellValue {
        row.value(&self.accessor)
    }

    /// Displayed content of this column in `row`, using the renderer when one is set.
    #[must_use]
    pub fn render(&self, row: &Row) -> CellText {
        self.renderer.map_or_else(
            || CellText::plain(self.value(row).to_string()),
            |render| render(row),
        )
    }

    /// Link target of this column in `row`, for link columns with a non-empty target.
    #[must_use]
    pub fn link_target(&self, row: &Row) -> Option<String> {
        match &self.kind {
            ColumnKind::Link { href } => {
                let target = row.text(href);
                (!target.is_empty() && target != "-").then_some(target)
            }
            _ => None,
        }
    }
}

/// Resolves the widths of a column set.
///
/// When no column declares a width, none is applied. Otherwise columns with a
/// width keep it and the others get [`DEFAULT_FIXED_WIDTH`].
#[must_use]
pub fn normalize_widths(columns: &[Column]) -> Vec<Option<ColumnWidth>> {
    if columns.iter().all(|c| c.width.is_none()) {
        return vec![None; columns.len()];
    }

    columns
        .iter()
        .map(|c| {
            Some(c.width.map_or(
                ColumnWidth::Fixed(DEFAULT_FIXED_WIDTH),
                ColumnWidth::Percent,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_untouched_when_none_declared() {
        let columns = vec![Column::new("a", "A"), Column::new("b", "B")];
        assert_eq!(normalize_widths(&columns), vec![None, None]);
    }

    #[test]
    fn undeclared_widths_default_to_fixed_once_any_is_declared() {
        let columns = vec![
            Column::new("name", "Name").width(65),
            Column::new("path", "Download"),
        ];
        assert_eq!(
            normalize_widths(&columns),
            vec![
                Some(ColumnWidth::Percent(65)),
                Some(ColumnWidth::Fixed(DEFAULT_FIXED_WIDTH))
            ]
        );
    }

    #[test]
    fn link_target_reads_href_field() {
        let column = Column::new("dataset", "Dataset").kind(ColumnKind::Link {
            href: "entity_url".to_string(),
        });
        let row = Row::new(0)
            .with("dataset", "Cohort A")
            .with("entity_url", "/e/dataset/1");
        assert_eq!(column.link_target(&row), Some("/e/dataset/1".to_string()));
        assert_eq!(column.render(&row).text, "Cohort A");

        let missing = Row::new(1).with("dataset", "Cohort B");
        assert_eq!(column.link_target(&missing), None);
    }

    #[test]
    fn renderer_overrides_plain_value() {
        fn shout(row: &Row) -> CellText {
            CellText::new(row.text("name").to_uppercase(), Tone::Info)
        }
        let column = Column::new("name", "Name").renderer(shout);
        let row = Row::new(0).with("name", "lux");
        assert_eq!(column.render(&row), CellText::new("LUX", Tone::Info));
    }
}
