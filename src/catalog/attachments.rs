//! Files attached to an entity.
//!
//! Fetched from `attachments_url`, which answers `{"data": [...]}` with one
//! record per file: `format` (MIME type), `name` (percent-encoded), `size` in
//! bytes, `lastModified` and the download `path`. An empty list is treated as a
//! failure, the same way an unreadable response is.

use super::records;
use crate::domain::{CatalogError, CellValue, Result, Row};
use crate::table::{CellText, Column, ColumnKind, TableEngine, TableOptions, Tone};
use chrono::DateTime;
use serde_json::Value as JsonValue;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Material icon name for a MIME format.
#[must_use]
pub fn format_icon(format: &str) -> &'static str {
    let has = |needle: &str| format.contains(needle);
    if has("pdf") {
        "picture_as_pdf"
    } else if has("zip") || has("rar") || has("7z") {
        "folder_zip"
    } else if has("xls") || has("csv") || has("tab-separated-values") || has("spreadsheet") {
        "table_chart"
    } else if has("text") || has("word") || has("doc") {
        "text_snippet"
    } else if has("image") {
        "image"
    } else {
        "note"
    }
}

/// Short terminal label for an icon returned by [`format_icon`].
fn icon_label(icon: &str) -> &'static str {
    match icon {
        "picture_as_pdf" => "PDF",
        "folder_zip" => "ZIP",
        "table_chart" => "TAB",
        "text_snippet" => "TXT",
        "image" => "IMG",
        _ => "BIN",
    }
}

/// Human readable byte size: base 1024, one decimal, trailing `.0` dropped.
///
/// # Examples
///
/// ```
/// use zcatalog::catalog::attachments::format_byte_size;
///
/// assert_eq!(format_byte_size(0.0), "0B");
/// assert_eq!(format_byte_size(1536.0), "1.5KB");
/// assert_eq!(format_byte_size(1_048_576.0), "1MB");
/// ```
#[must_use]
pub fn format_byte_size(bytes: f64) -> String {
    if bytes == 0.0 || !bytes.is_finite() {
        return "0B".to_string();
    }

    let mut index = 0;
    let mut scaled = bytes;
    while scaled.abs() >= 1024.0 && index < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        index += 1;
    }
    let formatted = format!("{scaled:.1}");
    let trimmed = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("{trimmed}{}", SIZE_UNITS[index])
}

fn render_format(row: &Row) -> CellText {
    CellText::new(icon_label(format_icon(&row.text("format"))), Tone::Info)
}

fn render_name(row: &Row) -> CellText {
    let raw = row.text("name");
    let name = urlencoding::decode(&raw).map_or(raw.clone(), |decoded| decoded.into_owned());
    CellText::plain(name)
}

fn render_size(row: &Row) -> CellText {
    CellText::plain(
        row.value("size")
            .as_number()
            .map_or_else(String::new, format_byte_size),
    )
}

fn render_download(_row: &Row) -> CellText {
    CellText::new("⤓", Tone::Info)
}

#[must_use]
pub fn columns() -> Vec<Column> {
    vec![
        Column::new("format", "Type")
            .width(5)
            .kind(ColumnKind::Icon)
            .not_sortable()
            .renderer(render_format),
        Column::new("name", "Name").width(65).renderer(render_name),
        Column::new("size", "Size").width(12).renderer(render_size),
        Column::new("lastModified", "Last modified")
            .width(13)
            .kind(ColumnKind::Date),
        Column::new("download", "")
            .kind(ColumnKind::Link {
                href: "path".to_string(),
            })
            .not_sortable()
            .renderer(render_download),
    ]
}

#[must_use]
pub fn options() -> TableOptions {
    TableOptions {
        sort: true,
        ..TableOptions::default()
    }
    .with_default_sort("name", "asc")
}

fn last_modified(value: &CellValue) -> CellValue {
    match value {
        #[allow(clippy::cast_possible_truncation)]
        CellValue::Number(ms) => DateTime::from_timestamp_millis(*ms as i64)
            .map_or(CellValue::Null, |dt| CellValue::Date(dt.naive_utc())),
        CellValue::Text(raw) => CellValue::date_from_str(raw),
        other => other.clone(),
    }
}

/// Decodes attachment records.
///
/// Sizes sent as numeric text become numbers and `lastModified` becomes a
/// date (ISO text or epoch milliseconds).
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] when the payload has no record list or the
/// list is empty.
pub fn rows(json: &JsonValue) -> Result<Vec<Row>> {
    let records = records(json)?;
    if records.is_empty() {
        return Err(CatalogError::Parse("no attached files".to_string()));
    }

    Ok(records
        .into_iter()
        .enumerate()
        .map(|(id, object)| {
            let mut row = Row::from_json_object(id, object);
            if let Some(size) = row.value("size").as_number() {
                row.set("size", size);
            }
            let modified = last_modified(row.value("lastModified"));
            row.set("lastModified", modified);
            row
        })
        .collect())
}

/// Builds the attachments table from a payload.
///
/// # Errors
///
/// See [`rows`].
pub fn build_table(json: &JsonValue) -> Result<TableEngine> {
    Ok(TableEngine::new(rows(json)?, columns(), options()))
}
