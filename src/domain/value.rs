//! Typed cell values and catalog rows.
//!
//! Catalog data arrives as flat JSON records. Each record becomes a [`Row`]
//! mapping a column accessor to a [`CellValue`]. Values are a small closed set so
//! that sorting can be type aware (numbers and dates by value, everything else by
//! string) without inspecting shapes at runtime.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of a row: its position in the caller's input sequence.
pub type RowId = usize;

/// Display format used for date cells.
const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d";

/// Formats tried, in order, when a string is parsed as a date.
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
];

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or explicit `null`.
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
}

impl CellValue {
    /// Converts a JSON value into a cell value.
    ///
    /// Arrays are joined with `", "` (contact roles arrive as lists); objects are
    /// kept as their compact JSON text.
    #[must_use]
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(*b),
            JsonValue::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            JsonValue::String(s) => Self::Text(s.clone()),
            JsonValue::Array(items) => Self::Text(
                items
                    .iter()
                    .map(|item| Self::from_json(item).to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            JsonValue::Object(_) => Self::Text(value.to_string()),
        }
    }

    /// Parses a date string, returning [`CellValue::Null`] when no known format matches.
    #[must_use]
    pub fn date_from_str(raw: &str) -> Self {
        parse_date(raw).map_or(Self::Null, Self::Date)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the numeric value of the cell, parsing numeric text.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Position of the variant in the cross-type order.
    const fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
            Self::Null => 4,
        }
    }

    /// Total order over cell values.
    ///
    /// Values of the same kind compare by value: numbers numerically, dates
    /// chronologically, text case-sensitively. Different kinds order as
    /// `Bool < Number < Date < Text < Null`, so a column mixing numbers and
    /// text groups the numbers first.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format(DATE_DISPLAY_FORMAT)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(d: NaiveDateTime) -> Self {
        Self::Date(d)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Parses the date formats produced by the catalog back end.
///
/// Accepts RFC 3339, RFC 2822, ISO-like naive timestamps and bare `YYYY-MM-DD`
/// dates (taken as midnight).
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_utc());
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// One record of displayable data.
///
/// Cells are keyed by accessor. Display order comes from the table's columns,
/// so the map is not kept in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    /// Position of the record in the input sequence.
    pub id: RowId,
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    #[must_use]
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            cells: BTreeMap::new(),
        }
    }

    /// Builder-style insertion of a cell.
    #[must_use]
    pub fn with(mut self, accessor: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(accessor.into(), value.into());
        self
    }

    pub fn set(&mut self, accessor: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(accessor.into(), value.into());
    }

    /// Returns the value under `accessor`, `None` when the record lacks the key.
    #[must_use]
    pub fn get(&self, accessor: &str) -> Option<&CellValue> {
        self.cells.get(accessor)
    }

    /// Returns the value under `accessor`, treating a missing key as null.
    #[must_use]
    pub fn value(&self, accessor: &str) -> &CellValue {
        self.cells.get(accessor).unwrap_or(&CellValue::Null)
    }

    /// Returns the displayed text under `accessor` (empty for null or missing).
    #[must_use]
    pub fn text(&self, accessor: &str) -> String {
        self.value(accessor).to_string()
    }

    /// Builds a row from a flat JSON object.
    #[must_use]
    pub fn from_json_object(id: RowId, object: &serde_json::Map<String, JsonValue>) -> Self {
        let cells = object
            .iter()
            .map(|(key, value)| (key.clone(), CellValue::from_json(value)))
            .collect();
        Self { id, cells }
    }

    /// Cells in accessor order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_compare_by_value_not_text() {
        let nine = CellValue::Number(9.0);
        let ten = CellValue::Number(10.0);
        assert_eq!(nine.compare(&ten), Ordering::Less);
        assert_eq!(nine.to_string(), "9");
    }

    #[test]
    fn mixed_kinds_order_by_kind_first() {
        let nine = CellValue::from(9.0);
        let ten_a = CellValue::from("10a");
        let ten = CellValue::from("10");
        assert_eq!(nine.compare(&ten_a), Ordering::Less);
        assert_eq!(nine.compare(&ten), Ordering::Less);
        assert_eq!(ten.compare(&ten_a), Ordering::Less);
        assert_eq!(CellValue::from(true).compare(&nine), Ordering::Less);
        assert_eq!(ten.compare(&CellValue::Null), Ordering::Less);
    }

    #[test]
    fn text_comparison_is_case_sensitive() {
        let upper = CellValue::from("Zeta");
        let lower = CellValue::from("alpha");
        assert_eq!(upper.compare(&lower), Ordering::Less);
    }

    #[test]
    fn parses_backend_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2019, 11, 19)
            .and_then(|d| d.and_hms_opt(16, 27, 41));
        assert_eq!(parse_date("2019-11-19T16:27:41"), expected);
        assert_eq!(parse_date("Tue, 19 Nov 2019 16:27:41 GMT"), expected);
        assert_eq!(parse_date("2019-11-19T16:27:41+00:00"), expected);
        assert_eq!(
            parse_date("2019-11-19"),
            NaiveDate::from_ymd_opt(2019, 11, 19).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn row_from_json_object_maps_types() {
        let value = json!({"name": "data.csv", "size": 2048, "roles": ["PI", "Data steward"], "email": null});
        let object = value.as_object().cloned().unwrap_or_default();
        let row = Row::from_json_object(3, &object);

        assert_eq!(row.id, 3);
        assert_eq!(row.get("name"), Some(&CellValue::from("data.csv")));
        assert_eq!(row.get("size"), Some(&CellValue::Number(2048.0)));
        assert_eq!(row.text("roles"), "PI, Data steward");
        assert!(row.value("email").is_null());
        assert!(row.value("missing").is_null());
    }

    #[test]
    fn cells_iterate_in_accessor_order() {
        let row = Row::new(0).with("state", "open").with("dataset", "Cohort").with("ext_id", "A-1");
        let keys: Vec<&str> = row.cells().map(|(k, _)| k).collect();
        assert_eq!(keys, ["dataset", "ext_id", "state"]);
    }
}
