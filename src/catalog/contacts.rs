//! Contacts of an entity.
//!
//! The list is supplied inline (or fetched from `contacts_url`) as an array of
//! people. Empty values are replaced by `"-"` before display, and each row can
//! be expanded into a small detail panel.

use super::records;
use crate::domain::{Result, Row};
use crate::table::{CellText, Column, ColumnKind, TableEngine, TableOptions, Tone};
use serde_json::Value as JsonValue;

/// Placeholder shown for missing values.
pub const PLACEHOLDER: &str = "-";

/// Accessor of the synthesized mail link target.
const MAILTO: &str = "mailto";

fn is_empty(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Bool(_) | JsonValue::Number(_) => false,
    }
}

/// Replaces empty properties with `"-"`, recursing into non-empty objects and
/// arrays. Numbers and booleans are left alone.
pub fn replace_empty_properties(value: &mut JsonValue) {
    let children: Vec<&mut JsonValue> = match value {
        JsonValue::Object(map) => map.values_mut().collect(),
        JsonValue::Array(items) => items.iter_mut().collect(),
        _ => return,
    };

    for child in children {
        if is_empty(child) {
            *child = JsonValue::String(PLACEHOLDER.to_string());
        } else {
            replace_empty_properties(child);
        }
    }
}

fn render_expander(_row: &Row) -> CellText {
    CellText::new("▸", Tone::Muted)
}

fn render_email(row: &Row) -> CellText {
    let email = row.text("email");
    if email == PLACEHOLDER {
        CellText::plain(PLACEHOLDER)
    } else {
        CellText::new(email, Tone::Info)
    }
}

#[must_use]
pub fn columns() -> Vec<Column> {
    vec![
        Column::new("expander", "")
            .kind(ColumnKind::Expander)
            .not_sortable()
            .not_filterable()
            .renderer(render_expander),
        Column::new("full_name", "Name").width(25),
        Column::new("affiliation", "Affiliation").width(25),
        Column::new("email", "Email")
            .width(25)
            .kind(ColumnKind::Link {
                href: MAILTO.to_string(),
            })
            .renderer(render_email),
        Column::new("roles", "Role").width(22),
    ]
}

#[must_use]
pub fn options() -> TableOptions {
    TableOptions {
        expandable: true,
        ..TableOptions::default()
    }
}

/// Decodes contact records after placeholder substitution.
///
/// # Errors
///
/// Returns [`crate::CatalogError::Parse`] when the payload holds no record list.
pub fn rows(json: &JsonValue) -> Result<Vec<Row>> {
    let mut json = json.clone();
    replace_empty_properties(&mut json);

    Ok(records(&json)?
        .into_iter()
        .enumerate()
        .map(|(id, object)| {
            let mut row = Row::from_json_object(id, object);
            let email = row.text("email");
            if !email.is_empty() && email != PLACEHOLDER {
                row.set(MAILTO, format!("mailto:{email}"));
            }
            row
        })
        .collect())
}

/// Builds the contacts table from a payload.
///
/// # Errors
///
/// See [`rows`].
pub fn build_table(json: &JsonValue) -> Result<TableEngine> {
    Ok(TableEngine::new(rows(json)?, columns(), options()))
}

/// Label/value pairs of the expanded detail panel of a contact.
#[must_use]
pub fn details(row: &Row) -> Vec<(&'static str, String)> {
    let or_placeholder = |accessor: &str| {
        let text = row.text(accessor);
        if text.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            text
        }
    };

    vec![
        ("Name", or_placeholder("full_name")),
        ("Address", or_placeholder("business_address")),
        ("Phone Number", PLACEHOLDER.to_string()),
    ]
}
