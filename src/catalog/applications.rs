//! The user's access applications.
//!
//! Records are supplied by the page (inline JSON in the plugin configuration) or
//! fetched from `applications_url`. Each carries `ext_id`, `dataset`,
//! `entity_url`, `state` and `creation_date_string`; the latter is parsed into a
//! `creationDate` date cell used for sorting.

use super::records;
use crate::catalog::api::{HttpRequest, RequestKind, RequestTag};
use crate::domain::{CellValue, Result, Row};
use crate::table::{CellText, Column, ColumnKind, TableEngine, TableOptions, Tone};
use serde_json::Value as JsonValue;

/// Id of the date column, also the default sort column.
pub const CREATION_DATE: &str = "creationDate";

/// Tooltip of the close action.
pub const CLOSE_TITLE: &str = "cancel my application";

/// Icon shown for a known application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateIcon {
    pub name: &'static str,
    pub glyph: &'static str,
    pub tone: Tone,
}

/// Maps an application state to its icon. Unknown states have none.
#[must_use]
pub fn state_icon(state: &str) -> Option<StateIcon> {
    let (name, glyph) = match state {
        "submitted" => ("hourglass", "⧗"),
        "approved" => ("ok-circle", "✔"),
        "rejected" | "closed" | "revoked" => ("remove-circle", "⊘"),
        _ => return None,
    };
    let tone = match state {
        "submitted" => Tone::Info,
        "approved" => Tone::Success,
        _ => Tone::Muted,
    };
    Some(StateIcon { name, glyph, tone })
}

fn render_state(row: &Row) -> CellText {
    let state = row.text("state");
    state_icon(&state).map_or_else(
        || CellText::plain(state.clone()),
        |icon| CellText::new(icon.glyph, icon.tone),
    )
}

fn render_close(_row: &Row) -> CellText {
    CellText::new("✖", Tone::Danger)
}

/// Column set of the applications table. The actions column is only present
/// when the user may act on their applications.
#[must_use]
pub fn columns(actions_allowed: bool) -> Vec<Column> {
    let mut columns = vec![
        Column::new("ext_id", "Id").width(20),
        Column::new("dataset", "Dataset")
            .width(60)
            .kind(ColumnKind::Link {
                href: "entity_url".to_string(),
            }),
        Column::new("state", "State")
            .width(5)
            .kind(ColumnKind::Icon)
            .not_sortable()
            .not_filterable()
            .renderer(render_state),
        Column::new(CREATION_DATE, "Created on")
            .width(15)
            .kind(ColumnKind::Date)
            .not_filterable(),
    ];

    if actions_allowed {
        columns.push(
            Column::new("actions", "Actions")
                .kind(ColumnKind::Action)
                .not_sortable()
                .not_filterable()
                .renderer(render_close),
        );
    }
    columns
}

#[must_use]
pub fn options() -> TableOptions {
    TableOptions {
        search: true,
        pagination: true,
        sort: true,
        ..TableOptions::default()
    }
    .with_default_sort(CREATION_DATE, "desc")
}

/// Decodes application records, deriving `creationDate` from
/// `creation_date_string`.
///
/// # Errors
///
/// Returns [`crate::CatalogError::Parse`] when the payload holds no record list.
pub fn rows(json: &JsonValue) -> Result<Vec<Row>> {
    Ok(records(json)?
        .into_iter()
        .enumerate()
        .map(|(id, object)| {
            let mut row = Row::from_json_object(id, object);
            let created = CellValue::date_from_str(&row.text("creation_date_string"));
            row.set(CREATION_DATE, created);
            row
        })
        .collect())
}

/// Builds the applications table from a payload.
///
/// # Errors
///
/// See [`rows`].
pub fn build_table(json: &JsonValue, actions_allowed: bool) -> Result<TableEngine> {
    Ok(TableEngine::new(
        rows(json)?,
        columns(actions_allowed),
        options(),
    ))
}

/// The close request for the application page. Every outcome reloads the list.
#[must_use]
pub fn close_request(close_url: &str, csrf_token: &str) -> HttpRequest {
    HttpRequest::post_empty(
        close_url,
        csrf_token,
        RequestTag::new(RequestKind::CloseApplication),
    )
}
