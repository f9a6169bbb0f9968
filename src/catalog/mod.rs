//! Catalog data components.
//!
//! Each panel wraps a [`TableEngine`] built from one back-end feed:
//!
//! - [`applications`]: the user's access applications, with the close action
//! - [`attachments`]: files attached to an entity
//! - [`contacts`]: people associated with an entity, with expandable details
//!
//! [`download_link`] drives the access-link modal and [`api`] holds the request
//! descriptors and response decoding shared by all of them.

pub mod api;
pub mod applications;
pub mod attachments;
pub mod contacts;
pub mod download_link;

use crate::catalog::api::{HttpRequest, RequestKind, RequestTag};
use crate::domain::{CatalogError, Result, Row};
use crate::table::TableEngine;
use serde_json::{Map, Value as JsonValue};

pub use api::{handle_response, resolve_url, HttpMethod};
pub use download_link::{AccessLink, DownloadLink, DownloadPhase};

/// Extracts the record list of a payload: a bare array or `{"data": [...]}`.
/// Non-object entries are skipped.
pub(crate) fn records(json: &JsonValue) -> Result<Vec<&Map<String, JsonValue>>> {
    let items = json
        .as_array()
        .or_else(|| json.get("data").and_then(JsonValue::as_array))
        .ok_or_else(|| CatalogError::Parse("payload has no record list".to_string()))?;

    Ok(items.iter().filter_map(JsonValue::as_object).collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PanelKind {
    Applications,
    Contacts,
    Attachments,
}

impl PanelKind {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Applications => "Applications",
            Self::Contacts => "Contacts",
            Self::Attachments => "Attachments",
        }
    }

    /// Message shown in place of the table when loading fails.
    #[must_use]
    pub fn failure_message(self) -> String {
        let noun = match self {
            Self::Applications => "applications",
            Self::Contacts => "contacts",
            Self::Attachments => "attached files",
        };
        format!("An error occurred while retrieving the {noun}.")
    }

    #[must_use]
    pub const fn request_kind(self) -> RequestKind {
        match self {
            Self::Applications => RequestKind::Applications,
            Self::Contacts => RequestKind::Contacts,
            Self::Attachments => RequestKind::Attachments,
        }
    }

    /// Label/value lines shown under an expanded row.
    #[must_use]
    pub fn details(self, row: &Row) -> Vec<(&'static str, String)> {
        match self {
            Self::Contacts => contacts::details(row),
            Self::Applications | Self::Attachments => Vec::new(),
        }
    }

    fn build(self, json: &JsonValue, actions_allowed: bool) -> Result<TableEngine> {
        match self {
            Self::Applications => applications::build_table(json, actions_allowed),
            Self::Contacts => contacts::build_table(json),
            Self::Attachments => attachments::build_table(json),
        }
    }

    fn rows(self, json: &JsonValue) -> Result<Vec<Row>> {
        match self {
            Self::Applications => applications::rows(json),
            Self::Contacts => contacts::rows(json),
            Self::Attachments => attachments::rows(json),
        }
    }
}

/// Where a panel's records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// JSON text embedded in the plugin configuration.
    Inline(String),
    /// URL answering with the JSON records.
    Remote(String),
}

#[derive(Debug, Clone)]
pub enum TableContent {
    Loading,
    Ready(TableEngine),
    Failed(String),
}

/// One tab of the plugin: a titled table fed by a [`DataSource`].
#[derive(Debug, Clone)]
pub struct CatalogPanel {
    kind: PanelKind,
    source: DataSource,
    actions_allowed: bool,
    content: TableContent,
}

impl CatalogPanel {
    #[must_use]
    pub const fn new(kind: PanelKind, source: DataSource, actions_allowed: bool) -> Self {
        Self {
            kind,
            source,
            actions_allowed,
            content: TableContent::Loading,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PanelKind {
        self.kind
    }

    #[must_use]
    pub const fn content(&self) -> &TableContent {
        &self.content
    }

    #[must_use]
    pub const fn table(&self) -> Option<&TableEngine> {
        match &self.content {
            TableContent::Ready(table) => Some(table),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut TableEngine> {
        match &mut self.content {
            TableContent::Ready(table) => Some(table),
            _ => None,
        }
    }

    /// Loads (or reloads) the panel.
    ///
    /// Inline data is decoded immediately. Remote data yields the request to
    /// issue; a table already on screen stays visible until the answer arrives.
    pub fn load(&mut self) -> Option<HttpRequest> {
        match &self.source {
            DataSource::Inline(text) => {
                let parsed = serde_json::from_str::<JsonValue>(text).map_err(CatalogError::from);
                self.apply(parsed);
                None
            }
            DataSource::Remote(url) => {
                if !matches!(self.content, TableContent::Ready(_)) {
                    self.content = TableContent::Loading;
                }
                Some(HttpRequest::get(
                    url.clone(),
                    RequestTag::new(self.kind.request_kind()),
                ))
            }
        }
    }

    /// Applies a decoded payload.
    ///
    /// A table already on screen keeps its filter, sort and page size and only
    /// has its rows replaced.
    pub fn apply(&mut self, payload: Result<JsonValue>) {
        let _span = tracing::debug_span!("apply_payload", panel = self.kind.title()).entered();

        let outcome = payload.and_then(|json| match &mut self.content {
            TableContent::Ready(table) => self.kind.rows(&json).map(|rows| {
                table.replace_rows(rows);
                None
            }),
            _ => self.kind.build(&json, self.actions_allowed).map(Some),
        });

        match outcome {
            Ok(Some(table)) => {
                tracing::debug!(rows = table.rows().len(), "panel loaded");
                self.content = TableContent::Ready(table);
            }
            Ok(None) => tracing::debug!("panel rows replaced"),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load panel");
                self.content = TableContent::Failed(self.kind.failure_message());
            }
        }
    }
}
