//! The "Download Data" access link flow.
//!
//! Requesting a link posts `{"entityId": ...}` to the link API. On success a
//! modal shows the link, its password and its expiry; on failure a dismissible
//! banner explains what went wrong. Only one request is in flight at a time.

use crate::catalog::api::{HttpRequest, RequestKind, RequestTag};
use crate::domain::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub const BUTTON_LABEL: &str = "Download Data";
pub const MODAL_TITLE: &str = "Your Access Link";

/// A created (or already existing) access link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessLink {
    pub absolute_url: String,
    #[serde(default)]
    pub page_password: String,
    #[serde(default)]
    pub expiration_date_string: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkPayload<'a> {
    entity_id: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadPhase {
    #[default]
    Idle,
    Loading,
    ModalOpen,
    Failed,
}

/// Text of the failure banner for `error`.
///
/// Error responses show the server's message as is. Anything else (transport
/// failures, unreadable bodies) is wrapped in a generic reload hint.
#[must_use]
pub fn banner_text(error: &CatalogError) -> String {
    let detail = match error {
        CatalogError::Api { .. } => return error.user_message(),
        CatalogError::Network(message) | CatalogError::Parse(message) => message.clone(),
        other => other.to_string(),
    };
    format!("An error occurred, please reload the page ({detail})")
}

#[derive(Debug, Clone)]
pub struct DownloadLink {
    entity_id: String,
    api_url: String,
    csrf_token: String,
    phase: DownloadPhase,
    link: Option<AccessLink>,
    error: Option<String>,
    alert_hidden: bool,
}

impl DownloadLink {
    #[must_use]
    pub fn new(
        entity_id: impl Into<String>,
        api_url: impl Into<String>,
        csrf_token: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            api_url: api_url.into(),
            csrf_token: csrf_token.into(),
            phase: DownloadPhase::Idle,
            link: None,
            error: None,
            alert_hidden: false,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> DownloadPhase {
        self.phase
    }

    #[must_use]
    pub const fn link(&self) -> Option<&AccessLink> {
        self.link.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, DownloadPhase::Loading)
    }

    #[must_use]
    pub const fn is_modal_open(&self) -> bool {
        matches!(self.phase, DownloadPhase::ModalOpen)
    }

    /// Starts a link request. Returns `None` while one is already in flight.
    ///
    /// Any previous error is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the payload cannot be encoded.
    pub fn request(&mut self) -> Result<Option<HttpRequest>> {
        if self.is_loading() {
            return Ok(None);
        }

        let request = HttpRequest::post_json(
            self.api_url.clone(),
            &LinkPayload {
                entity_id: &self.entity_id,
            },
            &self.csrf_token,
            RequestTag::new(RequestKind::DownloadLink),
        )?;

        self.phase = DownloadPhase::Loading;
        self.error = None;
        tracing::debug!(entity_id = %self.entity_id, "requesting download link");
        Ok(Some(request))
    }

    /// Applies the decoded response of a link request.
    ///
    /// The link is read from the body's `data` field.
    pub fn receive(&mut self, response: Result<JsonValue>) {
        if !self.is_loading() {
            tracing::debug!("ignoring download link response while idle");
            return;
        }

        let link = response.and_then(|body| {
            let data = body
                .get("data")
                .cloned()
                .ok_or_else(|| CatalogError::Parse("response has no data".to_string()))?;
            Ok(serde_json::from_value::<AccessLink>(data)?)
        });

        match link {
            Ok(link) => {
                self.link = Some(link);
                self.phase = DownloadPhase::ModalOpen;
            }
            Err(err) => {
                tracing::warn!(error = %err, "download link request failed");
                self.error = Some(banner_text(&err));
                self.alert_hidden = false;
                self.phase = DownloadPhase::Failed;
            }
        }
    }

    /// Closes the modal. The last link is kept.
    pub fn close_modal(&mut self) {
        if self.is_modal_open() {
            self.phase = DownloadPhase::Idle;
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert_hidden = true;
    }

    /// The failure banner, unless dismissed.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        if self.alert_hidden {
            None
        } else {
            self.error.as_deref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::api::{handle_response, CSRF_HEADER};
    use serde_json::json;

    fn flow() -> DownloadLink {
        DownloadLink::new("42", "/api/access-links", "tok")
    }

    #[test]
    fn success_opens_modal_with_link() {
        let mut download = flow();
        let request = download.request().unwrap().unwrap();
        assert_eq!(request.body, br#"{"entityId":"42"}"#.to_vec());
        assert_eq!(request.headers.get(CSRF_HEADER).map(String::as_str), Some("tok"));
        assert!(download.is_loading());

        download.receive(Ok(json!({"data": {
            "absolute_url": "https://dl.example/x",
            "page_password": "secret",
            "expiration_date_string": "2026-12-01"
        }})));

        assert_eq!(download.phase(), DownloadPhase::ModalOpen);
        assert_eq!(download.link().map(|l| l.page_password.as_str()), Some("secret"));

        download.close_modal();
        assert_eq!(download.phase(), DownloadPhase::Idle);
        assert!(download.link().is_some());
    }

    #[test]
    fn no_second_request_while_loading() {
        let mut download = flow();
        assert!(download.request().unwrap().is_some());
        assert!(download.request().unwrap().is_none());
    }

    #[test]
    fn server_message_shown_and_dismissible() {
        let mut download = flow();
        download.request().unwrap();
        download.receive(handle_response(400, br#"{"message": "no data files"}"#));

        assert_eq!(download.phase(), DownloadPhase::Failed);
        assert_eq!(download.banner(), Some("no data files"));
        download.dismiss_alert();
        assert_eq!(download.banner(), None);

        download.request().unwrap();
        download.receive(handle_response(500, b""));
        assert_eq!(download.banner(), Some("internal server error"));
    }

    #[test]
    fn transport_failures_ask_for_reload() {
        let mut download = flow();
        download.request().unwrap();
        download.receive(handle_response(0, b"timed out"));
        assert_eq!(
            download.banner(),
            Some("An error occurred, please reload the page (timed out)")
        );
    }

    #[test]
    fn late_response_while_idle_is_ignored() {
        let mut download = flow();
        download.receive(Ok(json!({"data": {"absolute_url": "x"}})));
        assert_eq!(download.phase(), DownloadPhase::Idle);
        assert!(download.link().is_none());
    }
}
