//! HTTP request descriptors and response decoding for the catalog back end.
//!
//! The library never performs I/O. It describes requests as [`HttpRequest`]
//! values that the host executes, and the host hands the raw status and body
//! back together with the [`RequestTag`] it carried. The tag travels through the
//! host's request context as a flat string map.

use crate::domain::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Context key under which the serialized [`RequestTag`] is stored.
pub const CONTEXT_KEY: &str = "zcatalog_request";

/// Header carrying the CSRF token on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// What a request was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestKind {
    EntityTitles,
    Terms { query: String },
    Applications,
    Contacts,
    Attachments,
    DownloadLink,
    CloseApplication,
}

/// Identifies the response of a request when it comes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTag {
    #[serde(flatten)]
    pub kind: RequestKind,
    #[serde(default)]
    pub seq: u64,
}

impl RequestTag {
    #[must_use]
    pub const fn new(kind: RequestKind) -> Self {
        Self { kind, seq: 0 }
    }

    #[must_use]
    pub const fn with_seq(kind: RequestKind, seq: u64) -> Self {
        Self { kind, seq }
    }

    /// Serializes the tag into a host request context.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if serialization fails.
    pub fn to_context(&self) -> Result<BTreeMap<String, String>> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_KEY.to_string(), serde_json::to_string(self)?);
        Ok(context)
    }

    /// Reads the tag back from a host request context.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] when the context carries no tag, or
    /// [`CatalogError::Json`] when the tag is malformed.
    pub fn from_context(context: &BTreeMap<String, String>) -> Result<Self> {
        let raw = context
            .get(CONTEXT_KEY)
            .ok_or_else(|| CatalogError::Parse("request context has no tag".to_string()))?;
        Ok(serde_json::from_str(raw)?)
    }
}

/// A request for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub tag: RequestTag,
}

impl HttpRequest {
    #[must_use]
    pub fn get(url: impl Into<String>, tag: RequestTag) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: BTreeMap::new(),
            body: Vec::new(),
            tag,
        }
    }

    /// A body-less POST carrying the CSRF token, as used for page actions.
    #[must_use]
    pub fn post_empty(url: impl Into<String>, csrf_token: &str, tag: RequestTag) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: BTreeMap::new(),
            body: Vec::new(),
            tag,
        }
        .header(CSRF_HEADER, csrf_token)
    }

    /// A JSON POST with `Content-Type: application/json` and the CSRF token.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if `payload` cannot be serialized.
    pub fn post_json<T: Serialize>(
        url: impl Into<String>,
        payload: &T,
        csrf_token: &str,
        tag: RequestTag,
    ) -> Result<Self> {
        Ok(Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: BTreeMap::new(),
            body: serde_json::to_vec(payload)?,
            tag,
        }
        .header("Content-Type", "application/json")
        .header(CSRF_HEADER, csrf_token))
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Prefixes relative URLs with `base_url`.
    #[must_use]
    pub fn resolved(mut self, base_url: Option<&str>) -> Self {
        self.url = resolve_url(base_url, &self.url);
        self
    }
}

fn is_absolute(url: &str) -> bool {
    url.contains("://") || url.starts_with("mailto:")
}

/// Joins `url` onto `base_url` unless it is already absolute.
#[must_use]
pub fn resolve_url(base_url: Option<&str>, url: &str) -> String {
    match base_url {
        Some(base) if !is_absolute(url) => {
            let base = base.trim_end_matches('/');
            if url.starts_with('/') {
                format!("{base}{url}")
            } else {
                format!("{base}/{url}")
            }
        }
        _ => url.to_string(),
    }
}

/// Turns a raw response into its JSON body.
///
/// A status of zero means the host could not complete the request. Non-2xx
/// statuses become [`CatalogError::Api`] with the body's `message` field when
/// present. An empty 2xx body decodes to `null`.
///
/// # Errors
///
/// Returns [`CatalogError::Network`], [`CatalogError::Api`] or
/// [`CatalogError::Json`] as described above.
pub fn handle_response(status: u16, body: &[u8]) -> Result<JsonValue> {
    if status == 0 {
        return Err(CatalogError::Network(
            String::from_utf8_lossy(body).trim().to_string(),
        ));
    }

    let blank = body.iter().all(u8::is_ascii_whitespace);

    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<JsonValue>(body)
            .ok()
            .and_then(|j| j.get("message").and_then(JsonValue::as_str).map(String::from));
        tracing::debug!(status, message = ?message, "catalog request failed");
        return Err(CatalogError::Api { status, message });
    }

    if blank {
        return Ok(JsonValue::Null);
    }
    Ok(serde_json::from_slice(body)?)
}
