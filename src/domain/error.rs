//! Error types for the catalog plugin.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! The two variants the catalog back end can produce are [`CatalogError::Network`]
//! (the request never completed) and [`CatalogError::Api`] (a non-2xx response,
//! optionally carrying a server-provided message). The remaining variants cover
//! local concerns: decoding, theme files and paging.

use thiserror::Error;

/// The main error type for catalog plugin operations.
///
/// # Examples
///
/// ```
/// use zcatalog::CatalogError;
///
/// let err = CatalogError::Api { status: 403, message: Some("forbidden".to_string()) };
/// assert_eq!(err.user_message(), "forbidden");
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be delivered or no response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    ///
    /// `message` is the `message` field of the JSON error body when present,
    /// otherwise the lower-cased reason phrase of the status.
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// A response payload could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A page size outside the supported set was requested.
    #[error("Unsupported page size: {0}")]
    InvalidPageSize(usize),
}

impl CatalogError {
    /// Returns the text shown to the user for this error.
    ///
    /// API errors show the server message (or the status reason when the body
    /// had none); every other variant falls back to its `Display` output.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { status, message } => message
                .clone()
                .unwrap_or_else(|| reason_phrase(*status).to_lowercase()),
            other => other.to_string(),
        }
    }
}

/// Canonical reason phrase for the status codes the catalog back end returns.
#[must_use]
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unknown Error",
    }
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
