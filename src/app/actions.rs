//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or HTTP responses.
//! Actions bridge pure state transformations and effectful operations like
//! issuing web requests or opening a page in the browser.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The plugin runtime executes
//! these actions in sequence.
//!
//! # Example
//!
//! ```rust
//! use zcatalog::app::Action;
//! use zcatalog::catalog::api::{HttpRequest, RequestKind, RequestTag};
//!
//! let actions = vec![
//!     Action::WebRequest(HttpRequest::get("/api/entities", RequestTag::new(RequestKind::EntityTitles))),
//!     Action::OpenUrl("https://catalog.example/e/dataset/1".to_string()),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::catalog::api::HttpRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Performs an HTTP request. The response comes back as
    /// [`Event::HttpResponse`](crate::app::Event::HttpResponse) carrying the
    /// request's tag.
    WebRequest(HttpRequest),

    /// Opens a URL in the user's browser.
    OpenUrl(String),
}
