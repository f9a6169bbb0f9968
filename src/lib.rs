//! zcatalog: a Zellij plugin for browsing a data catalog from the terminal.
//!
//! The plugin provides:
//! - Client-side tables with filtering, multi-type sorting, pagination and
//!   expandable detail rows
//! - A search box with merged autocomplete suggestions (entity titles plus
//!   remotely fetched terms)
//! - The applications, contacts and attachments panels of a catalog entity
//! - Access link requests for downloadable entities

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs, plugin.rs)            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog Layer │   │ Autocomplete  │
//! │ (ui/)         │   │ (catalog/)    │   │ (autocomplete)│
//! │ - Rendering   │   │ - Panels      │   │ - Merging     │
//! │ - Theming     │   │ - Access link │   │ - Sources     │
//! │ - Components  │   │ - HTTP plumbing│  │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Table Engine (table/) & Domain Layer (domain/)     │
//! │  - Filter, sort, page windows                       │
//! │  - Cell values, error types                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - JSON log lines in a rotating file                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zcatalog.wasm" {
//!         entity_name "dataset"
//!         titles_link "/api/datasets/titles"
//!         terms_link "/api/terms"
//!         applications_url "/api/applications"
//!         base_url "https://catalog.example"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zcatalog::{handle_event, initialize, Config, Event};
//!
//! let config = Config {
//!     contacts: Some(r#"[{"full_name": "Ada Lovelace", "email": "ada@example.org"}]"#.to_string()),
//!     ..Config::default()
//! };
//!
//! let mut state = initialize(&config);
//! for event in [Event::KeyDown, Event::ToggleExpand] {
//!     let (_should_render, _actions) = handle_event(&mut state, &event)?;
//! }
//! # Ok::<(), zcatalog::CatalogError>(())
//! ```

pub mod app;
pub mod autocomplete;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod table;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{CatalogError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Inline data keys (`applications`, `contacts`) hold JSON text and take
/// precedence over their `_url` counterparts.
#[derive(Debug, Clone)]
pub struct Config {
    /// Entity type shown in the title and used to build entity links.
    /// Default: `"dataset"`
    pub entity_name: String,

    /// Identifier of the entity whose access link can be requested.
    pub entity_id: Option<String>,

    /// URL answering with the entity titles offered as suggestions.
    pub titles_link: Option<String>,

    /// URL answering with terms for the typed query.
    pub terms_link: Option<String>,

    /// Link prefix for entity suggestions; the entity id is appended.
    /// Default: `/e/{entity_name}/`
    pub entity_link_pattern: Option<String>,

    /// Maximum entity suggestions to show.
    pub total_entity_titles: Option<usize>,

    /// Maximum term suggestions to show.
    pub total_terms: Option<usize>,

    pub download_link_api_url: Option<String>,

    /// Token sent as `X-CSRFToken` with every POST.
    pub csrf_token: String,

    pub applications: Option<String>,
    pub applications_url: Option<String>,

    /// Adds the close action column to the applications panel.
    pub actions_allowed: bool,

    /// Endpoint receiving application close requests.
    pub close_url: Option<String>,

    pub contacts: Option<String>,
    pub contacts_url: Option<String>,
    pub attachments_url: Option<String>,

    /// Initial text of the search box.
    pub query: Option<String>,

    /// Page receiving free-text searches. Default: `"/search"`
    pub search_url: String,

    pub search_placeholder: String,

    /// Prefix applied to relative URLs before requesting or opening them.
    pub base_url: Option<String>,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Log filter directive. Options: `trace`, `debug`, `info`, `warn`,
    /// `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entity_name: "dataset".to_string(),
            entity_id: None,
            titles_link: None,
            terms_link: None,
            entity_link_pattern: None,
            total_entity_titles: None,
            total_terms: None,
            download_link_api_url: None,
            csrf_token: String::new(),
            applications: None,
            applications_url: None,
            actions_allowed: false,
            close_url: None,
            contacts: None,
            contacts_url: None,
            attachments_url: None,
            query: None,
            search_url: "/search".to_string(),
            search_placeholder: "enter your query here".to_string(),
            base_url: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - Blank values count as absent
    /// - `total_entity_titles`, `total_terms`: unsigned integers; unparseable
    ///   values are ignored
    /// - `actions_allowed`: `true`, `1` or `yes` (case-insensitive)
    /// - `theme` fills [`Config::theme_name`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zcatalog::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("entity_name".to_string(), "lux".to_string());
    /// map.insert("total_terms".to_string(), "3".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.entity_name, "lux");
    /// assert_eq!(config.total_terms, Some(3));
    /// assert_eq!(config.entity_link(), "/e/lux/");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        let count = |key: &str| {
            let raw = text(key)?;
            raw.parse::<usize>()
                .map_err(|e| tracing::debug!(key, value = %raw, error = %e, "ignoring count"))
                .ok()
        };
        let defaults = Self::default();

        Self {
            entity_name: text("entity_name").unwrap_or(defaults.entity_name),
            entity_id: text("entity_id"),
            titles_link: text("titles_link"),
            terms_link: text("terms_link"),
            entity_link_pattern: text("entity_link_pattern"),
            total_entity_titles: count("total_entity_titles"),
            total_terms: count("total_terms"),
            download_link_api_url: text("download_link_api_url"),
            csrf_token: text("csrf_token").unwrap_or_default(),
            applications: text("applications"),
            applications_url: text("applications_url"),
            actions_allowed: text("actions_allowed").is_some_and(|v| {
                matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
            }),
            close_url: text("close_url"),
            contacts: text("contacts"),
            contacts_url: text("contacts_url"),
            attachments_url: text("attachments_url"),
            query: text("query"),
            search_url: text("search_url").unwrap_or(defaults.search_url),
            search_placeholder: text("search_placeholder").unwrap_or(defaults.search_placeholder),
            base_url: text("base_url"),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Link prefix for entity suggestions.
    #[must_use]
    pub fn entity_link(&self) -> String {
        self.entity_link_pattern
            .clone()
            .unwrap_or_else(|| format!("/e/{}/", self.entity_name))
    }
}

/// Initializes the plugin with configuration.
///
/// Creates a new `AppState` with the loaded theme (from file, name, or
/// default) and one panel per configured data source. Remote panels start in
/// their loading state; [`AppState::startup_requests`] yields the requests
/// that fill them.
///
/// # Example
///
/// ```rust
/// use zcatalog::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.panels.is_empty());
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(entity = %config.entity_name, "initializing zcatalog plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn from_zellij_falls_back_to_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.entity_name, "dataset");
        assert_eq!(config.search_url, "/search");
        assert_eq!(config.entity_link(), "/e/dataset/");
        assert!(!config.actions_allowed);
        assert!(config.csrf_token.is_empty());
    }

    #[test]
    fn from_zellij_parses_typed_values() {
        let config = Config::from_zellij(&map(&[
            ("entity_link_pattern", "/e/lux/"),
            ("total_entity_titles", "4"),
            ("total_terms", "many"),
            ("actions_allowed", "Yes"),
            ("theme", "catppuccin-latte"),
            ("base_url", "  "),
        ]));
        assert_eq!(config.entity_link(), "/e/lux/");
        assert_eq!(config.total_entity_titles, Some(4));
        assert_eq!(config.total_terms, None);
        assert!(config.actions_allowed);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.base_url, None);
    }

    #[test]
    fn initialize_survives_missing_theme_file() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, Theme::default().name);
    }
}
