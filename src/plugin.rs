//! Zellij plugin wrapper.
//!
//! This module is the thin integration layer between the zcatalog library and
//! the Zellij plugin system. It implements the `ZellijPlugin` trait, turns
//! Zellij events into library events and executes the resulting actions.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key`, `WebRequestResult` and
//!    `PermissionRequestResult` events
//! 3. **Permissions granted**: Inline panels load, remote panels and entity
//!    titles are requested
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Request Context
//!
//! Each web request carries its [`RequestTag`] in the Zellij request context,
//! so a `WebRequestResult` can be routed back to the panel or suggestion
//! source that asked for it.
//!
//! # Keybindings
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move the selection
//! - `h`/`Left`, `l`/`Right`: Previous/next page
//! - `Tab`/`Shift+Tab`: Next/previous panel
//! - `1`-`9`: Sort by column
//! - `p`: Cycle page size
//! - `Space`: Expand row
//! - `Enter`: Open the selected row's link
//! - `x`: Close the selected application
//! - `d`: Request the access link, `o`: open it
//! - `/`: Filter the table, `s`: Search the catalog
//! - `r`: Reload, `q`: Close plugin, `Esc`: Dismiss dialog
//!
//! In filter and search mode:
//! - Characters edit the input, `Enter` confirms, `Esc` leaves
//! - `Up`/`Down` walk the suggestions, `Tab` moves focus into them
//!
//! With the suggestions focused:
//! - `j`/`k`: Walk the suggestions, `/`: Back to the input

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zcatalog::catalog::api::{HttpRequest, RequestTag};
use zcatalog::catalog::HttpMethod;
use zcatalog::{handle_event, Action, Config, Event, InputMode, SearchFocus};

/// Plugin state wrapper around the library's `AppState`.
pub struct State {
    app: zcatalog::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zcatalog::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes application state, requests
    /// permissions and subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Catalog API requests
    /// - `RunCommands`: Open links with `xdg-open`
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zcatalog::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(entity = %config.entity_name, "plugin loading started");
        self.app = zcatalog::initialize(&config);
        tracing::debug!(panels = self.app.panels.len(), "app state initialized");

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates Zellij events to library events, delegates to
    /// `handle_event`, and executes resulting actions. Returns `true` if the
    /// UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _span = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match RequestTag::from_context(&context) {
                    Ok(tag) => Event::HttpResponse { tag, status, body },
                    Err(e) => {
                        tracing::warn!(error = %e, "web response without a usable request tag");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                Event::PermissionsResult {
                    granted: matches!(permissions, PermissionStatus::Granted),
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zcatalog::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        let shift_tab =
            key.bare_key == BareKey::Tab && key.has_modifiers(&[KeyModifier::Shift]);

        match self.app.input_mode {
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Tab if shift_tab => Event::PreviousPanel,
                BareKey::Tab => Event::NextPanel,
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Left | BareKey::Char('h') => Event::PreviousPage,
                BareKey::Right | BareKey::Char('l') => Event::NextPage,
                BareKey::Char(c @ '1'..='9') => {
                    Event::SortBy(c.to_digit(10).map_or(0, |d| d as usize - 1))
                }
                BareKey::Char('p') => Event::CyclePageSize,
                BareKey::Char(' ') => Event::ToggleExpand,
                BareKey::Enter => Event::Submit,
                BareKey::Char('x') => Event::CloseApplication,
                BareKey::Char('d') => Event::RequestDownloadLink,
                BareKey::Char('o') => Event::OpenAccessLink,
                BareKey::Char('/') => Event::FilterMode,
                BareKey::Char('s') => Event::SearchMode,
                BareKey::Char('r') => Event::Reload,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Esc => Event::Escape,
                _ => return None,
            }),
            InputMode::Filter | InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Tab => Event::FocusSuggestions,
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Char('/') => Event::FocusSearchInput,
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Escape,
                _ => return None,
            }),
        }
    }

    fn execute_action(action: &Action) {
        tracing::debug!(action = ?action, "executing action");

        match action {
            Action::CloseFocus => hide_self(),
            Action::WebRequest(request) => Self::send_request(request),
            Action::OpenUrl(url) => {
                run_command(&["xdg-open", url.as_str()], BTreeMap::new());
            }
        }
    }

    fn send_request(request: &HttpRequest) {
        let context = match request.tag.to_context() {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, url = %request.url, "failed to encode request tag");
                return;
            }
        };
        let verb = match request.method {
            HttpMethod::Get => HttpVerb::Get,
            HttpMethod::Post => HttpVerb::Post,
        };
        web_request(
            &request.url,
            verb,
            request.headers.clone(),
            request.body.clone(),
            context,
        );
    }
}
