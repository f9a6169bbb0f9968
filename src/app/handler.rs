//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! permission results and HTTP responses, translating them into state changes
//! and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState`, table and autocomplete methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextPage`, `PreviousPage`, `NextPanel`, `PreviousPanel`
//! - **Table**: `SortBy`, `CyclePageSize`, `ToggleExpand`, `OpenSelected`, `CloseApplication`
//! - **Input**: `Char`, `Backspace`, `Escape`, `Submit`
//! - **Mode Switching**: `FilterMode`, `SearchMode`, `FocusSuggestions`, `FocusSearchInput`
//! - **Download**: `RequestDownloadLink`, `OpenAccessLink`
//! - **System**: `PermissionsResult`, `HttpResponse`, `Reload`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use zcatalog::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(actions.is_empty());
//! # let _ = should_render;
//! # Ok::<(), zcatalog::CatalogError>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::autocomplete::{parse_entity_titles, parse_terms, term_request_url, AutocompleteOutcome};
use crate::catalog::api::{handle_response, resolve_url, HttpRequest, RequestKind, RequestTag};
use crate::catalog::{applications, PanelKind};
use crate::domain::error::Result;
use crate::table::PAGE_SIZE_OPTIONS;

/// Events triggered by user input, the host or HTTP responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the suggestion cursor when the dropdown is open, the table
    /// selection otherwise.
    KeyDown,
    KeyUp,
    NextPage,
    PreviousPage,
    /// Sorts the active table by the column at this index.
    SortBy(usize),
    /// Switches to the next page size option, wrapping around.
    CyclePageSize,
    /// Expands or collapses the selected row.
    ToggleExpand,
    NextPanel,
    PreviousPanel,
    /// Opens the first link of the selected row, or expands it when it has none.
    OpenSelected,
    /// Closes the user's application (applications panel with actions only).
    CloseApplication,
    /// Asks the back end for an access link.
    RequestDownloadLink,
    /// Opens the access link shown in the modal.
    OpenAccessLink,

    /// Starts typing into the active table's filter.
    FilterMode,
    /// Enters search mode with typing focus.
    SearchMode,
    /// Moves keyboard focus from the search input to the suggestions.
    FocusSuggestions,
    /// Moves keyboard focus back to the search input.
    FocusSearchInput,
    Char(char),
    Backspace,
    /// Leaves the current input mode, or closes the topmost overlay.
    Escape,
    /// Confirms the current input (filter, suggestion or search query).
    Submit,

    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Reloads every panel.
    Reload,

    /// Reports whether Zellij granted the requested permissions.
    PermissionsResult {
        granted: bool,
    },

    /// A completed web request.
    HttpResponse {
        /// Tag of the request this answers.
        tag: RequestTag,
        /// HTTP status; zero when the host could not complete the request.
        status: u16,
        body: Vec<u8>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// Whether the UI needs a redraw, and the actions to execute in sequence.
///
/// # Errors
///
/// Returns errors from state mutations that reject their input, such as an
/// invalid page size or a request tag that fails to serialize.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            if state.dropdown_open() {
                if let Some(merger) = state.autocomplete.as_mut() {
                    merger.key_down();
                }
                return Ok((true, vec![]));
            }
            Ok(with_table(state, |table| table.move_selection_down()))
        }
        Event::KeyUp => {
            if state.dropdown_open() {
                if let Some(merger) = state.autocomplete.as_mut() {
                    merger.key_up();
                }
                return Ok((true, vec![]));
            }
            Ok(with_table(state, |table| table.move_selection_up()))
        }
        Event::NextPage => Ok(with_table(state, |table| table.next_page())),
        Event::PreviousPage => Ok(with_table(state, |table| table.previous_page())),
        Event::SortBy(index) => {
            let Some(table) = state.active_table_mut() else {
                return Ok((false, vec![]));
            };
            let Some(column_id) = table.columns().get(*index).map(|c| c.id.clone()) else {
                tracing::debug!(index, "no column to sort by");
                return Ok((false, vec![]));
            };
            table.set_sort(&column_id);
            Ok((true, vec![]))
        }
        Event::CyclePageSize => {
            let Some(table) = state.active_table_mut() else {
                return Ok((false, vec![]));
            };
            if !table.options().pagination {
                return Ok((false, vec![]));
            }
            let current = table.state().page_size;
            let next = PAGE_SIZE_OPTIONS
                .iter()
                .position(|size| *size == current)
                .map_or(PAGE_SIZE_OPTIONS[0], |i| {
                    PAGE_SIZE_OPTIONS[(i + 1) % PAGE_SIZE_OPTIONS.len()]
                });
            table.set_page_size(next)?;
            tracing::debug!(page_size = next, "page size changed");
            Ok((true, vec![]))
        }
        Event::ToggleExpand => Ok(with_table(state, |table| {
            if let Some(id) = table.selected_row().map(|row| row.id) {
                table.toggle_expand(id);
            }
        })),
        Event::NextPanel => {
            state.next_panel();
            Ok((true, vec![]))
        }
        Event::PreviousPanel => {
            state.previous_panel();
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            let Some(table) = state.active_table() else {
                return Ok((false, vec![]));
            };
            let Some(row) = table.selected_row() else {
                return Ok((false, vec![]));
            };

            let target = table.columns().iter().find_map(|c| c.link_target(row));
            if let Some(target) = target {
                let url = resolve_url(state.endpoints.base_url.as_deref(), &target);
                tracing::debug!(url = %url, "opening row link");
                return Ok((false, vec![Action::OpenUrl(url)]));
            }

            if table.options().expandable {
                return handle_event(state, &Event::ToggleExpand);
            }
            Ok((false, vec![]))
        }
        Event::CloseApplication => {
            let allowed = state.active().is_some_and(|p| p.kind() == PanelKind::Applications)
                && state
                    .active_table()
                    .is_some_and(|t| t.columns().iter().any(|c| c.id == "actions"));
            let Some(close_url) = state.endpoints.close_url.as_ref().filter(|_| allowed) else {
                tracing::debug!("closing applications is not available here");
                return Ok((false, vec![]));
            };

            let request = applications::close_request(close_url, &state.endpoints.csrf_token);
            tracing::debug!(url = %request.url, "closing application");
            Ok((false, vec![Action::WebRequest(state.resolve(request))]))
        }
        Event::RequestDownloadLink => {
            let Some(flow) = state.download.as_mut() else {
                return Ok((false, vec![]));
            };
            let Some(request) = flow.request()? else {
                tracing::debug!("access link request already in flight");
                return Ok((false, vec![]));
            };
            Ok((true, vec![Action::WebRequest(state.resolve(request))]))
        }
        Event::OpenAccessLink => {
            let url = state
                .download
                .as_ref()
                .filter(|flow| flow.is_modal_open())
                .and_then(|flow| flow.link())
                .map(|link| link.absolute_url.clone());
            Ok((false, url.map(Action::OpenUrl).into_iter().collect()))
        }

        Event::FilterMode => {
            let searchable = state.active_table().is_some_and(|t| t.options().search);
            if !searchable {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering filter mode");
            state.input_mode = InputMode::Filter;
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            if state.autocomplete.is_none() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusSuggestions => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) || !state.dropdown_open() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::FocusSearchInput => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::Char(c) => edit_input(state, |text| text.push(*c)),
        Event::Backspace => edit_input(state, |text| {
            text.pop();
        }),
        Event::Escape => {
            match state.input_mode {
                InputMode::Filter => {
                    tracing::debug!("leaving filter mode, clearing filter");
                    if let Some(table) = state.active_table_mut() {
                        table.set_filter("");
                    }
                    state.input_mode = InputMode::Normal;
                    return Ok((true, vec![]));
                }
                InputMode::Search(_) => {
                    tracing::debug!("leaving search mode");
                    state.input_mode = InputMode::Normal;
                    return Ok((true, vec![]));
                }
                InputMode::Normal => {}
            }

            if let Some(flow) = state.download.as_mut() {
                if flow.is_modal_open() {
                    flow.close_modal();
                    return Ok((true, vec![]));
                }
                if flow.banner().is_some() {
                    flow.dismiss_alert();
                    return Ok((true, vec![]));
                }
            }
            Ok((false, vec![]))
        }
        Event::Submit => match state.input_mode {
            InputMode::Filter => {
                state.input_mode = InputMode::Normal;
                Ok((true, vec![]))
            }
            InputMode::Search(_) => submit_search(state),
            InputMode::Normal if state.modal_open() => handle_event(state, &Event::OpenAccessLink),
            InputMode::Normal => handle_event(state, &Event::OpenSelected),
        },

        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Reload => {
            let kinds: Vec<PanelKind> = state.panels.iter().map(|p| p.kind()).collect();
            let actions = kinds
                .into_iter()
                .filter_map(|kind| state.reload_panel(kind))
                .map(Action::WebRequest)
                .collect();
            Ok((true, actions))
        }
        Event::PermissionsResult { granted } => {
            state.permissions_granted = *granted;
            let requests = state.startup_requests();
            if *granted {
                tracing::debug!(requests = requests.len(), "permissions granted, loading catalog data");
                Ok((true, requests.into_iter().map(Action::WebRequest).collect()))
            } else {
                tracing::warn!(
                    skipped_requests = requests.len(),
                    "permissions denied, only inline data is shown"
                );
                Ok((true, vec![]))
            }
        }
        Event::HttpResponse { tag, status, body } => {
            handle_http_response(state, tag, *status, body)
        }
    }
}

/// Runs `f` on the active table. Renders only when there is one.
fn with_table(state: &mut AppState, f: impl FnOnce(&mut crate::table::TableEngine)) -> (bool, Vec<Action>) {
    state.active_table_mut().map_or((false, vec![]), |table| {
        f(table);
        (true, vec![])
    })
}

/// Applies a text edit to the focused input: the table filter or the search
/// query. A changed query may produce a term suggestion request.
fn edit_input(state: &mut AppState, edit: impl FnOnce(&mut String)) -> Result<(bool, Vec<Action>)> {
    match state.input_mode {
        InputMode::Filter => {
            let Some(table) = state.active_table_mut() else {
                return Ok((false, vec![]));
            };
            let mut text = table.state().filter_text.clone();
            edit(&mut text);
            table.set_filter(&text);
            Ok((true, vec![]))
        }
        InputMode::Search(SearchFocus::Typing) => {
            let Some(merger) = state.autocomplete.as_mut() else {
                return Ok((false, vec![]));
            };
            let mut text = merger.text().to_string();
            edit(&mut text);
            let request = merger.input_changed(&text);

            let Some((request, terms_link)) = request.zip(state.endpoints.terms_link.as_ref()) else {
                return Ok((true, vec![]));
            };
            let url = term_request_url(terms_link, &request.query);
            let tag = RequestTag::with_seq(
                RequestKind::Terms {
                    query: request.query,
                },
                request.seq,
            );
            let web_request = state.resolve(HttpRequest::get(url, tag));
            Ok((true, vec![Action::WebRequest(web_request)]))
        }
        InputMode::Search(SearchFocus::Navigating) | InputMode::Normal => Ok((false, vec![])),
    }
}

/// Confirms the search input: picks the active suggestion when the dropdown is
/// open, otherwise submits the typed text as a search.
fn submit_search(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let dropdown_open = state.dropdown_open();
    let Some(merger) = state.autocomplete.as_mut() else {
        return Ok((false, vec![]));
    };

    let outcome = if dropdown_open {
        merger.enter()
    } else {
        let query = merger.text().trim().to_string();
        (!query.is_empty()).then_some(AutocompleteOutcome::Submit { query })
    };
    let Some(outcome) = outcome else {
        return Ok((false, vec![]));
    };

    let base_url = state.endpoints.base_url.as_deref();
    let url = match outcome {
        AutocompleteOutcome::Navigate { url } => resolve_url(base_url, &url),
        AutocompleteOutcome::Submit { query } => resolve_url(
            base_url,
            &format!(
                "{}?query={}",
                state.endpoints.search_url,
                urlencoding::encode(&query)
            ),
        ),
    };
    tracing::debug!(url = %url, "search submitted");

    state.input_mode = InputMode::Normal;
    Ok((true, vec![Action::OpenUrl(url)]))
}

const fn panel_kind(kind: &RequestKind) -> Option<PanelKind> {
    match kind {
        RequestKind::Applications => Some(PanelKind::Applications),
        RequestKind::Contacts => Some(PanelKind::Contacts),
        RequestKind::Attachments => Some(PanelKind::Attachments),
        RequestKind::EntityTitles
        | RequestKind::Terms { .. }
        | RequestKind::DownloadLink
        | RequestKind::CloseApplication => None,
    }
}

fn handle_http_response(
    state: &mut AppState,
    tag: &RequestTag,
    status: u16,
    body: &[u8],
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("http_response", kind = ?tag.kind, status).entered();
    let payload = handle_response(status, body);

    match &tag.kind {
        RequestKind::EntityTitles => {
            let Some(merger) = state.autocomplete.as_mut() else {
                return Ok((false, vec![]));
            };
            match payload.and_then(|json| parse_entity_titles(&json)) {
                Ok(titles) => merger.set_entity_titles(titles),
                Err(e) => tracing::warn!(error = %e, "failed to load entity titles"),
            }
            Ok((matches!(state.input_mode, InputMode::Search(_)), vec![]))
        }
        RequestKind::Terms { query } => {
            let Some(merger) = state.autocomplete.as_mut() else {
                return Ok((false, vec![]));
            };
            let result = payload.and_then(|json| parse_terms(&json, merger.entity_name(), query));
            let applied = merger.receive_terms(tag.seq, query, result);
            Ok((applied, vec![]))
        }
        RequestKind::Applications | RequestKind::Contacts | RequestKind::Attachments => {
            let Some(panel) = panel_kind(&tag.kind).and_then(|kind| state.panel_mut(kind)) else {
                return Ok((false, vec![]));
            };
            panel.apply(payload);
            Ok((true, vec![]))
        }
        RequestKind::DownloadLink => {
            let Some(flow) = state.download.as_mut() else {
                return Ok((false, vec![]));
            };
            flow.receive(payload);
            Ok((true, vec![]))
        }
        RequestKind::CloseApplication => {
            match payload {
                Ok(_) => tracing::info!("application closed"),
                Err(e) => tracing::warn!(error = %e, "closing the application failed"),
            }
            let actions = state
                .reload_panel(PanelKind::Applications)
                .map(Action::WebRequest)
                .into_iter()
                .collect();
            Ok((true, actions))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::api::{HttpMethod, CSRF_HEADER};
    use crate::catalog::DownloadPhase;
    use crate::ui::viewmodel::BodyView;
    use crate::{Config, Theme};
    use serde_json::json;

    fn state_with(config: &Config) -> AppState {
        let mut state = AppState::new(config, Theme::default());
        handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        state
    }

    fn search_config() -> Config {
        Config {
            entity_name: "dataset".to_string(),
            titles_link: Some("/api/titles".to_string()),
            terms_link: Some("/api/terms/".to_string()),
            entity_link_pattern: Some("/e/dataset/".to_string()),
            ..Config::default()
        }
    }

    fn respond(state: &mut AppState, action: &Action, status: u16, body: serde_json::Value) -> (bool, Vec<Action>) {
        let Action::WebRequest(request) = action else {
            panic!("expected a web request, got {action:?}");
        };
        let event = Event::HttpResponse {
            tag: request.tag.clone(),
            status,
            body: body.to_string().into_bytes(),
        };
        handle_event(state, &event).unwrap()
    }

    fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
        text.chars()
            .flat_map(|c| handle_event(state, &Event::Char(c)).unwrap().1)
            .collect()
    }

    fn terms_body(query: &str, terms: &[&str]) -> serde_json::Value {
        let suggestions: Vec<_> = terms.iter().map(|t| json!({"term": t})).collect();
        let mut by_query = serde_json::Map::new();
        by_query.insert(
            query.to_string(),
            json!({"numFound": terms.len(), "suggestions": suggestions}),
        );
        json!({"data": {"raw_response": {"suggest": {"suggest_dataset": by_query}}}})
    }

    #[test]
    fn permissions_trigger_startup_requests() {
        let config = Config {
            attachments_url: Some("/api/files".to_string()),
            ..search_config()
        };
        let mut state = AppState::new(&config, Theme::default());
        let (render, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert!(render);
        assert_eq!(actions.len(), 2);
        assert!(state.permissions_granted);
    }

    #[test]
    fn typing_requests_terms_and_stale_responses_are_dropped() {
        let mut state = state_with(&search_config());
        handle_event(&mut state, &Event::SearchMode).unwrap();

        let requests = type_text(&mut state, "lu");
        assert_eq!(requests.len(), 2);
        let Action::WebRequest(second) = &requests[1] else {
            panic!("expected a web request");
        };
        assert_eq!(second.url, "/api/terms/lu");

        let (applied, _) = respond(&mut state, &requests[1], 200, terms_body("lu", &["lung"]));
        assert!(applied);
        let (applied, _) = respond(&mut state, &requests[0], 200, terms_body("l", &["liver"]));
        assert!(!applied);
        assert_eq!(state.autocomplete.as_ref().unwrap().term_group(), ["lung".to_string()]);
    }

    #[test]
    fn multi_word_terms_are_encoded_in_url_but_matched_raw() {
        let mut state = state_with(&search_config());
        handle_event(&mut state, &Event::SearchMode).unwrap();

        let requests = type_text(&mut state, "Lux Embourg#1");
        let Action::WebRequest(last) = requests.last().unwrap() else {
            panic!("expected a web request");
        };
        assert_eq!(last.url, "/api/terms/lux%20embourg%231");
        assert_eq!(
            last.tag.kind,
            RequestKind::Terms {
                query: "lux embourg#1".to_string()
            }
        );

        let (applied, _) = respond(
            &mut state,
            requests.last().unwrap(),
            200,
            terms_body("lux embourg#1", &["luxembourg"]),
        );
        assert!(applied);
        assert_eq!(state.autocomplete.as_ref().unwrap().term_group(), ["luxembourg".to_string()]);
    }

    #[test]
    fn lux_example_navigates_to_entity() {
        let mut state = state_with(&search_config());
        let titles = Action::WebRequest(HttpRequest::get(
            "/api/titles",
            RequestTag::new(RequestKind::EntityTitles),
        ));
        respond(
            &mut state,
            &titles,
            200,
            json!({"data": [
                {"title": "LUX cohort", "id": "d1"},
                {"title": "Luxembourg study", "id": "d2"},
                {"title": "Other", "id": "d3"},
            ]}),
        );

        handle_event(&mut state, &Event::SearchMode).unwrap();
        let requests = type_text(&mut state, "lux");
        respond(
            &mut state,
            requests.last().unwrap(),
            200,
            terms_body("lux", &["luxembourg", "lux cohort"]),
        );
        assert!(state.dropdown_open());

        // Keywords: luxembourg; Datasets: LUX cohort, Luxembourg study.
        handle_event(&mut state, &Event::KeyDown).unwrap();
        handle_event(&mut state, &Event::KeyDown).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(actions, vec![Action::OpenUrl("/e/dataset/d2".to_string())]);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn submit_without_dropdown_searches_typed_text() {
        let config = Config {
            search_url: "/search".to_string(),
            terms_link: None,
            ..search_config()
        };
        let mut state = state_with(&config);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        assert!(type_text(&mut state, "a b").is_empty());

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(actions, vec![Action::OpenUrl("/search?query=a%20b".to_string())]);
    }

    #[test]
    fn filter_mode_edits_table_filter() {
        let applications = json!([
            {"ext_id": "A-1", "dataset": "Cohort", "state": "approved", "creation_date_string": "2021-03-01"},
            {"ext_id": "A-2", "dataset": "Registry", "state": "submitted", "creation_date_string": "2021-04-01"},
        ]);
        let config = Config {
            applications: Some(applications.to_string()),
            ..Config::default()
        };
        let mut state = state_with(&config);

        handle_event(&mut state, &Event::FilterMode).unwrap();
        type_text(&mut state, "regx");
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.active_table().unwrap().filtered_count(), 1);

        handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.active_table().unwrap().state().filter_text, "reg");

        handle_event(&mut state, &Event::FilterMode).unwrap();
        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.active_table().unwrap().filtered_count(), 2);
    }

    #[test]
    fn sort_and_page_size_keys() {
        let rows: Vec<_> = (0..23)
            .map(|i| json!({"ext_id": format!("A-{i:02}"), "dataset": "D", "state": "approved",
                "creation_date_string": "2021-03-01"}))
            .collect();
        let config = Config {
            applications: Some(json!(rows).to_string()),
            ..Config::default()
        };
        let mut state = state_with(&config);

        handle_event(&mut state, &Event::SortBy(0)).unwrap();
        let table = state.active_table().unwrap();
        assert_eq!(table.state().sort_column_id.as_deref(), Some("ext_id"));

        handle_event(&mut state, &Event::NextPage).unwrap();
        handle_event(&mut state, &Event::NextPage).unwrap();
        assert_eq!(state.active_table().unwrap().state().page_index, 2);

        handle_event(&mut state, &Event::CyclePageSize).unwrap();
        let table = state.active_table().unwrap();
        assert_eq!(table.state().page_size, 25);
        assert_eq!(table.state().page_index, 0);
    }

    #[test]
    fn close_application_posts_and_reloads() {
        let config = Config {
            applications_url: Some("/api/applications".to_string()),
            actions_allowed: true,
            close_url: Some("/applications/close".to_string()),
            csrf_token: "tok".to_string(),
            ..Config::default()
        };
        let mut state = AppState::new(&config, Theme::default());
        let (_, load) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        respond(
            &mut state,
            &load[0],
            200,
            json!([{"ext_id": "A-1", "dataset": "Cohort", "state": "submitted",
                "creation_date_string": "2021-03-01"}]),
        );

        let (_, actions) = handle_event(&mut state, &Event::CloseApplication).unwrap();
        let Action::WebRequest(request) = &actions[0] else {
            panic!("expected a web request");
        };
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.headers.get(CSRF_HEADER).map(String::as_str), Some("tok"));

        let (_, reload) = respond(&mut state, &actions[0], 500, json!({}));
        let Action::WebRequest(reload) = &reload[0] else {
            panic!("expected a reload");
        };
        assert_eq!(reload.url, "/api/applications");
        assert_eq!(reload.tag.kind, RequestKind::Applications);
    }

    #[test]
    fn download_link_failure_shows_banner_until_dismissed() {
        let config = Config {
            download_link_api_url: Some("/api/access-link".to_string()),
            entity_id: Some("42".to_string()),
            ..Config::default()
        };
        let mut state = state_with(&config);

        let (_, actions) = handle_event(&mut state, &Event::RequestDownloadLink).unwrap();
        assert_eq!(actions.len(), 1);
        let (_, again) = handle_event(&mut state, &Event::RequestDownloadLink).unwrap();
        assert!(again.is_empty());

        respond(&mut state, &actions[0], 403, json!({"message": "forbidden"}));
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.alert.is_some());
        assert!(vm.modal.is_none());

        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(state.compute_viewmodel(24, 80).alert.is_none());
    }

    #[test]
    fn download_link_success_opens_modal() {
        let config = Config {
            download_link_api_url: Some("/api/access-link".to_string()),
            entity_id: Some("42".to_string()),
            ..Config::default()
        };
        let mut state = state_with(&config);
        let (_, actions) = handle_event(&mut state, &Event::RequestDownloadLink).unwrap();
        respond(
            &mut state,
            &actions[0],
            200,
            json!({"data": {"absolute_url": "https://dl.example/x", "page_password": "pw",
                "expiration_date_string": "2024-06-01"}}),
        );
        assert_eq!(state.download.as_ref().unwrap().phase(), DownloadPhase::ModalOpen);

        let (_, open) = handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(open, vec![Action::OpenUrl("https://dl.example/x".to_string())]);

        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(!state.modal_open());
    }

    #[test]
    fn failed_attachments_render_message_and_reload_retries() {
        let config = Config {
            attachments_url: Some("/api/files".to_string()),
            ..Config::default()
        };
        let mut state = AppState::new(&config, Theme::default());
        let (_, load) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        respond(&mut state, &load[0], 0, json!(null));

        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(
            vm.body,
            BodyView::Empty(ref e) if e.message == "An error occurred while retrieving the attached files."
        ));

        let (_, retry) = handle_event(&mut state, &Event::Reload).unwrap();
        assert_eq!(retry.len(), 1);
    }

    #[test]
    fn open_selected_follows_row_link() {
        let config = Config {
            applications: Some(
                json!([{"ext_id": "A-1", "dataset": "Cohort", "entity_url": "/e/dataset/d1",
                    "state": "approved", "creation_date_string": "2021-03-01"}])
                .to_string(),
            ),
            base_url: Some("https://catalog.example".to_string()),
            ..Config::default()
        };
        let mut state = state_with(&config);
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenUrl("https://catalog.example/e/dataset/d1".to_string())]
        );
    }
}
