//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin,
//! along with the view model generation that feeds the renderer. It is the
//! single source of truth for all transient UI state.
//!
//! # State Components
//!
//! - **Panels**: One [`CatalogPanel`] per configured feed (applications,
//!   contacts, attachments), each owning its table once loaded
//! - **Active Panel**: Index of the tab on screen
//! - **Input Mode**: Controls keybinding interpretation and UI layout
//! - **Autocomplete**: Search input state, when suggestion sources are configured
//! - **Download**: Access link flow, when the entity offers one
//!
//! # View Model Computation
//!
//! The `compute_viewmodel` method transforms state into a renderable UI
//! representation, handling row windowing, column widths, filter match
//! highlighting and the overlays (dropdown, banner, modal).
//!
//! # Example
//!
//! ```rust
//! use zcatalog::{AppState, Config, Theme};
//!
//! let config = Config {
//!     contacts: Some(r#"[{"full_name": "Ada", "email": "ada@example.org"}]"#.to_string()),
//!     ..Config::default()
//! };
//! let mut state = AppState::new(&config, Theme::default());
//! assert!(state.startup_requests().is_empty());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.modal.is_none());
//! ```

use super::modes::{InputMode, SearchFocus};
use crate::autocomplete::{AutocompleteMerger, SuggestionCaps, KEYWORDS_HEADER};
use crate::catalog::api::{HttpRequest, RequestKind, RequestTag};
use crate::catalog::download_link::{BUTTON_LABEL, MODAL_TITLE};
use crate::catalog::{applications, CatalogPanel, DataSource, DownloadLink, PanelKind, TableContent};
use crate::table::{normalize_widths, page_window, TableEngine};
use crate::ui::components::{BOTTOM_CHROME_ROWS, SEARCH_BAR_ROWS, TOP_CHROME_ROWS};
use crate::ui::helpers::{column_widths, match_ranges};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyView, CellView, EmptyState, FooterInfo, HeaderCell, HeaderInfo, ModalInfo,
    PaginationInfo, RowView, SearchBarInfo, SuggestionGroup, SuggestionLine, SuggestionPanel,
    TabInfo, TableView, UIViewModel,
};
use crate::Config;
use std::borrow::Cow;

/// Digit keys `1`-`9` sort by the first nine columns.
const MAX_SORT_KEYS: usize = 9;

/// Back-end locations and credentials used by the handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub titles_link: Option<String>,
    pub terms_link: Option<String>,
    /// Target of a submitted search; the query is appended as `?query=`.
    pub search_url: String,
    /// Endpoint closing the user's application.
    pub close_url: Option<String>,
    pub csrf_token: String,
    /// Prefix for relative URLs.
    pub base_url: Option<String>,
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input and HTTP
/// responses. View models are computed on-demand from state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configured panels, in tab order.
    pub panels: Vec<CatalogPanel>,

    /// Index of the panel on screen within `panels`.
    pub active_panel: usize,

    /// Current input handling mode.
    ///
    /// Determines active keybindings and UI layout (search bar visibility,
    /// footer text). Changed by mode switching events.
    pub input_mode: InputMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Title shown in the header bar.
    pub title: String,

    /// Catalog search state; `None` when no suggestion source is configured.
    pub autocomplete: Option<AutocompleteMerger>,

    /// Placeholder of the empty search input.
    pub search_placeholder: String,

    /// Access link flow; `None` unless both the API URL and entity id are set.
    pub download: Option<DownloadLink>,

    pub endpoints: Endpoints,

    /// Whether Zellij granted the web access and command permissions.
    pub permissions_granted: bool,
}

impl AppState {
    /// Creates the application state described by `config`.
    ///
    /// Inline panel data takes precedence over the panel's URL. Nothing is
    /// loaded yet; see [`AppState::startup_requests`].
    #[must_use]
    pub fn new(config: &Config, theme: Theme) -> Self {
        let source = |inline: &Option<String>, url: &Option<String>| {
            inline
                .clone()
                .map(DataSource::Inline)
                .or_else(|| url.clone().map(DataSource::Remote))
        };

        let mut panels = Vec::new();
        if let Some(applications) = source(&config.applications, &config.applications_url) {
            panels.push(CatalogPanel::new(
                PanelKind::Applications,
                applications,
                config.actions_allowed,
            ));
        }
        if let Some(contacts) = source(&config.contacts, &config.contacts_url) {
            panels.push(CatalogPanel::new(PanelKind::Contacts, contacts, false));
        }
        if let Some(url) = &config.attachments_url {
            panels.push(CatalogPanel::new(
                PanelKind::Attachments,
                DataSource::Remote(url.clone()),
                false,
            ));
        }

        let autocomplete = (config.titles_link.is_some() || config.terms_link.is_some()).then(|| {
            let mut merger = AutocompleteMerger::new(
                config.entity_name.clone(),
                config.entity_link(),
                SuggestionCaps::resolve(config.total_entity_titles, config.total_terms),
            );
            if let Some(query) = &config.query {
                merger.prefill(query);
            }
            merger
        });

        let download = match (&config.download_link_api_url, &config.entity_id) {
            (Some(api_url), Some(entity_id)) => Some(DownloadLink::new(
                entity_id.clone(),
                api_url.clone(),
                config.csrf_token.clone(),
            )),
            _ => None,
        };

        tracing::debug!(
            panels = panels.len(),
            autocomplete = autocomplete.is_some(),
            download = download.is_some(),
            "application state created"
        );

        Self {
            panels,
            active_panel: 0,
            input_mode: InputMode::Normal,
            theme,
            title: format!(" Data Catalog · {} ", config.entity_name),
            autocomplete,
            search_placeholder: config.search_placeholder.clone(),
            download,
            endpoints: Endpoints {
                titles_link: config.titles_link.clone(),
                terms_link: config.terms_link.clone(),
                search_url: config.search_url.clone(),
                close_url: config.close_url.clone(),
                csrf_token: config.csrf_token.clone(),
                base_url: config.base_url.clone(),
            },
            permissions_granted: false,
        }
    }

    /// Loads every panel and returns the requests to issue: remote panel
    /// feeds and the entity-title listing.
    pub fn startup_requests(&mut self) -> Vec<HttpRequest> {
        let mut requests: Vec<HttpRequest> =
            self.panels.iter_mut().filter_map(CatalogPanel::load).collect();

        if self.autocomplete.is_some() {
            if let Some(link) = &self.endpoints.titles_link {
                requests.push(HttpRequest::get(
                    link.clone(),
                    RequestTag::new(RequestKind::EntityTitles),
                ));
            }
        }

        requests.into_iter().map(|r| self.resolve(r)).collect()
    }

    /// Reloads the panel of `kind`, returning its request for remote feeds.
    pub fn reload_panel(&mut self, kind: PanelKind) -> Option<HttpRequest> {
        let request = self.panel_mut(kind)?.load()?;
        Some(self.resolve(request))
    }

    /// Applies the configured base URL to a request.
    #[must_use]
    pub fn resolve(&self, request: HttpRequest) -> HttpRequest {
        request.resolved(self.endpoints.base_url.as_deref())
    }

    #[must_use]
    pub fn active(&self) -> Option<&CatalogPanel> {
        self.panels.get(self.active_panel)
    }

    #[must_use]
    pub fn active_table(&self) -> Option<&TableEngine> {
        self.active().and_then(CatalogPanel::table)
    }

    pub fn active_table_mut(&mut self) -> Option<&mut TableEngine> {
        self.panels
            .get_mut(self.active_panel)
            .and_then(CatalogPanel::table_mut)
    }

    pub fn panel_mut(&mut self, kind: PanelKind) -> Option<&mut CatalogPanel> {
        self.panels.iter_mut().find(|p| p.kind() == kind)
    }

    /// Switches to the next tab, wrapping around.
    pub fn next_panel(&mut self) {
        if !self.panels.is_empty() {
            self.active_panel = (self.active_panel + 1) % self.panels.len();
        }
    }

    /// Switches to the previous tab, wrapping around.
    pub fn previous_panel(&mut self) {
        if self.panels.is_empty() {
            return;
        }
        if self.active_panel == 0 {
            self.active_panel = self.panels.len() - 1;
        } else {
            self.active_panel -= 1;
        }
    }

    /// Whether the suggestion dropdown is on screen.
    #[must_use]
    pub fn dropdown_open(&self) -> bool {
        matches!(self.input_mode, InputMode::Search(_))
            && self.autocomplete.as_ref().is_some_and(AutocompleteMerger::is_open)
    }

    #[must_use]
    pub fn modal_open(&self) -> bool {
        self.download.as_ref().is_some_and(DownloadLink::is_modal_open)
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome (header, footer, search)
    /// 2. Center window around selected row (selected row at midpoint)
    /// 3. Adjust window if near the end of the page to maximize visible rows
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let search_bar = self.compute_search_bar();
        let available_rows = Self::calculate_available_rows(rows, search_bar.is_some());

        UIViewModel {
            header: self.compute_header(),
            body: self.compute_body(available_rows, cols),
            search_bar,
            pagination: self.compute_pagination(),
            alert: self
                .download
                .as_ref()
                .and_then(DownloadLink::banner)
                .map(str::to_string),
            modal: self.compute_modal(),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let tabs = self
            .panels
            .iter()
            .enumerate()
            .map(|(index, panel)| {
                let label = panel.table().map_or_else(
                    || panel.kind().title().to_string(),
                    |table| format!("{} ({})", panel.kind().title(), table.rows().len()),
                );
                TabInfo {
                    label,
                    active: index == self.active_panel,
                }
            })
            .collect();

        let download = self.download.as_ref().map(|flow| {
            if flow.is_loading() {
                "Loading...".to_string()
            } else {
                BUTTON_LABEL.to_string()
            }
        });

        HeaderInfo {
            title: self.title.clone(),
            tabs,
            download,
        }
    }

    /// Computes the input box: the table filter while filtering (or while a
    /// filter is applied), the catalog search in search mode.
    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => {
                let merger = self.autocomplete.as_ref()?;
                Some(SearchBarInfo {
                    label: "Search".to_string(),
                    query: merger.text().to_string(),
                    placeholder: self.search_placeholder.clone(),
                    focused: focus == SearchFocus::Typing,
                    suggestions: merger.is_open().then(|| Self::suggestion_panel(merger)),
                })
            }
            InputMode::Filter | InputMode::Normal => {
                let table = self.active_table()?;
                let filter = &table.state().filter_text;
                let focused = self.input_mode == InputMode::Filter;
                (focused || !filter.is_empty()).then(|| SearchBarInfo {
                    label: "Filter".to_string(),
                    query: filter.clone(),
                    placeholder: table.options().search_placeholder.clone(),
                    focused,
                    suggestions: None,
                })
            }
        }
    }

    fn suggestion_panel(merger: &AutocompleteMerger) -> SuggestionPanel {
        let active = merger.active();
        let terms = merger.term_group();
        let mut groups = Vec::new();

        if !terms.is_empty() {
            groups.push(SuggestionGroup {
                header: KEYWORDS_HEADER.to_string(),
                items: terms
                    .iter()
                    .enumerate()
                    .map(|(index, term)| SuggestionLine {
                        label: term.clone(),
                        active: index == active,
                    })
                    .collect(),
            });
        }

        let entities = merger.entity_group();
        if !entities.is_empty() {
            groups.push(SuggestionGroup {
                header: merger.entity_header(),
                items: entities
                    .iter()
                    .enumerate()
                    .map(|(index, entity)| SuggestionLine {
                        label: entity.title.clone(),
                        active: terms.len() + index == active,
                    })
                    .collect(),
            });
        }

        SuggestionPanel { groups }
    }

    fn compute_body(&self, available_rows: usize, cols: usize) -> BodyView {
        let Some(panel) = self.active() else {
            return BodyView::Empty(EmptyState {
                message: "Nothing to show".to_string(),
                subtitle: "No applications, contacts or attachments are configured".to_string(),
            });
        };

        match panel.content() {
            TableContent::Loading => BodyView::Empty(EmptyState {
                message: format!("Loading {}...", panel.kind().title().to_lowercase()),
                subtitle: String::new(),
            }),
            TableContent::Failed(message) => BodyView::Empty(EmptyState {
                message: message.clone(),
                subtitle: "Press 'r' to retry".to_string(),
            }),
            TableContent::Ready(table) if table.visible_rows().is_empty() => {
                let filtered = !table.state().filter_text.is_empty();
                BodyView::Empty(EmptyState {
                    message: if filtered {
                        "No matching entries".to_string()
                    } else {
                        "No entries".to_string()
                    },
                    subtitle: if filtered {
                        "Press '/' to change the filter".to_string()
                    } else {
                        String::new()
                    },
                })
            }
            TableContent::Ready(table) => {
                BodyView::Table(Self::compute_table_view(panel.kind(), table, available_rows, cols))
            }
        }
    }

    fn compute_table_view(
        kind: PanelKind,
        table: &TableEngine,
        available_rows: usize,
        cols: usize,
    ) -> TableView {
        let widths = column_widths(&normalize_widths(table.columns()), cols);
        let sortable = table.options().sort;

        let headers = table
            .columns()
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(index, (column, width))| HeaderCell {
                label: column.header.clone(),
                indicator: table.sort_indicator(column),
                width: *width,
                sort_key: (sortable && column.sortable && index < MAX_SORT_KEYS)
                    .then_some(index + 1),
            })
            .collect();

        let page = table.visible_rows();
        let selected = table.selected_index();

        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(page.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && page.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let filter = &table.state().filter_text;
        let rows = page[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, row)| {
                let cells = table
                    .columns()
                    .iter()
                    .map(|column| {
                        let content = column.render(row);
                        let highlight_ranges = if column.filterable {
                            match_ranges(&content.text, filter)
                        } else {
                            Vec::new()
                        };
                        CellView {
                            is_link: column.link_target(row).is_some(),
                            content,
                            highlight_ranges,
                        }
                    })
                    .collect();

                let details = if table.is_expanded(row.id) {
                    kind.details(row)
                        .into_iter()
                        .map(|(label, value)| (label.to_string(), value))
                        .collect()
                } else {
                    Vec::new()
                };

                RowView {
                    cells,
                    is_selected: visible_start + relative_idx == selected,
                    details,
                }
            })
            .collect();

        TableView { headers, rows }
    }

    fn compute_pagination(&self) -> Option<PaginationInfo> {
        let table = self.active_table()?;
        if !table.options().pagination {
            return None;
        }
        Some(PaginationInfo {
            window: page_window(table.state().page_index, table.page_count()),
            label: table.displayed_rows_label(),
            page_size: table.state().page_size,
        })
    }

    fn compute_modal(&self) -> Option<ModalInfo> {
        let flow = self.download.as_ref().filter(|d| d.is_modal_open())?;
        let link = flow.link()?;
        Some(ModalInfo {
            title: MODAL_TITLE.to_string(),
            url: link.absolute_url.clone(),
            password: link.page_password.clone(),
            valid_until: link.expiration_date_string.clone(),
        })
    }

    /// Computes footer keybindings text based on the current mode and on what
    /// the active panel supports.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Filter => "Esc/Enter: done  Type to filter".to_string(),
            InputMode::Search(SearchFocus::Typing) => {
                "Esc: close  Enter: search  ↑/↓: suggestions  Tab: focus suggestions".to_string()
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "Esc: close  j/k: navigate  Enter: open  /: edit query".to_string()
            }
            InputMode::Normal if self.modal_open() => "o: open link  Esc: close".to_string(),
            InputMode::Normal => self.normal_mode_hints().join("  "),
        };

        FooterInfo { keybindings }
    }

    fn normal_mode_hints(&self) -> Vec<Cow<'static, str>> {
        let mut hints: Vec<Cow<'static, str>> = vec!["j/k: move".into(), "Enter: open".into()];

        if let Some(table) = self.active_table() {
            let options = table.options();
            if options.pagination {
                hints.push("h/l: page".into());
                hints.push("p: page size".into());
            }
            if options.sort {
                hints.push("1-9: sort".into());
            }
            if options.search {
                hints.push("/: filter".into());
            }
            if options.expandable {
                hints.push("Space: expand".into());
            }
            if self.active().is_some_and(|p| p.kind() == PanelKind::Applications)
                && self.endpoints.close_url.is_some()
                && table.columns().iter().any(|c| c.id == "actions")
            {
                hints.push(format!("x: {}", applications::CLOSE_TITLE).into());
            }
        }
        if self.panels.len() > 1 {
            hints.push("Tab: panel".into());
        }
        if self.autocomplete.is_some() {
            hints.push("s: search".into());
        }
        if self.download.is_some() {
            hints.push("d: download".into());
        }
        if self.download.as_ref().and_then(DownloadLink::banner).is_some() {
            hints.push("Esc: dismiss".into());
        }
        hints.push("r: reload".into());
        hints.push("q: quit".into());
        hints
    }

    /// Calculates the rows left for table rows after subtracting UI chrome.
    const fn calculate_available_rows(total_rows: usize, has_search_bar: bool) -> usize {
        let chrome = TOP_CHROME_ROWS + BOTTOM_CHROME_ROWS;
        if has_search_bar {
            total_rows.saturating_sub(chrome + SEARCH_BAR_ROWS)
        } else {
            total_rows.saturating_sub(chrome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::api::HttpMethod;
    use serde_json::json;

    fn contacts_config() -> Config {
        let contacts = json!([
            {"full_name": "Ada Lovelace", "affiliation": "LCSB", "email": "ada@example.org", "roles": "PI"},
            {"full_name": "Alan Turing", "affiliation": "", "email": null, "roles": "Data steward"},
        ]);
        Config {
            contacts: Some(contacts.to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn panels_follow_configuration_order() {
        let config = Config {
            applications_url: Some("/api/applications".to_string()),
            attachments_url: Some("/api/files".to_string()),
            ..contacts_config()
        };
        let state = AppState::new(&config, Theme::default());
        let kinds: Vec<PanelKind> = state.panels.iter().map(CatalogPanel::kind).collect();
        assert_eq!(
            kinds,
            vec![PanelKind::Applications, PanelKind::Contacts, PanelKind::Attachments]
        );
    }

    #[test]
    fn startup_requests_resolve_against_base_url() {
        let config = Config {
            attachments_url: Some("/api/files".to_string()),
            titles_link: Some("/api/titles".to_string()),
            base_url: Some("https://catalog.example".to_string()),
            ..Config::default()
        };
        let mut state = AppState::new(&config, Theme::default());
        let requests = state.startup_requests();

        let urls: Vec<&str> = requests.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://catalog.example/api/files", "https://catalog.example/api/titles"]
        );
        assert!(requests.iter().all(|r| r.method == HttpMethod::Get));
    }

    #[test]
    fn inline_contacts_render_as_table() {
        let mut state = AppState::new(&contacts_config(), Theme::default());
        assert!(state.startup_requests().is_empty());

        let vm = state.compute_viewmodel(30, 120);
        let BodyView::Table(view) = vm.body else {
            panic!("expected a table");
        };
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.headers.len(), 5);
        assert!(view.rows[0].is_selected);
        assert_eq!(vm.header.tabs[0].label, "Contacts (2)");
        assert!(vm.pagination.is_none());
    }

    #[test]
    fn expanded_contact_shows_details() {
        let mut state = AppState::new(&contacts_config(), Theme::default());
        state.startup_requests();
        let table = state.active_table_mut().unwrap();
        let id = table.selected_row().unwrap().id;
        table.toggle_expand(id);

        let vm = state.compute_viewmodel(30, 120);
        let BodyView::Table(view) = vm.body else {
            panic!("expected a table");
        };
        let expanded: Vec<&RowView> = view.rows.iter().filter(|r| !r.details.is_empty()).collect();
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].details[2], ("Phone Number".to_string(), "-".to_string()));
    }

    #[test]
    fn rows_are_windowed_around_selection() {
        let people: Vec<_> = (0..40)
            .map(|i| json!({"full_name": format!("Person {i:02}"), "email": "x@example.org"}))
            .collect();
        let config = Config {
            contacts: Some(json!(people).to_string()),
            ..Config::default()
        };
        let mut state = AppState::new(&config, Theme::default());
        state.startup_requests();
        for _ in 0..30 {
            state.active_table_mut().unwrap().move_selection_down();
        }

        // 20 rows of terminal leave 10 for table rows.
        let vm = state.compute_viewmodel(20, 100);
        let BodyView::Table(view) = vm.body else {
            panic!("expected a table");
        };
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.rows.iter().position(|r| r.is_selected), Some(5));
    }

    #[test]
    fn filter_bar_and_highlights_follow_filter_text() {
        let mut state = AppState::new(&contacts_config(), Theme::default());
        state.startup_requests();
        state.active_table_mut().unwrap().set_filter("ada");

        let vm = state.compute_viewmodel(30, 120);
        let search = vm.search_bar.unwrap();
        assert_eq!(search.query, "ada");
        assert!(!search.focused);

        let BodyView::Table(view) = vm.body else {
            panic!("expected a table");
        };
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].cells[1].highlight_ranges, vec![(0, 3)]);
    }

    #[test]
    fn loading_and_failed_panels_show_messages() {
        let config = Config {
            attachments_url: Some("/api/files".to_string()),
            ..Config::default()
        };
        let mut state = AppState::new(&config, Theme::default());
        state.startup_requests();
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.body, BodyView::Empty(ref e) if e.message == "Loading attachments..."));

        state.panels[0].apply(Ok(json!({"data": []})));
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(
            vm.body,
            BodyView::Empty(ref e) if e.message == "An error occurred while retrieving the attached files."
        ));
    }

    #[test]
    fn panel_navigation_wraps() {
        let config = Config {
            attachments_url: Some("/api/files".to_string()),
            ..contacts_config()
        };
        let mut state = AppState::new(&config, Theme::default());
        state.previous_panel();
        assert_eq!(state.active_panel, 1);
        state.next_panel();
        assert_eq!(state.active_panel, 0);
    }

    #[test]
    fn footer_offers_close_action_only_with_actions_column() {
        let applications = json!([
            {"ext_id": "A-1", "dataset": "Cohort", "state": "submitted",
             "creation_date_string": "2021-03-01"}
        ]);
        let config = Config {
            applications: Some(applications.to_string()),
            actions_allowed: true,
            close_url: Some("/applications/close".to_string()),
            ..Config::default()
        };
        let mut state = AppState::new(&config, Theme::default());
        state.startup_requests();
        let footer = state.compute_viewmodel(24, 120).footer.keybindings;
        assert!(footer.contains("x: cancel my application"));

        let mut state = AppState::new(
            &Config {
                actions_allowed: false,
                ..config
            },
            Theme::default(),
        );
        state.startup_requests();
        let footer = state.compute_viewmodel(24, 120).footer.keybindings;
        assert!(!footer.contains("x: "));
    }
}
