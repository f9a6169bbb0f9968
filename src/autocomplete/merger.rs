//! Merging of term and entity-title suggestions into one navigable list.
//!
//! The merger tracks the search input, the entity titles fetched once at start
//! up, and the latest term suggestions fetched for the input. The displayed
//! list is the capped terms followed by the capped matching entity titles; the
//! `active` index walks over that concatenation.
//!
//! Term fetches are issued on every keystroke and may complete out of order.
//! Each fetch carries an increasing sequence number and a response older than
//! the newest one already applied is dropped.

use super::sources::{term_query, EntityTitle};
use crate::domain::Result;

/// Default number of suggestions per group.
pub const DEFAULT_SUGGESTION_CAP: usize = 3;

/// Header of the term group.
pub const KEYWORDS_HEADER: &str = "Keywords";

/// Lifecycle of the autocomplete panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutocompletePhase {
    /// Empty input.
    Idle,
    /// Input changed, waiting for suggestions.
    Typing,
    SuggestionsShown,
    ItemSelected,
}

/// One entry of the merged suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionItem {
    Term { text: String },
    Entity { title: String, id: String },
}

impl SuggestionItem {
    /// Text shown in the dropdown.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Term { text } => text,
            Self::Entity { title, .. } => title,
        }
    }
}

/// What the host should do after an item is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutocompleteOutcome {
    /// Open the entity page.
    Navigate { url: String },
    /// Submit the search form with `query`.
    Submit { query: String },
}

/// A term fetch the host should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRequest {
    pub seq: u64,
    /// Normalised query the suggester is keyed by.
    pub query: String,
}

/// Per-group suggestion caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionCaps {
    pub terms: usize,
    pub entity_titles: usize,
}

impl SuggestionCaps {
    /// Resolves the configured caps.
    ///
    /// When neither cap is set (or both are zero) each group gets
    /// [`DEFAULT_SUGGESTION_CAP`]. When only one is set, the other group is
    /// disabled.
    #[must_use]
    pub fn resolve(total_entity_titles: Option<usize>, total_terms: Option<usize>) -> Self {
        let entity_titles = total_entity_titles.unwrap_or(0);
        let terms = total_terms.unwrap_or(0);
        if entity_titles > 0 || terms > 0 {
            Self { terms, entity_titles }
        } else {
            Self {
                terms: DEFAULT_SUGGESTION_CAP,
                entity_titles: DEFAULT_SUGGESTION_CAP,
            }
        }
    }
}

impl Default for SuggestionCaps {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

/// Autocomplete state for the search input.
#[derive(Debug, Clone)]
pub struct AutocompleteMerger {
    entity_name: String,
    entity_link_pattern: String,
    caps: SuggestionCaps,
    text: String,
    phase: AutocompletePhase,
    active: usize,
    entity_titles: Vec<EntityTitle>,
    filtered: Vec<EntityTitle>,
    terms: Vec<String>,
    next_seq: u64,
    applied_seq: u64,
}

impl AutocompleteMerger {
    #[must_use]
    pub fn new(
        entity_name: impl Into<String>,
        entity_link_pattern: impl Into<String>,
        caps: SuggestionCaps,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            entity_link_pattern: entity_link_pattern.into(),
            caps,
            text: String::new(),
            phase: AutocompletePhase::Idle,
            active: 0,
            entity_titles: Vec::new(),
            filtered: Vec::new(),
            terms: Vec::new(),
            next_seq: 1,
            applied_seq: 0,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn phase(&self) -> AutocompletePhase {
        self.phase
    }

    #[must_use]
    pub const fn active(&self) -> usize {
        self.active
    }

    #[must_use]
    pub const fn caps(&self) -> SuggestionCaps {
        self.caps
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Sets the input text without fetching suggestions or opening the panel.
    pub fn prefill(&mut self, text: &str) {
        self.text = text.to_string();
        self.filtered = self.filter_titles(text);
    }

    /// Installs the entity-title list fetched at start up.
    pub fn set_entity_titles(&mut self, titles: Vec<EntityTitle>) {
        tracing::debug!(count = titles.len(), "entity titles loaded");
        self.entity_titles = titles;
        self.filtered = self.filter_titles(&self.text);
        self.settle();
    }

    /// Replaces the input text.
    ///
    /// Resets the active index and returns the term fetch to issue, if any.
    pub fn input_changed(&mut self, text: &str) -> Option<TermRequest> {
        self.text = text.to_string();
        self.active = 0;
        self.filtered = self.filter_titles(text);

        if text.is_empty() {
            self.phase = AutocompletePhase::Idle;
            self.terms.clear();
            return None;
        }

        self.phase = AutocompletePhase::Typing;

        let query = term_query(text);
        if query.is_empty() || self.caps.terms == 0 {
            self.settle();
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::debug!(seq, query = %query, "requesting term suggestions");
        Some(TermRequest { seq, query })
    }

    /// Applies the outcome of term fetch `seq` issued for `query`.
    ///
    /// Failures are logged and treated as an empty result. Returns `false` when
    /// the response was stale and dropped.
    pub fn receive_terms(&mut self, seq: u64, query: &str, result: Result<Vec<String>>) -> bool {
        if seq < self.applied_seq {
            tracing::debug!(seq, applied = self.applied_seq, "dropping stale term suggestions");
            return false;
        }
        if self.phase == AutocompletePhase::Idle {
            tracing::debug!(seq, "term suggestions arrived after input was cleared");
            return false;
        }
        self.applied_seq = seq;

        let terms = match result {
            Ok(terms) => terms,
            Err(e) => {
                tracing::warn!(seq, error = %e, "term suggestion fetch failed");
                Vec::new()
            }
        };

        let matching_titles: Vec<String> = self
            .filter_titles(query)
            .into_iter()
            .map(|t| t.title.to_lowercase())
            .collect();

        self.terms = terms
            .into_iter()
            .filter(|term| !matching_titles.contains(&term.to_lowercase()))
            .collect();

        let len = self.merged().len();
        if len > 0 {
            self.active = self.active.min(len - 1);
        }
        self.settle();
        true
    }

    /// Terms shown in the panel, capped.
    #[must_use]
    pub fn term_group(&self) -> &[String] {
        &self.terms[..self.terms.len().min(self.caps.terms)]
    }

    /// Entity titles shown in the panel, capped.
    #[must_use]
    pub fn entity_group(&self) -> &[EntityTitle] {
        &self.filtered[..self.filtered.len().min(self.caps.entity_titles)]
    }

    /// Terms then entity titles, as navigated by the keyboard.
    #[must_use]
    pub fn merged(&self) -> Vec<SuggestionItem> {
        self.term_group()
            .iter()
            .map(|text| SuggestionItem::Term { text: text.clone() })
            .chain(self.entity_group().iter().map(|e| SuggestionItem::Entity {
                title: e.title.clone(),
                id: e.id.clone(),
            }))
            .collect()
    }

    /// Header of the entity group, e.g. `"Datasets"`.
    #[must_use]
    pub fn entity_header(&self) -> String {
        format!("{}s", self.entity_name)
    }

    /// A divider separates the groups only when both are non-empty.
    #[must_use]
    pub fn show_divider(&self) -> bool {
        !self.term_group().is_empty() && !self.entity_group().is_empty()
    }

    /// Whether the dropdown is displayed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(
            self.phase,
            AutocompletePhase::Typing | AutocompletePhase::SuggestionsShown
        ) && !self.text.is_empty()
            && !self.merged().is_empty()
    }

    /// Advances the active index, wrapping to the first item.
    pub fn key_down(&mut self) {
        let len = self.merged().len();
        if len == 0 {
            return;
        }
        self.active = if self.active + 1 >= len { 0 } else { self.active + 1 };
    }

    /// Moves the active index up, stopping at the first item.
    pub fn key_up(&mut self) {
        if self.active != 0 {
            self.active -= 1;
        }
    }

    /// Picks the active item. Does nothing when the list is empty.
    pub fn enter(&mut self) -> Option<AutocompleteOutcome> {
        self.select(self.active)
    }

    /// Picks the item at `index`, as a pointer selection would.
    pub fn select(&mut self, index: usize) -> Option<AutocompleteOutcome> {
        let item = self.merged().into_iter().nth(index)?;
        self.active = index;
        self.phase = AutocompletePhase::ItemSelected;

        let outcome = match item {
            SuggestionItem::Entity { title, id } => {
                self.text = title;
                AutocompleteOutcome::Navigate {
                    url: format!("{}{id}", self.entity_link_pattern),
                }
            }
            SuggestionItem::Term { text } => {
                self.text.clone_from(&text);
                AutocompleteOutcome::Submit { query: text }
            }
        };
        tracing::debug!(index, outcome = ?outcome, "suggestion selected");
        Some(outcome)
    }

    fn filter_titles(&self, input: &str) -> Vec<EntityTitle> {
        let needle = input.to_lowercase();
        self.entity_titles
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    fn settle(&mut self) {
        if matches!(
            self.phase,
            AutocompletePhase::Typing | AutocompletePhase::SuggestionsShown
        ) {
            self.phase = if self.merged().is_empty() {
                AutocompletePhase::Typing
            } else {
                AutocompletePhase::SuggestionsShown
            };
        }
    }
}
