//! Search-input autocomplete.
//!
//! - [`merger`]: the suggestion state machine and keyboard navigation
//! - [`sources`]: decoding of the entity-title and term endpoints

pub mod merger;
pub mod sources;

pub use merger::{
    AutocompleteMerger, AutocompleteOutcome, AutocompletePhase, SuggestionCaps, SuggestionItem,
    TermRequest, KEYWORDS_HEADER,
};
pub use sources::{parse_entity_titles, parse_terms, term_request_url, EntityTitle};
