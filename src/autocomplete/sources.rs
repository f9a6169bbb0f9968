//! Decoding of the two suggestion sources.
//!
//! Entity titles come from a listing endpoint returning
//! `{"data": [{"title": ..., "id": ...}, ...]}`. Terms come from the search
//! back end's suggester, nested under the entity name and the query text:
//!
//! ```json
//! {"data": {"raw_response": {"suggest": {"suggest_dataset": {
//!     "lux": {"numFound": 2, "suggestions": [{"term": "lux"}, {"term": "luxembourg"}]}
//! }}}}}
//! ```

use crate::domain::{CatalogError, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// An entity that can be suggested by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTitle {
    pub title: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct TitlesResponse {
    #[serde(default)]
    data: Vec<RawTitle>,
}

#[derive(Debug, Deserialize)]
struct RawTitle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    id: JsonValue,
}

fn id_to_string(id: &JsonValue) -> String {
    match id {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Decodes the entity-title listing. Entries without a title are dropped.
///
/// # Errors
///
/// Returns [`CatalogError::Json`] when the body is not the expected JSON shape.
pub fn parse_entity_titles(json: &JsonValue) -> Result<Vec<EntityTitle>> {
    let response = TitlesResponse::deserialize(json)?;
    Ok(response
        .data
        .into_iter()
        .filter_map(|raw| {
            let id = id_to_string(&raw.id);
            raw.title.map(|title| EntityTitle { title, id })
        })
        .collect())
}

/// Normalises user input into the suggester key: trimmed and lower-cased.
#[must_use]
pub fn term_query(input: &str) -> String {
    input.trim().to_lowercase()
}

/// URL of the term suggestion request for `input`, with the normalised
/// query percent-encoded.
#[must_use]
pub fn term_request_url(terms_link: &str, input: &str) -> String {
    format!("{terms_link}{}", urlencoding::encode(&term_query(input)))
}

/// Decodes the term suggestions for `query` (already normalised).
///
/// A `numFound` of zero yields an empty list.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] when the body lacks the suggester entry for
/// this entity and query.
pub fn parse_terms(json: &JsonValue, entity_name: &str, query: &str) -> Result<Vec<String>> {
    let suggester_key = format!("suggest_{entity_name}");

    let entry = json
        .get("data")
        .and_then(|d| d.get("raw_response"))
        .and_then(|r| r.get("suggest"))
        .and_then(|s| s.get(&suggester_key))
        .and_then(|s| s.get(query))
        .ok_or_else(|| {
            CatalogError::Parse(format!("no {suggester_key} entry for query '{query}'"))
        })?;

    let found = entry.get("numFound").and_then(JsonValue::as_u64).unwrap_or(0);
    if found == 0 {
        tracing::debug!(query, "no suggested terms found");
        return Ok(Vec::new());
    }

    Ok(entry
        .get("suggestions")
        .and_then(JsonValue::as_array)
        .map(|suggestions| {
            suggestions
                .iter()
                .filter_map(|s| s.get("term").and_then(JsonValue::as_str))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entity_titles_skip_null_titles_and_stringify_ids() {
        let body = json!({"data": [
            {"title": "Luxembourg Dataset", "id": 1},
            {"title": null, "id": 2},
            {"title": "Parkinson cohort", "id": "abc"}
        ]});

        let titles = parse_entity_titles(&body).unwrap_or_default();
        assert_eq!(
            titles,
            vec![
                EntityTitle { title: "Luxembourg Dataset".into(), id: "1".into() },
                EntityTitle { title: "Parkinson cohort".into(), id: "abc".into() },
            ]
        );
    }

    #[test]
    fn terms_are_read_under_entity_and_query() {
        let body = json!({"data": {"raw_response": {"suggest": {"suggest_dataset": {
            "lux": {"numFound": 2, "suggestions": [{"term": "lux"}, {"term": "luxembourg"}]}
        }}}}});

        let terms = parse_terms(&body, "dataset", "lux");
        assert_eq!(terms.ok(), Some(vec!["lux".to_string(), "luxembourg".to_string()]));
    }

    #[test]
    fn zero_found_yields_no_terms() {
        let body = json!({"data": {"raw_response": {"suggest": {"suggest_dataset": {
            "zz": {"numFound": 0, "suggestions": []}
        }}}}});
        assert_eq!(parse_terms(&body, "dataset", "zz").ok(), Some(vec![]));
    }

    #[test]
    fn missing_suggester_entry_is_a_parse_error() {
        let body = json!({"data": {}});
        assert!(matches!(
            parse_terms(&body, "dataset", "lux"),
            Err(CatalogError::Parse(_))
        ));
        assert!(matches!(
            parse_entity_titles(&json!({"data": "nope"})),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn request_url_uses_trimmed_lowercase_query() {
        assert_eq!(
            term_request_url("/api/suggest/dataset/", "  LUX "),
            "/api/suggest/dataset/lux"
        );
        assert_eq!(
            term_request_url("/api/suggest/dataset/", " Lux Embourg&x#1 "),
            "/api/suggest/dataset/lux%20embourg%26x%231"
        );
    }
}
