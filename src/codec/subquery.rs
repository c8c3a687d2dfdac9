//! Flattening of `{'subquery_N': {'documents': [...]}}` retrieval payloads.
//!
//! Extraction runs in two tiers. The whole-object tier loose-parses the first object in the
//! content section and walks its top-level values in key order. When that yields nothing, the
//! per-array tier searches the raw text for every `documents: [` and recovers each document
//! object on its own, so one malformed document does not lose its neighbours. The second tier only
//! runs when the first produced no blocks; their results are never merged.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::{
    codec::{
        labels::extract_content_section,
        loose::try_parse_loose_object,
        scanner::{balanced_objects, slice_balanced_array, slice_balanced_object},
    },
    properties::{SourceList, ThoughtBlock},
};

static DOCUMENTS_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:'documents'|"documents"|\bdocuments\b)\s*:\s*\["#)
        .expect("documents key regex is valid")
});

/// Returns one block per retrieved document found in `raw`, or an empty vector when `raw` holds
/// no recoverable documents.
#[tracing::instrument(skip_all)]
pub fn extract_subquery_documents(raw: &str, untitled: &str) -> Vec<ThoughtBlock> {
    let blocks = documents_from_whole_object(raw, untitled);
    if !blocks.is_empty() {
        tracing::debug!("Recovered {} documents from the subquery object", blocks.len());
        return blocks;
    }
    let blocks = documents_from_arrays(raw, untitled);
    if !blocks.is_empty() {
        tracing::debug!(
            "Recovered {} documents by scanning documents arrays",
            blocks.len()
        );
    }
    blocks
}

/// Whole-object tier.
pub fn documents_from_whole_object(raw: &str, untitled: &str) -> Vec<ThoughtBlock> {
    let section = extract_content_section(raw);
    let Some(start) = section.find('{') else {
        return Vec::new();
    };
    let Some(span) = slice_balanced_object(section, start) else {
        tracing::trace!("Content section object is unbalanced");
        return Vec::new();
    };
    let Some(Value::Object(subqueries)) = try_parse_loose_object(span) else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    for (key, subquery) in subqueries.iter() {
        let Some(documents) = subquery
            .as_object()
            .and_then(|fields| fields.get("documents"))
            .and_then(Value::as_array)
        else {
            tracing::trace!("Subquery {key:?} carries no documents array");
            continue;
        };
        blocks.extend(
            documents
                .iter()
                .filter_map(Value::as_object)
                .map(|document| document_to_block(document, untitled)),
        );
    }
    blocks
}

/// Per-array tier.
pub fn documents_from_arrays(raw: &str, untitled: &str) -> Vec<ThoughtBlock> {
    let mut blocks = Vec::new();
    for found in DOCUMENTS_KEY.find_iter(raw) {
        let array_start = found.end() - 1;
        let Some(array) = slice_balanced_array(raw, array_start) else {
            tracing::trace!("Unterminated documents array at byte {array_start}");
            continue;
        };
        for span in balanced_objects(array) {
            match try_parse_loose_object(span) {
                Some(Value::Object(document)) => blocks.push(document_to_block(&document, untitled)),
                _ => tracing::trace!("Skipping unparseable document object"),
            }
        }
    }
    blocks
}

/// Builds a block from a document's `title`, `content` and `source` fields.
pub fn document_to_block(document: &Map<String, Value>, untitled: &str) -> ThoughtBlock {
    let title = document
        .get("title")
        .and_then(scalar_text)
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| untitled.to_string());
    let content = document
        .get("content")
        .and_then(scalar_text)
        .unwrap_or_default();
    let mut sources = SourceList::new();
    match document.get("source") {
        Some(Value::Array(items)) => sources.extend(items.iter().filter_map(scalar_text)),
        Some(value) => {
            if let Some(source) = scalar_text(value) {
                sources.push(source);
            }
        }
        None => {}
    }
    ThoughtBlock::new(title, content, sources)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNTITLED: &str = "Untitled";

    #[test]
    fn test_whole_object_order() {
        let raw = "Content: {'subquery_2': {'documents': [{'title': 'B', 'content': 'b', 'source': 'u2'}]}, \
                   'subquery_1': {'documents': [{'title': 'A1', 'content': 'a1', 'source': 'u1'}, \
                   {'title': 'A2', 'content': 'a2', 'source': 'u1b'}]}}";
        let titles: Vec<String> = extract_subquery_documents(raw, UNTITLED)
            .into_iter()
            .map(|block| block.title)
            .collect();
        assert_eq!(titles, vec!["B", "A1", "A2"]);
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let raw = "{'subquery_1': {'documents': [{'content': None}, {'title': '', 'source': ['x', 'x', 'y']}]}}";
        let blocks = extract_subquery_documents(raw, UNTITLED);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "Untitled");
        assert_eq!(blocks[0].content, "");
        assert!(blocks[0].sources.is_empty());
        assert_eq!(blocks[1].title, "Untitled");
        assert_eq!(blocks[1].sources, vec!["x", "y"]);
    }

    #[test]
    fn test_array_tier_recovers_from_broken_outer_object() {
        // The outer object never closes, so only the per-array scan can succeed.
        let raw = "Content: {'subquery_1': {'query': 'q', 'documents': [\
                   {'title': 'Good', 'content': 'ok', 'source': 'https://a.com'}, \
                   {'title': 'Bad', 'content': oops}, \
                   {'title': 'Also good', 'content': 'fine', 'source': 'https://b.com'}]}";
        assert!(documents_from_whole_object(raw, UNTITLED).is_empty());
        let blocks = extract_subquery_documents(raw, UNTITLED);
        let titles: Vec<&str> = blocks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Good", "Also good"]);
        assert_eq!(blocks[1].sources, vec!["https://b.com"]);
    }

    #[test]
    fn test_array_tier_handles_top_level_documents_key() {
        let raw = r#"retrieved: {"documents": [{"title": "T", "content": "c", "source": "s"}]}"#;
        let blocks = extract_subquery_documents(raw, UNTITLED);
        assert_eq!(blocks, vec![ThoughtBlock::new("T", "c", SourceList::from_iter(["s"]))]);
    }

    #[test]
    fn test_array_tier_accepts_unquoted_documents_key() {
        let raw = "documents: [{'title': 'A', 'content': 'a', 'source': 'u'}] trailing {";
        let blocks = extract_subquery_documents(raw, UNTITLED);
        assert_eq!(blocks, vec![ThoughtBlock::new("A", "a", SourceList::from_iter(["u"]))]);
        assert_eq!(crate::parse_thoughts(raw), blocks);
    }

    #[test]
    fn test_documents_key_requires_word_boundary() {
        let raw = "{'subdocuments': [{'title': 'x'}], 'document_count': 0}";
        assert!(extract_subquery_documents(raw, UNTITLED).is_empty());
    }

    #[test]
    fn test_no_documents_anywhere() {
        assert!(extract_subquery_documents("{'subquery_1': {'query': 'x'}}", UNTITLED).is_empty());
        assert!(extract_subquery_documents("plain prose", UNTITLED).is_empty());
    }
}
