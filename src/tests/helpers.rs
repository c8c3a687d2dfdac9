//! Shared test utilities for thought parsing tests

use crate::properties::ThoughtBlock;

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Builds a Python-repr document literal as the chat backend emits it
pub fn repr_document(title: &str, content: &str, source: &str) -> String {
    format!(
        "{{'title': '{}', 'content': '{}', 'source': '{}'}}",
        title.replace('\'', "\\'"),
        content.replace('\'', "\\'"),
        source
    )
}

/// Wraps `(subquery, documents)` pairs into a `Content:` section holding the subquery dict
pub fn subquery_thought(subqueries: &[(&str, Vec<String>)]) -> String {
    let body = subqueries
        .iter()
        .map(|(name, documents)| {
            format!(
                "'{name}': {{'query': '{name} query', 'documents': [{}]}}",
                documents.join(", ")
            )
        })
        .collect::<Vec<String>>()
        .join(", ");
    format!("Agent: retrieval\nContent: {{{body}}}")
}

pub fn titles(blocks: &[ThoughtBlock]) -> Vec<&str> {
    blocks.iter().map(|block| block.title.as_str()).collect()
}
