//! Locating the labelled parts of a free-form thought: the `Content:` section, `<Label>: value`
//! pairs, markdown headings and rule lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ThoughtError;

static CONTENT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)content:").expect("content marker regex is valid"));

static MD_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+(\S[^\r\n]*)").expect("heading regex is valid")
});

static RULE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*(?:={3,}|-{3,})[ \t]*$").expect("rule line regex is valid"));

/// Returns the text following the first case-insensitive `Content:` marker, or all of `text` when
/// there is none.
pub fn extract_content_section(text: &str) -> &str {
    match CONTENT_MARKER.find(text) {
        Some(found) => &text[found.end()..],
        None => text,
    }
}

/// Finds the value of one `<label>:` pair. Build once per label and reuse; [extract_label] is
/// the one-shot form.
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    label: String,
    pattern: Regex,
}

impl LabelMatcher {
    pub fn new<S: Into<String>>(label: S) -> Result<Self, ThoughtError> {
        let label = label.into();
        let pattern = Regex::new(&format!(r"{}[ \t]*:([^/\r\n]*)", regex::escape(&label)))?;
        Ok(LabelMatcher { label, pattern })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the trimmed value of `<label>:` up to the next `/` or line break. Whitespace is
    /// allowed between the label and its colon. Empty values count as absent.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|value| value.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// [LabelMatcher::extract] for a label used only once.
pub fn extract_label(text: &str, label: &str) -> Option<String> {
    match LabelMatcher::new(label) {
        Ok(matcher) => matcher.extract(text),
        Err(e) => {
            tracing::warn!("Could not build a matcher for label {label:?}: {e}");
            None
        }
    }
}

/// Returns the text of the first `#` to `######` heading line.
pub fn extract_first_heading(text: &str) -> Option<String> {
    MD_HEADING
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|heading| heading.as_str().trim().to_string())
        .filter(|heading| !heading.is_empty())
}

/// Drops every line consisting only of three or more `=` or `-` characters. Kept lines keep
/// their own terminator, `\n` or `\r\n`.
pub fn strip_rule_lines(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !RULE_LINE.is_match(line.trim_end_matches(['\r', '\n'])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_section() {
        assert_eq!(
            extract_content_section("Agent: search\ncontent: the body\nmore"),
            " the body\nmore"
        );
        assert_eq!(extract_content_section("CONTENT:x"), "x");
        assert_eq!(extract_content_section("no marker"), "no marker");
        assert_eq!(
            extract_content_section("Content: first Content: second"),
            " first Content: second"
        );
    }

    #[test]
    fn test_extract_label() {
        let text = "Rewritten Query: best running shoes / 2024\nOriginal Query : shoes";
        assert_eq!(
            extract_label(text, "Rewritten Query").as_deref(),
            Some("best running shoes")
        );
        assert_eq!(extract_label(text, "Original Query").as_deref(), Some("shoes"));
        assert_eq!(extract_label(text, "Missing Query"), None);
        assert_eq!(extract_label("Original Query:   \nnext", "Original Query"), None);
    }

    #[test]
    fn test_extract_label_escapes_metacharacters() {
        assert_eq!(
            extract_label("Step (1): gather", "Step (1)").as_deref(),
            Some("gather")
        );
    }

    #[test]
    fn test_label_matcher_reused_across_texts() {
        let matcher = LabelMatcher::new("Original Query").unwrap();
        assert_eq!(matcher.label(), "Original Query");
        assert_eq!(matcher.extract("Original Query: a").as_deref(), Some("a"));
        assert_eq!(matcher.extract("Original Query:b / c").as_deref(), Some("b"));
        assert_eq!(matcher.extract("Rewritten Query: d"), None);
    }

    #[test]
    fn test_oversized_label_is_a_config_error() {
        let label = "Query ".repeat(500_000);
        assert!(matches!(
            LabelMatcher::new(label.as_str()),
            Err(ThoughtError::Config(_))
        ));
        assert_eq!(extract_label("Query: a", &label), None);
    }

    #[test]
    fn test_first_heading() {
        let text = "intro\n#NotAHeading\n## Market Overview ##\n# Later";
        assert_eq!(
            extract_first_heading(text).as_deref(),
            Some("Market Overview ##")
        );
        assert_eq!(extract_first_heading("####### seven"), None);
        assert_eq!(extract_first_heading("plain"), None);
    }

    #[test]
    fn test_strip_rule_lines() {
        let text = "Title\n=====\nbody\n---\n- item\n--- not a rule";
        assert_eq!(strip_rule_lines(text), "Title\nbody\n- item\n--- not a rule");
    }

    #[test]
    fn test_strip_rule_lines_keeps_crlf() {
        assert_eq!(strip_rule_lines("a\r\n---\r\nb"), "a\r\nb");
        assert_eq!(strip_rule_lines("a\r\n===\r\n"), "a\r\n");
        assert_eq!(strip_rule_lines("a\n \tb\r\n"), "a\n \tb\r\n");
    }
}
