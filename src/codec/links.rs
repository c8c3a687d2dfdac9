//! Source link extraction.
//!
//! Links are collected in three passes, in priority order: citation markers (`[[1]](url)`),
//! markdown links (`[label](url)`) and finally bare `http(s)://` URLs that are not part of a
//! markdown link. Every candidate has trailing punctuation removed and must parse as an absolute
//! `http`/`https` URL with a host.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use url::Url;

use crate::properties::SourceList;

static CITATION_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[\d+\]\]\((https?://[^\s)]+)\)").expect("citation regex is valid")
});

static MARKDOWN_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\[\]]*\]\((https?://[^\s)]+)\)").expect("markdown link regex is valid")
});

static BARE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s<>"'`()\[\]{}|\\^]+"#).expect("bare url regex is valid")
});

const TRAILING_PUNCTUATION: &[char] = &[')', ',', '.', ';', ':', '!', '?'];

/// Removes any run of `),.;:!?` from the end of `url`.
pub fn trim_url_punctuation(url: &str) -> &str {
    url.trim_end_matches(TRAILING_PUNCTUATION)
}

fn is_web_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(e) => {
            tracing::trace!("Discarding malformed link {candidate:?}: {e}");
            false
        }
    }
}

fn push_candidate(sources: &mut SourceList, raw: &str) {
    let trimmed = trim_url_punctuation(raw);
    if is_web_url(trimmed) {
        sources.push(trimmed);
    }
}

/// Extracts every source URL in `text`, deduplicated and in priority-then-position order.
pub fn extract_sources(text: &str) -> SourceList {
    let mut sources = SourceList::new();
    let mut link_spans: Vec<Range<usize>> = Vec::new();

    for caps in CITATION_LINK.captures_iter(text) {
        if let (Some(whole), Some(url)) = (caps.get(0), caps.get(1)) {
            link_spans.push(whole.range());
            push_candidate(&mut sources, url.as_str());
        }
    }
    for caps in MARKDOWN_LINK.captures_iter(text) {
        if let (Some(whole), Some(url)) = (caps.get(0), caps.get(1)) {
            link_spans.push(whole.range());
            push_candidate(&mut sources, url.as_str());
        }
    }
    for bare in BARE_URL.find_iter(text) {
        if link_spans.iter().any(|span| span.contains(&bare.start())) {
            continue;
        }
        push_candidate(&mut sources, bare.as_str());
    }
    sources
}
