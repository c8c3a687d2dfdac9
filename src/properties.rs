/// [crate::properties] contains the values that flow in and out of the thought parser.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::HashSet,
    fmt::{Display, Formatter},
};

/// One renderable unit of an assistant's thought process.
///
/// Blocks are produced exclusively by [crate::codec::ThoughtParser]. `title` is never empty and
/// `sources` holds no duplicates, in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThoughtBlock {
    pub title: String,
    pub content: String,
    pub sources: Vec<String>,
}

impl ThoughtBlock {
    pub fn new<T: Into<String>, C: Into<String>>(title: T, content: C, sources: SourceList) -> Self {
        ThoughtBlock {
            title: title.into(),
            content: content.into(),
            sources: sources.into_vec(),
        }
    }
}

impl Display for ThoughtBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} sources)", self.title, self.sources.len())
    }
}

/// Insertion-ordered set of source strings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceList {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl SourceList {
    pub fn new() -> Self {
        SourceList::default()
    }

    /// Returns whether the source was new. Empty strings are never stored.
    pub fn push<S: Into<String>>(&mut self, source: S) -> bool {
        let source = source.into();
        if source.is_empty() || self.seen.contains(&source) {
            return false;
        }
        self.seen.insert(source.clone());
        self.ordered.push(source);
        true
    }

    pub fn extend<I, S>(&mut self, sources: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for source in sources {
            self.push(source);
        }
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.ordered.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl<S: Into<String>> FromIterator<S> for SourceList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = SourceList::new();
        list.extend(iter);
        list
    }
}

/// The raw thought payload as handed over by the chat API.
///
/// Anything that is not a string or a sequence of strings normalizes to an empty sequence, and
/// non-string members of a sequence are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThoughtInput {
    Single(String),
    Many(Vec<String>),
}

impl ThoughtInput {
    pub fn empty() -> Self {
        ThoughtInput::Many(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ThoughtInput::Many(items) if items.is_empty())
    }

    /// Builds a sequence from members already reduced to their string form; `None` members (any
    /// non-string value) are dropped one by one.
    pub fn from_members<I: IntoIterator<Item = Option<String>>>(members: I) -> Self {
        ThoughtInput::Many(members.into_iter().flatten().collect())
    }

    pub fn into_thoughts(self) -> Vec<String> {
        match self {
            ThoughtInput::Single(text) => vec![text],
            ThoughtInput::Many(items) => items,
        }
    }
}

impl Default for ThoughtInput {
    fn default() -> Self {
        ThoughtInput::empty()
    }
}

impl From<&str> for ThoughtInput {
    fn from(text: &str) -> Self {
        ThoughtInput::Single(text.to_string())
    }
}

impl From<String> for ThoughtInput {
    fn from(text: String) -> Self {
        ThoughtInput::Single(text)
    }
}

impl From<&String> for ThoughtInput {
    fn from(text: &String) -> Self {
        ThoughtInput::Single(text.clone())
    }
}

impl From<Vec<String>> for ThoughtInput {
    fn from(items: Vec<String>) -> Self {
        ThoughtInput::Many(items)
    }
}

impl From<Vec<&str>> for ThoughtInput {
    fn from(items: Vec<&str>) -> Self {
        ThoughtInput::Many(items.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for ThoughtInput {
    fn from(items: &[&str]) -> Self {
        ThoughtInput::Many(items.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ThoughtInput {
    fn from(items: [&str; N]) -> Self {
        ThoughtInput::Many(items.iter().map(|s| s.to_string()).collect())
    }
}

impl<T: Into<ThoughtInput>> From<Option<T>> for ThoughtInput {
    fn from(maybe: Option<T>) -> Self {
        maybe.map(Into::into).unwrap_or_default()
    }
}

impl From<Value> for ThoughtInput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => ThoughtInput::Single(text),
            Value::Array(items) => {
                ThoughtInput::from_members(items.into_iter().map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                }))
            }
            _ => ThoughtInput::empty(),
        }
    }
}

impl From<&Value> for ThoughtInput {
    fn from(value: &Value) -> Self {
        ThoughtInput::from(value.clone())
    }
}
