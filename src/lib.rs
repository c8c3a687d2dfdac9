//! # thought-core
//!
//! A Rust library for turning an AI assistant's "thought process" payloads into structured,
//! renderable thought blocks.
//!
//! ## Overview
//!
//! The chat backend reports how it reached an answer as loosely structured text: prose with
//! `Rewritten Query:` / `Original Query:` labels, a `Content:` section, markdown headings and
//! links, and sometimes a Python-repr dictionary of retrieved documents grouped by subquery.
//! thought-core normalizes all of these shapes into an ordered list of
//! [`ThoughtBlock`](properties::ThoughtBlock)s, each with a title, body text and deduplicated
//! source URLs.
//!
//! ### Key Features
//!
//! - **Tolerant**: parsing never fails; malformed input degrades to a raw-text block
//! - **Document flattening**: `{'subquery_N': {'documents': [...]}}` payloads become one block per
//!   document, in subquery then document order
//! - **Loose literals**: single quotes, `True`/`False`/`None` and `\'` escapes are understood
//! - **Source extraction**: citation markers, markdown links and bare URLs, punctuation-trimmed
//! - **Browser bindings**: `parseThoughts` for JavaScript behind the `wasm` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use thought_core::parse_thoughts;
//!
//! let payload = "Content: {'subquery_1': {'documents': [\
//!     {'title': 'Q3 report', 'content': 'Facebook\\'s share grew', 'source': 'https://a.com/q3'}]}}";
//! let blocks = parse_thoughts(vec![payload, "Just text without markers"]);
//!
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[0].title, "Q3 report");
//! assert_eq!(blocks[0].content, "Facebook's share grew");
//! assert_eq!(blocks[1].title, "Thought 2");
//! ```
//!
//! Any `serde_json::Value` is accepted as input; values that are neither strings nor arrays
//! yield no blocks:
//!
//! ```rust
//! use serde_json::json;
//! use thought_core::parse_thoughts;
//!
//! assert!(parse_thoughts(json!(null)).is_empty());
//! assert!(parse_thoughts(json!(123)).is_empty());
//! assert_eq!(parse_thoughts(json!(["a", 1, "b"])).len(), 2);
//! ```
//!
//! ## Configuration
//!
//! [`ParseOptions`](config::ParseOptions) controls generated titles and content cleanup, and can
//! be loaded from TOML through [`TomlConfigProvider`](config::TomlConfigProvider).
//!
//! ## Features
//!
//! - **default**: the parsing library
//! - **bin**: the `thoughts` command line tool
//! - **wasm**: WebAssembly bindings

pub mod codec;
pub mod config;
pub mod error;
pub mod properties;
#[cfg(test)]
mod tests;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use codec::{parse_thoughts, ThoughtParser};
pub use config::ParseOptions;
pub use error::*;
pub use properties::{SourceList, ThoughtBlock, ThoughtInput};
