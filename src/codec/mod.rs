//! Parsing of assistant thought payloads into [ThoughtBlock](crate::properties::ThoughtBlock)s.
//!
//! ## Key Components
//!
//! - [`ThoughtParser`] - Entry point; dispatches each thought to document or single-block
//!   extraction
//! - [`scanner`] - Quote-aware balanced `{}` / `[]` span slicing
//! - [`loose`] - Python-repr dictionary to JSON conversion
//! - [`labels`] - `Content:` sections, `<Label>:` values, markdown headings
//! - [`links`] - Citation, markdown and bare URL extraction
//! - [`subquery`] - Two-tier `subquery -> documents` flattening
//!
//! ## Pipeline
//!
//! 1. Normalize the input into a list of strings ([`ThoughtInput`](crate::properties::ThoughtInput))
//! 2. For each thought, try to recover retrieved documents; each document becomes a block
//! 3. Otherwise build one block from the thought's title label or heading, its content section
//!    and every link it mentions
//!
//! No step returns an error to the caller. Malformed literals, missing labels and partial
//! document structures all degrade to the next fallback, and the worst case is a block holding
//! the raw text under a generated `Thought N` title.
//!
//! ```rust
//! use thought_core::codec::parse_thoughts;
//!
//! let blocks = parse_thoughts("Original Query: ad spend\nContent: See [[1]](https://a.com).");
//! assert_eq!(blocks[0].title, "ad spend");
//! assert_eq!(blocks[0].content, "See [[1]](https://a.com).");
//! assert_eq!(blocks[0].sources, vec!["https://a.com"]);
//! ```

pub mod labels;
pub mod links;
pub mod loose;
pub mod scanner;
pub mod subquery;
pub mod thoughts;

pub use links::extract_sources;
pub use loose::parse_loose_object;
pub use subquery::extract_subquery_documents;
pub use thoughts::{parse_thoughts, ThoughtParser};
