//! WASM bindings for thought-core
//!
//! Exposes the thought parser to the chat UI running in the browser.
//!
//! ## Usage
//!
//! ```javascript,ignore
//! import init, { initLogging, parseThoughts } from './thought_core.js';
//!
//! async function main() {
//!     await init();
//!     initLogging();
//!
//!     const response = await fetch('/api/chat', { method: 'POST', body });
//!     const { thoughts } = await response.json();
//!
//!     // Array<{ title: string, content: string, sources: string[] }>
//!     const blocks = parseThoughts(thoughts);
//! }
//! ```
//!
//! `parseThoughts` accepts anything: strings, arrays (non-string members such as numbers,
//! functions or symbols are dropped individually), and `null`/`undefined`/other values, which
//! produce an empty array. Blocks are plain objects
//! since [ThoughtBlock] is a struct.

use wasm_bindgen::prelude::*;

use crate::{
    codec::ThoughtParser,
    config::ParseOptions,
    error::ThoughtError,
    properties::{ThoughtBlock, ThoughtInput},
};

/// Routes `tracing` output to the browser console. Safe to call more than once; later calls
/// keep the first subscriber.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    if let Err(e) = tracing_wasm::try_set_as_global_default() {
        tracing::debug!("Console logging already initialized: {e}");
    }
}

/// Parses a thought payload with the default options.
///
/// Returns `Array<{ title: string, content: string, sources: string[] }>`
#[wasm_bindgen(js_name = parseThoughts)]
pub fn parse_thoughts_js(value: JsValue) -> JsValue {
    let blocks = ThoughtParser::default().parse(input_from_js(value));
    blocks_to_js(&blocks)
}

/// Parses a thought payload with a partial `ParseOptions` object, e.g.
/// `{ thought_title_prefix: "Step" }`. Invalid options throw.
#[wasm_bindgen(js_name = parseThoughtsWithOptions)]
pub fn parse_thoughts_with_options(value: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let options = options_from_js(options).map_err(|e| JsError::new(&e.to_string()))?;
    let blocks = ThoughtParser::new(options).parse(input_from_js(value));
    Ok(blocks_to_js(&blocks))
}

fn input_from_js(value: JsValue) -> ThoughtInput {
    if let Some(text) = value.as_string() {
        return ThoughtInput::Single(text);
    }
    if js_sys::Array::is_array(&value) {
        return ThoughtInput::from_members(
            js_sys::Array::from(&value)
                .iter()
                .map(|member| member.as_string()),
        );
    }
    tracing::debug!("Unsupported thought payload, expected a string or an array");
    ThoughtInput::empty()
}

fn options_from_js(options: JsValue) -> Result<ParseOptions, ThoughtError> {
    if options.is_null() || options.is_undefined() {
        return Ok(ParseOptions::default());
    }
    let options: ParseOptions = serde_wasm_bindgen::from_value(options)?;
    options.validate()?;
    Ok(options)
}

fn blocks_to_js(blocks: &[ThoughtBlock]) -> JsValue {
    match serde_wasm_bindgen::to_value(blocks) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Could not serialize thought blocks: {e}");
            js_sys::Array::new().into()
        }
    }
}
