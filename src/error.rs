use std::{fmt, io};

use regex::Error as RegexError;
use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

#[cfg(feature = "wasm")]
use serde_wasm_bindgen::Error as WasmError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum ThoughtError {
    #[error("Thought codec error: {0}")]
    Codec(String),
    #[error("Invalid parser configuration: {0}")]
    Config(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ThoughtError {
    fn from(src: toml::de::Error) -> ThoughtError {
        ThoughtError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for ThoughtError {
    fn from(src: toml::ser::Error) -> ThoughtError {
        ThoughtError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for ThoughtError {
    fn from(src: JsonError) -> ThoughtError {
        ThoughtError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<io::Error> for ThoughtError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => ThoughtError::NotFound(format!("{x}")),
            _ => ThoughtError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

impl From<fmt::Error> for ThoughtError {
    fn from(x: fmt::Error) -> Self {
        ThoughtError::Codec(format!("{x}"))
    }
}

impl From<RegexError> for ThoughtError {
    fn from(x: RegexError) -> Self {
        ThoughtError::Config(format!("Regex parse failed: {x}"))
    }
}

#[cfg(feature = "wasm")]
impl From<WasmError> for ThoughtError {
    fn from(wasm_error: WasmError) -> Self {
        ThoughtError::Serialization(format!("Serde-wasm-bindgen error: {wasm_error}"))
    }
}
