use serde::{Deserialize, Serialize};
use std::{
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

use crate::{codec::labels::LabelMatcher, error::ThoughtError};

pub const DEFAULT_UNTITLED_DOCUMENT_TITLE: &str = "Untitled";
pub const DEFAULT_THOUGHT_TITLE_PREFIX: &str = "Thought";
pub const DEFAULT_TITLE_LABELS: [&str; 2] = ["Rewritten Query", "Original Query"];

/// Tunables for [crate::codec::ThoughtParser]. The defaults reproduce the chat UI's behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Title given to a retrieved document that has none.
    pub untitled_document_title: String,
    /// Generated titles read `"<prefix> <n>"`, n being the 1-based output position.
    pub thought_title_prefix: String,
    /// Labels searched for a title, in priority order.
    pub title_labels: Vec<String>,
    /// Fall back to the first markdown heading before generating a title.
    pub heading_titles: bool,
    /// Remove `===` / `---` underline and rule lines from block content.
    pub strip_rule_lines: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            untitled_document_title: DEFAULT_UNTITLED_DOCUMENT_TITLE.to_string(),
            thought_title_prefix: DEFAULT_THOUGHT_TITLE_PREFIX.to_string(),
            title_labels: DEFAULT_TITLE_LABELS.iter().map(|s| s.to_string()).collect(),
            heading_titles: true,
            strip_rule_lines: true,
        }
    }
}

impl ParseOptions {
    pub fn from_toml_str(content: &str) -> Result<ParseOptions, ThoughtError> {
        let options: ParseOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_toml_string(&self) -> Result<String, ThoughtError> {
        Ok(toml::to_string(self)?)
    }

    /// Rejects options that would let the parser emit an empty title or whose labels cannot be
    /// matched.
    pub fn validate(&self) -> Result<(), ThoughtError> {
        if self.untitled_document_title.trim().is_empty() {
            return Err(ThoughtError::Config(
                "untitled_document_title must not be empty".to_string(),
            ));
        }
        if self.thought_title_prefix.trim().is_empty() {
            return Err(ThoughtError::Config(
                "thought_title_prefix must not be empty".to_string(),
            ));
        }
        if let Some(idx) = self.title_labels.iter().position(|l| l.trim().is_empty()) {
            return Err(ThoughtError::Config(format!(
                "title_labels[{idx}] must not be empty"
            )));
        }
        for label in self.title_labels.iter() {
            LabelMatcher::new(label.as_str())?;
        }
        Ok(())
    }
}

pub trait OptionsProvider: Send + Sync {
    fn get_options(&self) -> Result<ParseOptions, ThoughtError>;
    fn set_options(&self, options: &ParseOptions) -> Result<(), ThoughtError>;
}

/// Reads [ParseOptions] from a TOML file. A missing file yields the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfigProvider {
    path: PathBuf,
}

impl TomlConfigProvider {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigProvider { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OptionsProvider for TomlConfigProvider {
    fn get_options(&self) -> Result<ParseOptions, ThoughtError> {
        tracing::debug!("Attempting to read parse options from: {:?}", &self.path);
        if !self.path.exists() {
            tracing::debug!("Config file not found, using default parse options.");
            return Ok(ParseOptions::default());
        }
        let content = read_to_string(&self.path)?;
        ParseOptions::from_toml_str(&content)
    }

    fn set_options(&self, options: &ParseOptions) -> Result<(), ThoughtError> {
        tracing::debug!("Attempting to write parse options to: {:?}", &self.path);
        options.validate()?;
        write(&self.path, options.to_toml_string()?)?;
        Ok(())
    }
}

pub fn get_content<P: AsRef<Path>>(path: P) -> Result<String, ThoughtError> {
    tracing::debug!("Reading {:?}", path.as_ref());
    Ok(read_to_string(path)?)
}
