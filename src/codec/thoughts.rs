use crate::{
    codec::{
        labels::{extract_content_section, extract_first_heading, strip_rule_lines, LabelMatcher},
        links::extract_sources,
        subquery::extract_subquery_documents,
    },
    config::ParseOptions,
    properties::{SourceList, ThoughtBlock, ThoughtInput},
};

/// Turns raw thought payloads into [ThoughtBlock]s.
///
/// Parsing never fails: each thought first goes through
/// [extract_subquery_documents], and anything that yields no documents becomes a single block
/// built from its labels, content section and links.
#[derive(Debug, Clone)]
pub struct ThoughtParser {
    options: ParseOptions,
    label_matchers: Vec<LabelMatcher>,
}

impl Default for ThoughtParser {
    fn default() -> Self {
        ThoughtParser::new(ParseOptions::default())
    }
}

impl ThoughtParser {
    /// Labels that cannot be compiled are skipped; [ParseOptions::validate] reports them.
    pub fn new(options: ParseOptions) -> Self {
        let label_matchers = options
            .title_labels
            .iter()
            .filter_map(|label| match LabelMatcher::new(label.as_str()) {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    tracing::warn!("Skipping title label {label:?}: {e}");
                    None
                }
            })
            .collect();
        ThoughtParser {
            options,
            label_matchers,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    #[tracing::instrument(skip_all)]
    pub fn parse<I: Into<ThoughtInput>>(&self, input: I) -> Vec<ThoughtBlock> {
        let thoughts = input.into().into_thoughts();
        tracing::debug!("Parsing {} thoughts", thoughts.len());
        let mut blocks = Vec::with_capacity(thoughts.len());
        for raw in thoughts.iter() {
            self.parse_thought(raw, &mut blocks);
        }
        blocks
    }

    /// Appends the blocks for one raw thought to `blocks`.
    pub fn parse_thought(&self, raw: &str, blocks: &mut Vec<ThoughtBlock>) {
        let documents = extract_subquery_documents(raw, &self.options.untitled_document_title);
        if !documents.is_empty() {
            blocks.extend(documents);
            return;
        }
        // Generated titles count output blocks, not input thoughts.
        let position = blocks.len() + 1;
        blocks.push(self.single_block(raw, position));
    }

    fn single_block(&self, raw: &str, position: usize) -> ThoughtBlock {
        let title = self.title_for(raw).unwrap_or_else(|| {
            format!("{} {position}", self.options.thought_title_prefix)
        });

        let section = extract_content_section(raw).trim();
        let content = if self.options.strip_rule_lines {
            strip_rule_lines(section).trim().to_string()
        } else {
            section.to_string()
        };

        let sources = merged_sources(&content, raw);
        ThoughtBlock::new(title, content, sources)
    }

    fn title_for(&self, raw: &str) -> Option<String> {
        self.label_matchers
            .iter()
            .find_map(|matcher| matcher.extract(raw))
            .or_else(|| {
                self.options
                    .heading_titles
                    .then(|| extract_first_heading(raw))
                    .flatten()
            })
    }
}

/// Parses `input` with the default [ParseOptions].
pub fn parse_thoughts<I: Into<ThoughtInput>>(input: I) -> Vec<ThoughtBlock> {
    ThoughtParser::default().parse(input)
}

/// Links in `content`, then links only present in `raw`.
pub fn merged_sources(content: &str, raw: &str) -> SourceList {
    let mut sources = extract_sources(content);
    sources.extend(extract_sources(raw).into_vec());
    sources
}
