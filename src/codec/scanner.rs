//! Quote-aware bracket scanning.
//!
//! Thought payloads embed Python-repr literals inside free text, so bracket matching has to skip
//! over both single- and double-quoted spans and honour backslash escapes inside them. All scanning
//! in this crate goes through [QuoteTracker], a small explicit state machine that always advances
//! by exactly one character and therefore terminates on any input.

/// Lexical state of a [QuoteTracker].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Normal,
    InSingleQuote,
    InDoubleQuote,
    /// A backslash was read inside a quoted span; `quote` is the span to return to.
    Escaped { quote: char },
}

impl ScanState {
    pub fn is_quoted(&self) -> bool {
        !matches!(self, ScanState::Normal)
    }
}

/// Feeds characters one at a time and reports whether each one was structural, i.e. read while
/// outside of any quoted span.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteTracker {
    state: ScanState,
}

impl QuoteTracker {
    pub fn new() -> Self {
        QuoteTracker::default()
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Advances the machine by `ch`. Returns true when `ch` is outside quotes and is not itself
    /// an opening quote.
    pub fn advance(&mut self, ch: char) -> bool {
        match self.state {
            ScanState::Normal => match ch {
                '\'' => {
                    self.state = ScanState::InSingleQuote;
                    false
                }
                '"' => {
                    self.state = ScanState::InDoubleQuote;
                    false
                }
                _ => true,
            },
            ScanState::InSingleQuote | ScanState::InDoubleQuote => {
                let quote = if self.state == ScanState::InSingleQuote {
                    '\''
                } else {
                    '"'
                };
                if ch == '\\' {
                    self.state = ScanState::Escaped { quote };
                } else if ch == quote {
                    self.state = ScanState::Normal;
                }
                false
            }
            ScanState::Escaped { quote } => {
                self.state = if quote == '\'' {
                    ScanState::InSingleQuote
                } else {
                    ScanState::InDoubleQuote
                };
                false
            }
        }
    }
}

/// Returns the span of `text` starting at byte `start` (which must hold `open`) through the
/// matching `close`, inclusive. `None` when `start` is not an `open` bracket or when the text ends
/// before the depth returns to zero.
pub fn slice_balanced(text: &str, start: usize, open: char, close: char) -> Option<&str> {
    let tail = text.get(start..)?;
    if !tail.starts_with(open) {
        return None;
    }
    let mut tracker = QuoteTracker::new();
    let mut depth = 0usize;
    for (offset, ch) in tail.char_indices() {
        if !tracker.advance(ch) {
            continue;
        }
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(&tail[..offset + ch.len_utf8()]);
            }
        }
    }
    None
}

/// [slice_balanced] for `{ ... }` spans.
pub fn slice_balanced_object(text: &str, start: usize) -> Option<&str> {
    slice_balanced(text, start, '{', '}')
}

/// [slice_balanced] for `[ ... ]` spans.
pub fn slice_balanced_array(text: &str, start: usize) -> Option<&str> {
    slice_balanced(text, start, '[', ']')
}

/// Yields every top-level balanced `{ ... }` span found in `text`, skipping quoted content
/// between them. Scanning stops at the first unterminated object.
pub fn balanced_objects(text: &str) -> BalancedObjects<'_> {
    BalancedObjects {
        text,
        cursor: 0,
        tracker: QuoteTracker::new(),
    }
}

pub struct BalancedObjects<'a> {
    text: &'a str,
    cursor: usize,
    tracker: QuoteTracker,
}

impl<'a> Iterator for BalancedObjects<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some(ch) = self.text.get(self.cursor..)?.chars().next() {
            if self.tracker.advance(ch) && ch == '{' {
                let Some(span) = slice_balanced_object(self.text, self.cursor) else {
                    self.cursor = self.text.len();
                    return None;
                };
                self.cursor += span.len();
                return Some(span);
            }
            self.cursor += ch.len_utf8();
        }
        None
    }
}
