//! Best-effort parsing of Python-repr dictionaries.
//!
//! The chat backend stringifies its retrieval results with Python's `repr`, which yields
//! single-quoted strings, `True`/`False`/`None` literals and `\'` escapes. [to_strict_json]
//! rewrites such text into JSON in one pass; [parse_loose_object] then hands it to `serde_json`.
//!
//! Rewrites applied outside of string literals:
//!
//! | Python            | JSON                 |
//! |-------------------|----------------------|
//! | `'text'`          | `"text"`             |
//! | `True` / `False`  | `true` / `false`     |
//! | `None`            | `null`               |
//! | `, }` / `, ]`     | `}` / `]`            |
//!
//! Inside string literals `\'` becomes `'`, `\xHH` becomes `\u00HH`, bare `"` is escaped and raw
//! control characters are escaped.

use serde_json::Value;
use std::fmt::Write;

use crate::error::ThoughtError;

/// Parses `text` as a loose object literal. The trimmed text must start with `{`.
pub fn parse_loose_object(text: &str) -> Result<Value, ThoughtError> {
    let trimmed = text.trim();
    if !trimmed.starts_with('{') {
        return Err(ThoughtError::Codec(
            "loose object literal must start with '{'".to_string(),
        ));
    }
    let strict = to_strict_json(trimmed)?;
    let value: Value = serde_json::from_str(&strict)?;
    Ok(value)
}

/// [parse_loose_object] with every failure collapsed to `None`.
pub fn try_parse_loose_object(text: &str) -> Option<Value> {
    match parse_loose_object(text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::trace!("Loose object parse failed: {e}");
            None
        }
    }
}

/// Rewrites Python literal syntax into JSON. Fails only on an unterminated string literal.
pub fn to_strict_json(text: &str) -> Result<String, ThoughtError> {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\'' | '"' => {
                out.push('"');
                copy_string_literal(&mut chars, ch, &mut out)?;
                out.push('"');
            }
            '}' | ']' => {
                drop_trailing_comma(&mut out);
                out.push(ch);
            }
            c if is_word_char(c) => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if !is_word_char(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                out.push_str(match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    _ => word.as_str(),
                });
            }
            _ => out.push(ch),
        }
    }
    Ok(out)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Copies the body of a literal opened by `quote` into `out` as the body of a JSON string,
/// consuming the closing quote.
fn copy_string_literal<I>(
    chars: &mut I,
    quote: char,
    out: &mut String,
) -> Result<(), ThoughtError>
where
    I: Iterator<Item = char>,
{
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let Some(escaped) = chars.next() else {
                    break;
                };
                match escaped {
                    '\'' => out.push('\''),
                    'x' => {
                        let hex: String =
                            [chars.next(), chars.next()].into_iter().flatten().collect();
                        write!(out, "\\u00{hex}")?;
                    }
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                }
            }
            c if c == quote => return Ok(()),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => write!(out, "\\u{:04x}", c as u32)?,
            c => out.push(c),
        }
    }
    Err(ThoughtError::Codec(format!(
        "unterminated {quote}-quoted string literal"
    )))
}

fn drop_trailing_comma(out: &mut String) {
    let kept = out.trim_end().len();
    if out[..kept].ends_with(',') {
        out.truncate(kept - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_quotes_and_literals() {
        let value =
            parse_loose_object("{'a': True, 'b': False, 'c': None, 'd': [1, 'x']}").unwrap();
        assert_eq!(
            value,
            json!({"a": true, "b": false, "c": null, "d": [1, "x"]})
        );
    }

    #[test]
    fn test_escaped_apostrophe() {
        let value = parse_loose_object(r"{'content': 'Facebook\'s share'}").unwrap();
        assert_eq!(value["content"], "Facebook's share");
    }

    #[test]
    fn test_double_quotes_inside_single_quoted() {
        let value = parse_loose_object(r#"{'quote': 'he said "hi"'}"#).unwrap();
        assert_eq!(value["quote"], r#"he said "hi""#);
    }

    #[test]
    fn test_keywords_inside_strings_untouched() {
        let value =
            parse_loose_object(r#"{'text': 'True story, None left', "other": "False start"}"#)
                .unwrap();
        assert_eq!(value["text"], "True story, None left");
        assert_eq!(value["other"], "False start");
    }

    #[test]
    fn test_word_boundary_respected() {
        assert_eq!(
            to_strict_json("{'a': NoneType, 'b': Trueish, 'c': None}").unwrap(),
            r#"{"a": NoneType, "b": Trueish, "c": null}"#
        );
    }

    #[test]
    fn test_repr_with_double_quoted_apostrophe() {
        let value = parse_loose_object(r#"{'title': "Nike's Q3", 'n': 2}"#).unwrap();
        assert_eq!(value, json!({"title": "Nike's Q3", "n": 2}));
    }

    #[test]
    fn test_trailing_commas_and_control_chars() {
        let value = parse_loose_object("{'a': [1, 2, ], 'b': 'line\nbreak',}").unwrap();
        assert_eq!(value, json!({"a": [1, 2], "b": "line\nbreak"}));
    }

    #[test]
    fn test_hex_escape() {
        let value = parse_loose_object(r"{'name': 'caf\xe9'}").unwrap();
        assert_eq!(value["name"], "café");
    }

    #[test]
    fn test_key_order_preserved() {
        let value = parse_loose_object("{'z': 1, 'a': 2, 'm': 3}").unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_failures() {
        assert!(matches!(
            parse_loose_object("['a']"),
            Err(ThoughtError::Codec(_))
        ));
        assert!(matches!(
            parse_loose_object("{'a': 'open}"),
            Err(ThoughtError::Codec(_))
        ));
        assert!(matches!(
            parse_loose_object("{'a': undefined_name}"),
            Err(ThoughtError::Serialization(_))
        ));
        assert_eq!(try_parse_loose_object("{'a': 1"), None);
    }
}
