//! Frontmatter parsing from documents.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

use super::dates;
use super::splitter::split;
use super::types::{CONTENT_KEY, FrontMatter, ParseOptions};
use super::value::{Mapping, Value, yaml_key};

static TAB_INDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n(\t+)").unwrap());

/// Reasons a metadata block is not usable.
///
/// Never surfaced to callers of [`parse`]: a block that fails to decode
/// leaves the whole document as body.
#[derive(Debug, Error)]
enum DecodeError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON frontmatter: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("frontmatter is a {0}, not a mapping")]
    NotAMapping(&'static str),
}

/// Parse a document using the process-local timezone for dates.
///
/// ```
/// use fencepost_core::frontmatter::parse;
///
/// let doc = parse("---\ntitle: Hello\n---\n# Content");
/// assert_eq!(doc.get("title").and_then(|v| v.as_str()), Some("Hello"));
/// assert_eq!(doc.content, "# Content");
/// ```
pub fn parse(text: &str) -> FrontMatter {
    parse_with(text, &ParseOptions::default())
}

/// Parse a document into metadata fields and body.
///
/// Blocks fenced by `;` are read as JSON object bodies (no outer braces);
/// all others are read as YAML. A block that does not decode to a mapping
/// is ignored and the full original text becomes the body.
pub fn parse_with(text: &str, options: &ParseOptions) -> FrontMatter {
    let split = split(text);
    let Some(raw) = split.data.as_deref().filter(|d| !d.is_empty()) else {
        return FrontMatter::new(text);
    };

    let is_json = split.separator.as_deref().is_some_and(|sep| sep.starts_with(';'));
    let decoded = if is_json { decode_json(raw) } else { decode_yaml(raw, options) };

    let mut fields = match decoded {
        Ok(fields) => fields,
        Err(e) => {
            tracing::debug!("ignoring front matter: {e}");
            return FrontMatter::new(text);
        }
    };

    // The body always wins over a `_content` key written in the block.
    fields.shift_remove(CONTENT_KEY);
    FrontMatter { fields, content: split.content }
}

/// Rewrite tab indentation as two spaces per tab.
///
/// YAML forbids tabs for indentation; this keeps tab-indented blocks
/// readable without changing their nesting depth.
pub fn escape_yaml(text: &str) -> Cow<'_, str> {
    TAB_INDENT.replace_all(text, |caps: &Captures<'_>| {
        format!("\n{}", "  ".repeat(caps[1].len()))
    })
}

fn decode_yaml(raw: &str, options: &ParseOptions) -> Result<Mapping, DecodeError> {
    let escaped = escape_yaml(raw);
    let value: serde_yaml::Value = serde_yaml::from_str(&escaped)?;
    let map = match value {
        serde_yaml::Value::Mapping(map) => map,
        other => return Err(DecodeError::NotAMapping(yaml_kind(&other))),
    };

    // The loader drops scalar style, so quoted timestamps are found in the source.
    let plain = plain_timestamp_keys(&escaped);

    Ok(map
        .into_iter()
        .map(|(key, value)| {
            let key = yaml_key(key);
            let value = match value {
                serde_yaml::Value::String(s) if plain.contains(key.as_str()) => {
                    match dates::rehydrate(&s, options.timezone) {
                        Some(date) => Value::Date(date),
                        None => Value::String(s),
                    }
                }
                other => Value::from(other),
            };
            (key, value)
        })
        .collect())
}

/// Keys of top-level `key: value` lines whose value is an unquoted timestamp.
fn plain_timestamp_keys(block: &str) -> HashSet<String> {
    block
        .lines()
        .filter_map(|line| {
            let (key, value) = split_entry(line)?;
            let value = strip_comment(value).trim();
            let plain = !value.starts_with(['"', '\'', '!', '&', '*', '|', '>']);
            (plain && dates::parse_timestamp(value).is_some()).then_some(key)
        })
        .collect()
}

/// Split a top-level block line into its decoded key and raw value text.
fn split_entry(line: &str) -> Option<(String, &str)> {
    if line.starts_with([' ', '\t', '#', '-', '?', '{', '[']) {
        return None;
    }

    let key_end = match line.chars().next()? {
        quote @ ('"' | '\'') => closing_quote(line, quote)? + 1,
        _ => 0,
    };
    let colon = key_end + line[key_end..].find(": ")?;
    let key_text = &line[..colon];

    let key = match serde_yaml::from_str::<serde_yaml::Value>(key_text) {
        Ok(key) => yaml_key(key),
        Err(_) => key_text.trim_end().to_string(),
    };
    Some((key, &line[colon + 2..]))
}

/// Byte index of the quote closing a scalar that opens at index 0.
fn closing_quote(line: &str, quote: char) -> Option<usize> {
    let mut chars = line.char_indices().skip(1).peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' if quote == '"' => {
                chars.next();
            }
            '\'' if quote == '\'' && chars.peek().is_some_and(|&(_, n)| n == '\'') => {
                chars.next();
            }
            c if c == quote => return Some(i),
            _ => {}
        }
    }
    None
}

fn strip_comment(value: &str) -> &str {
    match value.find(" #") {
        Some(i) => &value[..i],
        None => value,
    }
}

fn decode_json(raw: &str) -> Result<Mapping, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(&format!("{{{raw}}}"))?;
    match Value::from(value) {
        Value::Mapping(map) => Ok(map),
        _ => Err(DecodeError::NotAMapping("non-object")),
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn opts() -> ParseOptions {
        ParseOptions::with_timezone(FixedOffset::east_opt(8 * 3600).unwrap())
    }

    #[test]
    fn parse_no_frontmatter() {
        let content = "# Hello\n\nSome content";
        let result = parse_with(content, &opts());
        assert!(result.is_empty());
        assert_eq!(result.content, content);
    }

    #[test]
    fn parse_simple_frontmatter() {
        let result = parse_with("---\ntitle: Hello\n---\n# Content", &opts());
        assert_eq!(result.get("title").and_then(Value::as_str), Some("Hello"));
        assert_eq!(result.content, "# Content");
    }

    #[test]
    fn parse_trailing_fence_frontmatter() {
        let result = parse_with("title: Hello\ncount: 3\n---\n# Content", &opts());
        assert_eq!(result.get("title").and_then(Value::as_str), Some("Hello"));
        assert_eq!(result.get("count").and_then(Value::as_i64), Some(3));
        assert_eq!(result.content, "# Content");
    }

    #[test]
    fn parse_frontmatter_with_multiple_fields() {
        let content = "---\ntitle: Test\ntags:\n  - rust\n  - cli\ndraft: false\n---\n\nBody";
        let result = parse_with(content, &opts());
        let tags = result.get("tags").and_then(Value::as_sequence).unwrap();
        assert_eq!(tags, [Value::from("rust"), Value::from("cli")]);
        assert_eq!(result.get("draft").and_then(Value::as_bool), Some(false));
        assert_eq!(result.content, "\nBody");
    }

    #[test]
    fn keys_keep_document_order() {
        let result = parse_with("---\nz: 1\na: 2\nm: 3\n---\n", &opts());
        let keys: Vec<_> = result.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn dates_read_as_local_clock_time() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let result = parse_with("---\ndate: 2020-01-01 00:00:00\nday: 2021-02-03\n---\n", &opts());
        assert_eq!(
            result.get("date").and_then(Value::as_date),
            Some(&tz.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            result.get("day").and_then(Value::as_date),
            Some(&tz.with_ymd_and_hms(2021, 2, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn nested_timestamps_stay_strings() {
        let result = parse_with("---\nevent:\n  at: 2020-01-01\n---\n", &opts());
        let event = result.get("event").and_then(Value::as_mapping).unwrap();
        assert_eq!(event.get("at").and_then(Value::as_str), Some("2020-01-01"));
    }

    #[test]
    fn quoted_timestamps_stay_strings() {
        let result = parse_with(
            "---\nversion: \"2020-01-01\"\nbuilt: '2020-01-01 10:00:00'\nday: 2020-01-01\n---\n",
            &opts(),
        );
        assert_eq!(result.get("version").and_then(Value::as_str), Some("2020-01-01"));
        assert_eq!(result.get("built").and_then(Value::as_str), Some("2020-01-01 10:00:00"));
        assert!(result.get("day").and_then(Value::as_date).is_some());
    }

    #[test]
    fn tagged_timestamps_stay_strings() {
        let result = parse_with("---\nid: !!str 2020-01-01\n---\n", &opts());
        assert_eq!(result.get("id").and_then(Value::as_str), Some("2020-01-01"));
    }

    #[test]
    fn quoted_keys_and_comments_still_find_plain_dates() {
        let result =
            parse_with("---\n'a: b': 2020-01-01 # launch\n\"#tag\": x\n---\n", &opts());
        assert!(result.get("a: b").and_then(Value::as_date).is_some());
        assert_eq!(result.get("#tag").and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn json_block_is_wrapped_in_braces() {
        let result = parse_with(";;;\n\"a\": 1, \"b\": [true, null]\n;;;\nBody", &opts());
        assert_eq!(result.get("a").and_then(Value::as_i64), Some(1));
        assert_eq!(
            result.get("b").and_then(Value::as_sequence),
            Some(&[Value::Bool(true), Value::Null][..])
        );
        assert_eq!(result.content, "Body");
    }

    #[test]
    fn json_strings_are_not_dates() {
        let result = parse_with(";;;\n\"date\": \"2020-01-01\"\n;;;\n", &opts());
        assert_eq!(result.get("date").and_then(Value::as_str), Some("2020-01-01"));
    }

    #[test]
    fn invalid_json_leaves_whole_text() {
        let content = ";;;\nnot json at all\n;;;\nBody";
        let result = parse_with(content, &opts());
        assert!(result.is_empty());
        assert_eq!(result.content, content);
    }

    #[test]
    fn invalid_yaml_leaves_whole_text() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let result = parse_with(content, &opts());
        assert!(result.is_empty());
        assert_eq!(result.content, content);
    }

    #[test]
    fn scalar_block_leaves_whole_text() {
        let content = "Title\n---\nBody";
        let result = parse_with(content, &opts());
        assert!(result.is_empty());
        assert_eq!(result.content, content);
    }

    #[test]
    fn sequence_and_null_blocks_leave_whole_text() {
        for content in ["---\n- a\n- b\n---\nBody", "---\n  \n---\nBody"] {
            let result = parse_with(content, &opts());
            assert!(result.is_empty(), "{content:?}");
            assert_eq!(result.content, content);
        }
    }

    #[test]
    fn block_content_key_is_replaced_by_body() {
        let result = parse_with("---\n_content: sneaky\nk: v\n---\nreal", &opts());
        assert!(result.get(CONTENT_KEY).is_none());
        assert_eq!(result.content, "real");
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn escape_yaml_converts_leading_tabs() {
        assert_eq!(escape_yaml("a:\n\tb: 1\n\t\tc: 2"), "a:\n  b: 1\n    c: 2");
        assert_eq!(escape_yaml("no\ttabs here"), "no\ttabs here");
    }

    #[test]
    fn tab_indented_yaml_parses_like_spaces() {
        let tabs = parse_with("---\nouter:\n\tinner:\n\t\tkey: val\n---\n", &opts());
        let spaces = parse_with("---\nouter:\n  inner:\n    key: val\n---\n", &opts());
        assert!(!tabs.is_empty());
        assert_eq!(tabs, spaces);
    }
}
