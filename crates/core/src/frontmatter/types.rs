//! Frontmatter types and data structures.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use super::dates::local_offset;
use super::value::{Mapping, Value};

/// Reserved record key holding the document body.
pub const CONTENT_KEY: &str = "_content";

/// Result of splitting a metadata block from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitResult {
    /// Raw, undecoded metadata block (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Everything after the closing fence.
    pub content: String,
    /// The literal fence line, e.g. `---` or `;;;;`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Whether the block was opened by a fence as well as closed by one.
    pub prefix_separator: bool,
}

impl SplitResult {
    /// A document that is all body.
    pub fn content_only(text: &str) -> Self {
        Self { content: text.to_string(), ..Self::default() }
    }

    pub fn has_data(&self) -> bool {
        self.data.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// A parsed document: ordered metadata fields plus the body.
///
/// As a flat record the body is the `_content` entry; see
/// [`FrontMatter::into_record`] and [`FrontMatter::from_record`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    /// Metadata fields in document order.
    pub fields: Mapping,
    /// The document body.
    pub content: String,
}

impl FrontMatter {
    /// A record with no metadata.
    pub fn new(content: impl Into<String>) -> Self {
        Self { fields: Mapping::new(), content: content.into() }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Insert or replace a field, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Remove a field, preserving the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Flatten into a single mapping with the body under `_content`.
    pub fn into_record(self) -> Mapping {
        let mut record = self.fields;
        record.insert(CONTENT_KEY.to_string(), Value::String(self.content));
        record
    }

    /// Build from a flat mapping, taking the body from `_content`.
    ///
    /// A missing or non-string `_content` yields an empty body.
    pub fn from_record(mut record: Mapping) -> Self {
        let content = match record.shift_remove(CONTENT_KEY) {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };
        Self { fields: record, content }
    }
}

/// Metadata encoding used by [`stringify`](super::serializer::stringify_with).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// YAML block fenced by `---`.
    #[default]
    Yaml,
    /// Brace-less JSON object body fenced by `;;;`.
    Json,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }

    pub fn default_separator(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Json => ";;;",
        }
    }
}

/// Options for [`parse_with`](super::parser::parse_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Offset applied to timestamps so they read as local clock time.
    pub timezone: FixedOffset,
}

impl ParseOptions {
    pub fn with_timezone(timezone: FixedOffset) -> Self {
        Self { timezone }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { timezone: local_offset() }
    }
}

/// Options for [`stringify_with`](super::serializer::stringify_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringifyOptions {
    pub mode: Mode,
    /// Fence line; falls back to the mode's default when unset or empty.
    pub separator: Option<String>,
    /// Emit a fence before the metadata block as well as after it.
    pub prefix_separator: bool,
    /// Offset in which dates are written.
    pub timezone: FixedOffset,
}

impl StringifyOptions {
    /// Options that reproduce the framing found by [`split`](super::splitter::split).
    pub fn matching(split: &SplitResult) -> Self {
        let Some(separator) = split.separator.clone() else {
            return Self::default();
        };
        let mode = if separator.starts_with(';') { Mode::Json } else { Mode::Yaml };
        Self {
            mode,
            separator: Some(separator),
            prefix_separator: split.prefix_separator,
            ..Self::default()
        }
    }

    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    /// The fence line that will be written.
    pub fn separator(&self) -> &str {
        match self.separator.as_deref() {
            Some(sep) if !sep.is_empty() => sep,
            _ => self.mode.default_separator(),
        }
    }
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Yaml,
            separator: None,
            prefix_separator: false,
            timezone: local_offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trip_moves_body() {
        let mut fm = FrontMatter::new("Body");
        fm.insert("title", "Hi");

        let record = fm.clone().into_record();
        assert_eq!(record.get(CONTENT_KEY).and_then(Value::as_str), Some("Body"));
        assert_eq!(record.keys().last().map(String::as_str), Some(CONTENT_KEY));

        assert_eq!(FrontMatter::from_record(record), fm);
    }

    #[test]
    fn from_record_without_content_has_empty_body() {
        let mut record = Mapping::new();
        record.insert("a".to_string(), Value::Null);
        let fm = FrontMatter::from_record(record);
        assert_eq!(fm.content, "");
        assert_eq!(fm.len(), 1);
    }

    #[test]
    fn remove_preserves_order() {
        let mut fm = FrontMatter::new("");
        fm.insert("a", 1);
        fm.insert("b", 2);
        fm.insert("c", 3);
        fm.remove("a");
        let keys: Vec<_> = fm.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "c"]);
    }

    #[test]
    fn separator_falls_back_to_mode_default() {
        let mut opts = StringifyOptions { mode: Mode::Json, ..StringifyOptions::default() };
        assert_eq!(opts.separator(), ";;;");
        opts.separator = Some(String::new());
        assert_eq!(opts.separator(), ";;;");
        opts.separator = Some(";;;;".to_string());
        assert_eq!(opts.separator(), ";;;;");
    }

    #[test]
    fn matching_follows_split_framing() {
        let split = SplitResult {
            data: Some("\"a\": 1".to_string()),
            content: String::new(),
            separator: Some(";;;;".to_string()),
            prefix_separator: true,
        };
        let opts = StringifyOptions::matching(&split);
        assert_eq!(opts.mode, Mode::Json);
        assert_eq!(opts.separator(), ";;;;");
        assert!(opts.prefix_separator);
    }
}
