//! Frontmatter serialization back to document text.

use chrono::FixedOffset;
use indexmap::IndexMap;
use thiserror::Error;

use super::dates;
use super::types::{CONTENT_KEY, FrontMatter, Mode, StringifyOptions};
use super::value::Value;

/// Errors that can occur while encoding a metadata block.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("failed to encode YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to encode JSON frontmatter: {0}")]
    Json(#[from] serde_json::Error),
}

type Entries<'a> = IndexMap<&'a str, &'a Value>;

/// Serialize a record as YAML with a trailing `---` fence.
pub fn stringify(doc: &FrontMatter) -> Result<String, SerializeError> {
    stringify_with(doc, &StringifyOptions::default())
}

/// Serialize a record back to document text.
///
/// A record without metadata produces its body unchanged. Otherwise the
/// output is `[fence]\n<metadata><fence>\n<body>`, where the leading fence
/// is only written when `prefix_separator` is set.
pub fn stringify_with(
    doc: &FrontMatter,
    options: &StringifyOptions,
) -> Result<String, SerializeError> {
    let entries: Entries<'_> = doc
        .fields
        .iter()
        .filter(|(key, _)| key.as_str() != CONTENT_KEY)
        .map(|(key, value)| (key.as_str(), value))
        .collect();

    if entries.is_empty() {
        return Ok(doc.content.clone());
    }

    let separator = options.separator();
    let mut out = String::new();

    if options.prefix_separator {
        out.push_str(separator);
        out.push('\n');
    }

    match options.mode {
        Mode::Yaml => out.push_str(&encode_yaml(&entries, options.timezone)?),
        Mode::Json => out.push_str(&encode_json(&entries)?),
    }

    out.push_str(separator);
    out.push('\n');
    out.push_str(&doc.content);
    Ok(out)
}

/// Encode entries as YAML, writing dates and nulls by hand.
///
/// Dates become local `key: YYYY-MM-DD HH:MM:SS` lines and nulls bare
/// `key:` lines, both after the other entries. Strings that read as
/// timestamps are double-quoted so they parse back as strings.
fn encode_yaml(entries: &Entries<'_>, timezone: FixedOffset) -> Result<String, SerializeError> {
    let mut out = String::new();
    let mut date_keys = Vec::new();
    let mut null_keys = Vec::new();

    for (&key, &value) in entries {
        match value {
            Value::Null => null_keys.push(key),
            Value::Date(date) => date_keys.push((key, date)),
            Value::String(s) if dates::parse_timestamp(s).is_some() => {
                out.push_str(&format!("{}: {}\n", yaml_key(key)?, serde_json::to_string(s)?));
            }
            _ => {
                // One entry at a time: an empty mapping would encode as `{}`.
                let entry: Entries<'_> = IndexMap::from([(key, value)]);
                out.push_str(&serde_yaml::to_string(&entry)?);
            }
        }
    }

    for (key, date) in date_keys {
        out.push_str(&format!("{}: {}\n", yaml_key(key)?, dates::format_local(date, timezone)));
    }
    for key in null_keys {
        out.push_str(&format!("{}:\n", yaml_key(key)?));
    }

    Ok(out)
}

/// A key as the YAML encoder writes it, quoted when it would not read back.
fn yaml_key(key: &str) -> Result<String, SerializeError> {
    Ok(serde_yaml::to_string(key)?.trim_end().to_string())
}

/// Encode entries as a brace-less, unindented JSON object body.
fn encode_json(entries: &Entries<'_>) -> Result<String, SerializeError> {
    let pretty = serde_json::to_string_pretty(entries)?.replace("\n  ", "\n");
    let body = pretty.strip_prefix("{\n").unwrap_or(&pretty);
    let body = body.strip_suffix('}').unwrap_or(body);
    Ok(body.to_string())
}
