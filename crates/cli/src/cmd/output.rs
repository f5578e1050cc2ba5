//! Shared JSON conversion for record commands.

use chrono::FixedOffset;
use fencepost_core::frontmatter::dates::{format_local, parse_local};
use fencepost_core::{FrontMatter, Value};
use serde::Serialize;

/// Flatten a record to JSON, writing top-level dates as local clock time.
pub fn record_to_json(doc: FrontMatter, timezone: FixedOffset) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = doc
        .into_record()
        .into_iter()
        .map(|(key, value)| {
            let json = match &value {
                Value::Date(date) => serde_json::Value::String(format_local(date, timezone)),
                other => serde_json::to_value(other).unwrap_or(serde_json::Value::Null),
            };
            (key, json)
        })
        .collect();
    serde_json::Value::Object(map)
}

/// Read a JSON record.
///
/// Top-level strings in the `YYYY-MM-DD HH:MM:SS` form [`record_to_json`]
/// writes become dates; every other string stays a string.
pub fn record_from_json(text: &str, timezone: FixedOffset) -> Result<FrontMatter, String> {
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|e| format!("invalid JSON record: {e}"))?;

    let Value::Mapping(map) = Value::from(json) else {
        return Err("JSON record must be an object".to_string());
    };

    let mut doc = FrontMatter::from_record(map);
    for value in doc.fields.values_mut() {
        let date = match value {
            Value::String(s) => parse_local(s, timezone),
            _ => None,
        };
        if let Some(date) = date {
            *value = Value::Date(date);
        }
    }
    Ok(doc)
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Error encoding output: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn record_json_keeps_order_and_body() {
        let doc = fencepost_core::parse_with(
            "---\nz: 1\na: 2020-01-01 10:00:00\n---\nBody",
            &fencepost_core::ParseOptions::with_timezone(utc()),
        );
        let json = record_to_json(doc, utc());
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["z", "a", "_content"]);
        assert_eq!(json["a"], "2020-01-01 10:00:00");
        assert_eq!(json["_content"], "Body");
    }

    #[test]
    fn record_from_json_rehydrates_dates() {
        let doc = record_from_json(
            r#"{"date": "2020-01-01 10:00:00", "title": "Hi", "_content": "Body"}"#,
            utc(),
        )
        .unwrap();
        assert!(doc.get("date").and_then(Value::as_date).is_some());
        assert_eq!(doc.get("title").and_then(Value::as_str), Some("Hi"));
        assert_eq!(doc.content, "Body");
    }

    #[test]
    fn record_from_json_keeps_other_timestamp_strings() {
        let doc = record_from_json(
            r#"{"slug": "2020-01-01", "at": "2020-01-01T10:00:00Z", "_content": ""}"#,
            utc(),
        )
        .unwrap();
        assert_eq!(doc.get("slug").and_then(Value::as_str), Some("2020-01-01"));
        assert_eq!(doc.get("at").and_then(Value::as_str), Some("2020-01-01T10:00:00Z"));
    }

    #[test]
    fn record_from_json_rejects_non_objects() {
        assert!(record_from_json("[1, 2]", utc()).is_err());
        assert!(record_from_json("{", utc()).is_err());
    }
}
