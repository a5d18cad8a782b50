//! Defensive deserializers for slide payloads.
//!
//! Slide documents come from a language model, so the only thing the engine can rely on is a
//! valid `type` tag. Everything below it is decoded leniently: numbers where strings were
//! expected, strings where numbers were expected, `null` where a list was expected, and list
//! entries that do not match their schema at all.

use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, ops::Deref};

/// A text field that accepts strings, numbers and booleans. `null` and structured values
/// decode as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Text(pub String);

impl Text {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the text holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns the trimmed text, or `None` when blank.
    pub fn non_blank(&self) -> Option<&str> {
        let trimmed = self.0.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text(value.to_string())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text(value)
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Text(scalar_to_string(&value).unwrap_or_default()))
    }
}

/// Converts a scalar JSON value to its text form. Arrays, objects and `null` yield `None`.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerces a JSON value to a finite number.
///
/// Accepts numbers and numeric strings; tolerates surrounding whitespace, thousands
/// separators and a trailing `%`. Anything else yields `None`.
pub fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_end_matches('%')
                .chars()
                .filter(|c| *c != ',' && *c != '_')
                .collect();
            cleaned.trim().parse::<f64>().ok()
        }
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Replaces `null` with the type's default.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An optional number that also accepts numeric strings. Non-numeric input yields `None`.
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

/// An optional flag that also accepts `"true"`/`"false"` and `0`/`1`.
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(bool_from_value(&value))
}

/// A flag defaulting to `false` for anything that is not recognisably true.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(bool_from_value(&value).unwrap_or(false))
}

fn bool_from_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// A list of strings.
///
/// Scalars inside the array are stringified and structured entries are skipped. A bare
/// string is split into one entry per non-blank line; `null` is an empty list.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(strings_from_value(&value))
}

pub(crate) fn strings_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        Value::String(s) => s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Number(_) | Value::Bool(_) => scalar_to_string(value).into_iter().collect(),
        Value::Null | Value::Object(_) => Vec::new(),
    }
}

/// A table body: a list of rows, each row decoded like [`string_list`].
pub fn string_rows<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(rows) => rows.iter().map(strings_from_value).collect(),
        _ => Vec::new(),
    })
}

/// A list of structured entries. `null` is an empty list and entries that do not decode
/// are dropped with a warning instead of failing the whole slide.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        single @ Value::Object(_) => vec![single],
        other => {
            warn!("Expected a list, found {}; treating it as empty", kind_of(&other));
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Dropping malformed list entry {}: {}", index + 1, e);
                None
            }
        })
        .collect())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Probe {
        name: Text,
        #[serde(deserialize_with = "opt_number")]
        size: Option<f64>,
        #[serde(deserialize_with = "string_list")]
        items: Vec<String>,
        #[serde(deserialize_with = "string_rows")]
        rows: Vec<Vec<String>>,
        #[serde(deserialize_with = "flag")]
        on: bool,
    }

    #[derive(Debug, Deserialize)]
    struct Entry {
        label: String,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Entries {
        #[serde(deserialize_with = "seq")]
        entries: Vec<Entry>,
    }

    #[test]
    fn text_accepts_scalars() {
        let probe: Probe = serde_json::from_value(json!({ "name": 42 })).unwrap();
        assert_eq!(probe.name.as_str(), "42");
        let probe: Probe = serde_json::from_value(json!({ "name": null })).unwrap();
        assert!(probe.name.is_blank());
        let probe: Probe = serde_json::from_value(json!({ "name": ["a"] })).unwrap();
        assert_eq!(probe.name.as_str(), "");
    }

    #[test]
    fn numbers_are_coerced() {
        assert_eq!(number_from_value(&json!("1,200")), Some(1200.0));
        assert_eq!(number_from_value(&json!(" 45% ")), Some(45.0));
        assert_eq!(number_from_value(&json!("n/a")), None);
        assert_eq!(number_from_value(&json!(true)), None);
        let probe: Probe = serde_json::from_value(json!({ "size": "28" })).unwrap();
        assert_eq!(probe.size, Some(28.0));
    }

    #[test]
    fn string_lists_tolerate_shapes() {
        let probe: Probe =
            serde_json::from_value(json!({ "items": ["a", 2, {"x": 1}, null, true] })).unwrap();
        assert_eq!(probe.items, vec!["a", "2", "true"]);

        let probe: Probe = serde_json::from_value(json!({ "items": "first\n\n second " })).unwrap();
        assert_eq!(probe.items, vec!["first", "second"]);

        let probe: Probe = serde_json::from_value(json!({ "items": null })).unwrap();
        assert!(probe.items.is_empty());
    }

    #[test]
    fn rows_and_flags() {
        let probe: Probe =
            serde_json::from_value(json!({ "rows": [["a", 1], "b", null], "on": "yes" })).unwrap();
        assert_eq!(probe.rows, vec![vec!["a", "1"], vec!["b"], vec![]]);
        assert!(probe.on);
    }

    #[test]
    fn seq_drops_malformed_entries() {
        let entries: Entries = serde_json::from_value(
            json!({ "entries": [{ "label": "ok" }, "bad", { "other": 1 }] }),
        )
        .unwrap();
        assert_eq!(entries.entries.len(), 1);
        assert_eq!(entries.entries[0].label, "ok");

        let entries: Entries = serde_json::from_value(json!({ "entries": null })).unwrap();
        assert!(entries.entries.is_empty());
    }
}
