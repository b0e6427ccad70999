//! Boundary parsing for generation-service responses.
//!
//! Response bodies are decoded once, here. Everything past this module sees a
//! [`DraftReply`] whose `draft` is either a non-empty string or `None`.

use super::scrub::sanitize_message;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Dotted location of the draft text inside a JSON response (`plan`, `intro_outline.plan`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPath {
    segments: Vec<String>,
}

impl DraftPath {
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .trim()
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        }
    }

    fn lookup<'a>(&self, body: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(body, |node, segment| node.get(segment))
    }
}

impl Default for DraftPath {
    fn default() -> Self {
        Self::parse("plan")
    }
}

impl fmt::Display for DraftPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// What a successful generation call produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftReply {
    /// `None` when the field is absent, null, not a string, or blank.
    pub draft: Option<String>,
}

impl DraftReply {
    pub fn with_draft(text: impl Into<String>) -> Self {
        Self {
            draft: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self { draft: None }
    }

    pub fn from_value(body: &Value, path: &DraftPath) -> Self {
        let draft = path
            .lookup(body)
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(ToOwned::to_owned);
        Self { draft }
    }

    /// Non-JSON bodies carry no draft.
    pub fn from_body(body: &str, path: &DraftPath) -> Self {
        serde_json::from_str::<Value>(body)
            .map(|value| Self::from_value(&value, path))
            .unwrap_or_default()
    }
}

/// `message` from an error body, sanitized, or `fallback`.
pub fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map_or_else(|| fallback.to_string(), sanitize_message)
}

/// First message per key of an `errors: { field: [msg, ...] }` body.
pub fn field_errors(body: &str) -> BTreeMap<String, String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return BTreeMap::new();
    };
    let Some(errors) = value.get("errors").and_then(Value::as_object) else {
        return BTreeMap::new();
    };

    errors
        .iter()
        .filter_map(|(key, messages)| {
            let first = match messages {
                Value::Array(items) => items.first().and_then(Value::as_str),
                Value::String(text) => Some(text.as_str()),
                _ => None,
            }?;
            Some((key.clone(), sanitize_message(first)))
        })
        .collect()
}
