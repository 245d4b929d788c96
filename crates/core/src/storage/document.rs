//! Encoding and decoding of the events document.
//!
//! The document is a single JSON array of [`EventRecord`] values,
//! pretty-printed with two-space indentation and a trailing newline.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::{Result, StorageError};
use crate::event::EventRecord;

/// Object key of the events document.
pub const DEFAULT_EVENTS_OBJECT_KEY: &str = "json/events.json";

/// How a document that is valid JSON but not an array is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentPolicy {
    /// Read it as an empty collection.
    #[default]
    Lenient,
    /// Refuse to read it.
    Strict,
}

impl DocumentPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for DocumentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unknown document policy '{other}', expected 'lenient' or 'strict'"
            )),
        }
    }
}

/// Outcome of decoding a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Events(Vec<EventRecord>),
    /// Valid JSON of another shape; `found` names the JSON type.
    NotAnArray { found: &'static str },
}

impl Document {
    /// Resolves the decoded document under `policy`.
    pub fn into_events(self, key: &str, policy: DocumentPolicy) -> Result<Vec<EventRecord>> {
        match (self, policy) {
            (Self::Events(events), _) => Ok(events),
            (Self::NotAnArray { .. }, DocumentPolicy::Lenient) => Ok(Vec::new()),
            (Self::NotAnArray { found }, DocumentPolicy::Strict) => {
                Err(StorageError::CorruptDocument {
                    key: key.to_string(),
                    reason: format!("expected an array, found {found}"),
                })
            }
        }
    }
}

/// Serializes events into the stored document form.
pub fn encode_events(events: &[EventRecord]) -> Result<String> {
    let mut body = serde_json::to_string_pretty(events)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    body.push('\n');
    Ok(body)
}

/// Parses a stored document.
///
/// Blank text decodes as an empty collection. Text that is not JSON, or an
/// array holding something other than event records, is a
/// [`StorageError::CorruptDocument`].
pub fn decode_events(key: &str, raw: &str) -> Result<Document> {
    if raw.trim().is_empty() {
        return Ok(Document::Events(Vec::new()));
    }

    let corrupt = |reason: String| StorageError::CorruptDocument {
        key: key.to_string(),
        reason,
    };

    let value: Value = serde_json::from_str(raw).map_err(|e| corrupt(e.to_string()))?;
    let found = json_type_name(&value);
    if !value.is_array() {
        return Ok(Document::NotAnArray { found });
    }

    serde_json::from_value(value)
        .map(Document::Events)
        .map_err(|e| corrupt(e.to_string()))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
