//! Record type with dot-notation field access.
//!
//! A [`Record`] is one decoded unit of input: a timestamp, the id of the
//! entity that produced it, the full payload map, and its zero-based
//! position in the stream.

use serde::Serialize;
use serde_json::Value;

/// An immutable decoded log record submitted for validation.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Source timestamp string; empty when the payload carries none.
    pub timestamp: String,
    /// Id of the entity this record belongs to (`"unknown"` when absent).
    pub entity_id: String,
    /// The full decoded payload, including the fields above.
    pub payload: Value,
    /// Zero-based arrival index in the stream.
    pub index: usize,
}

impl Record {
    /// Build a record from a decoded payload value.
    ///
    /// `timestamp` and `entity_id` are pulled out of the payload map for
    /// convenient access; a non-string entity id is stringified, while a
    /// missing or null one falls back to the `"unknown"` sentinel.
    pub fn from_value(payload: Value, index: usize) -> Self {
        let timestamp = payload
            .get("timestamp")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let entity_id = match payload.get("entity_id") {
            Some(Value::String(s)) => s.clone(),
            Some(v) if !v.is_null() => v.to_string(),
            _ => "unknown".to_string(),
        };
        Record {
            timestamp,
            entity_id,
            payload,
            index,
        }
    }

    /// Resolve a dotted field path against the payload.
    ///
    /// Splits the path on `.` and descends through JSON objects only.
    /// Returns `None` as soon as a segment is missing or the current
    /// value is not an object — never an error, even for malformed or
    /// too-deep paths. An explicit JSON `null` resolves to
    /// `Some(Value::Null)`.
    pub fn field(&self, path: &str) -> Option<&Value> {
        let mut current = &self.payload;
        for part in path.split('.') {
            match current {
                Value::Object(map) => current = map.get(part)?,
                _ => return None,
            }
        }
        Some(current)
    }
}
