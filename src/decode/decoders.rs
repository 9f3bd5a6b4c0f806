//! Decoder implementations

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use serde_json::Value;

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Dot-separated path to the records array (root when `None`)
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a decoder that expects an array at the root
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Configured record path
    pub fn record_path(&self) -> Option<&str> {
        self.record_path.as_deref()
    }

    fn location(&self) -> &str {
        self.record_path.as_deref().unwrap_or("$")
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value = self.decode_raw(body)?;
        self.records(&value)
    }

    fn decode_raw(&self, body: &str) -> Result<Value> {
        serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })
    }

    fn records(&self, value: &Value) -> Result<Vec<Value>> {
        let target = match &self.record_path {
            Some(path) => extract_path(value, path),
            None => Some(value),
        };

        match target {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(other) => Err(Error::decode(format!(
                "expected an array at '{}', found {}",
                self.location(),
                json_kind(other)
            ))),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Walk a dot-separated path (`pagination.after_cursor`) into a JSON value.
///
/// A leading `$.` is accepted and ignored.
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    path.split('.')
        .try_fold(value, |current, part| current.get(part))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
