//! Generic structured records exchanged with the host.

use crate::ConnectorError;

/// A JSON object. Validated against a definition schema at the boundary,
/// converted to typed structs inside a connector.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Unwrap a JSON value that must be an object.
pub fn into_record(value: serde_json::Value) -> Result<Record, ConnectorError> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(ConnectorError::Conversion(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Unwrap a JSON array of objects.
pub fn into_records(value: serde_json::Value) -> Result<Vec<Record>, ConnectorError> {
    match value {
        serde_json::Value::Array(items) => items.into_iter().map(into_record).collect(),
        other => Err(ConnectorError::Conversion(format!(
            "expected a JSON array of objects, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
