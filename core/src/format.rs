//! Display formatting for values returned by the API.
//!
//! JSON objects are shown as 2-space-indented text. Every other JSON type is
//! left alone.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::error::ApiError;
use crate::types::ConfigurationBlob;

pub const JSON_MIME_TYPE: &str = "application/json";

/// Serialize `value` with 2-space indentation.
pub fn indent(value: &Value) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"  "));
    value
        .serialize(&mut serializer)
        .map_err(|e| ApiError::SerializationError(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ApiError::SerializationError(e.to_string()))
}

/// Replace an object with its indented text; pass anything else through.
///
/// Applying this twice gives the same result as applying it once, since the
/// output is never an object.
pub fn format_value(value: Value) -> Result<Value, ApiError> {
    match value {
        Value::Object(_) => indent(&value).map(Value::String),
        other => Ok(other),
    }
}

/// Resolve a configuration blob to the text that should be displayed.
///
/// JSON content must be an object; it is re-parsed and indented. Content that
/// claims to be JSON but does not parse, or is not an object, is a
/// `DecodeError`. Other MIME types are returned verbatim.
pub fn format_configuration(blob: ConfigurationBlob) -> Result<String, ApiError> {
    if blob.mime_type != JSON_MIME_TYPE {
        return Ok(blob.content);
    }
    let parsed: Value = serde_json::from_str(&blob.content)
        .map_err(|e| ApiError::DecodeError(format!("configuration content is not valid JSON: {e}")))?;
    match parsed {
        Value::Object(_) => indent(&parsed),
        _ => Err(ApiError::DecodeError("configuration content is not a JSON object".to_string())),
    }
}

/// Render a value for terminal output: strings without quotes, everything
/// else as compact JSON.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
