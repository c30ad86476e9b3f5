//! Thin JSON text helpers over `serde_json`.

use serde::Serialize;
use serde_json::Value as Json;

use crate::errors::{BlobError, Result};

/// Render `value` as JSON text, indented when `human_readable`.
pub fn json_to_string<T: Serialize + ?Sized>(value: &T, human_readable: bool) -> Result<String> {
    let text = if human_readable {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.map_err(|e| BlobError::SerializationError(format!("json: {e}")))
}

/// Parse JSON from UTF-8 bytes, e.g. a file read by `seal`.
pub fn bytes_to_json(data: &[u8]) -> Result<Json> {
    serde_json::from_slice(data).map_err(|e| BlobError::DeserializationError(format!("json: {e}")))
}
