//! Serializer stage: value <-> canonical payload bytes.
//!
//! The payload names the Rust type that was sealed, then holds its JSON
//! encoding:
//!
//! ```text
//! [type name length: u16 BE][type name: UTF-8][JSON bytes]
//! ```
//!
//! `decode` compares the stored type name with the requested one before
//! parsing, so an `i32` never comes back as an `f64` and a list never
//! comes back as a tuple.  Integrity is checked one stage out (AEAD tag
//! or plaintext digest), so these bytes are already verified when
//! `decode` runs.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{BlobError, Result};

/// Size of the type-name length prefix.
const TAG_LEN_BYTES: usize = 2;

/// Deepest `[`/`{` nesting written; serde_json refuses to parse past 128.
pub const MAX_DEPTH: usize = 120;

/// Encode `value` into payload bytes.
///
/// `T` must be loadable as well as sealable, so a container is never
/// written for a type nothing could read back.  Values nested deeper
/// than `MAX_DEPTH` fail with `SerializationError` for the same reason.
pub fn encode<T: Serialize + DeserializeOwned>(value: &T) -> Result<Vec<u8>> {
    let tag = type_name::<T>();
    let tag_len = u16::try_from(tag.len()).map_err(|_| {
        BlobError::SerializationError(format!("type name of {} bytes is too long", tag.len()))
    })?;

    let json = serde_json::to_vec(value)
        .map_err(|e| BlobError::SerializationError(format!("value: {e}")))?;

    let depth = nesting_depth(&json);
    if depth > MAX_DEPTH {
        return Err(BlobError::SerializationError(format!(
            "value nests {depth} levels deep, at most {MAX_DEPTH} can be loaded back"
        )));
    }

    let mut buf = Vec::with_capacity(TAG_LEN_BYTES + tag.len() + json.len());
    buf.extend_from_slice(&tag_len.to_be_bytes());
    buf.extend_from_slice(tag.as_bytes());
    buf.extend_from_slice(&json);
    Ok(buf)
}

/// Decode payload bytes produced by `encode`.
///
/// Fails with `DeserializationError` on a short payload, a payload
/// sealed from a different type, malformed JSON, or trailing data.
pub fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T> {
    let len_bytes: [u8; TAG_LEN_BYTES] = payload
        .get(..TAG_LEN_BYTES)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| {
            BlobError::DeserializationError(format!(
                "payload is {} bytes, too short for a type name",
                payload.len()
            ))
        })?;
    let tag_end = TAG_LEN_BYTES + usize::from(u16::from_be_bytes(len_bytes));
    let stored = payload.get(TAG_LEN_BYTES..tag_end).ok_or_else(|| {
        BlobError::DeserializationError("payload ends inside its type name".into())
    })?;

    let expected = type_name::<T>();
    if stored != expected.as_bytes() {
        return Err(BlobError::DeserializationError(format!(
            "payload holds `{}`, not `{expected}`",
            String::from_utf8_lossy(stored)
        )));
    }

    serde_json::from_slice(&payload[tag_end..])
        .map_err(|e| BlobError::DeserializationError(format!("value: {e}")))
}

/// Deepest array/object nesting in JSON text, ignoring string contents.
fn nesting_depth(json: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &b in json {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}
