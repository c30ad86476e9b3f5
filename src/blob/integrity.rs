//! Integrity trailer for unencrypted containers.
//!
//! An encrypted payload is covered by its AEAD tag.  A plaintext payload
//! instead ends with a SHA-256 over the header bytes and the staged
//! (possibly compressed) payload:
//!
//! ```text
//! [staged payload][SHA-256(header || staged payload): 32 bytes]
//! ```
//!
//! It is checked before anything is decompressed or parsed, so any
//! flipped byte in a plaintext container is `CorruptPayload`.

use sha2::{Digest, Sha256};

use crate::errors::{BlobError, Result};

/// Size of the trailing SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

fn digest(header: &[u8], staged: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(header);
    hasher.update(staged);
    hasher.finalize().into()
}

/// Append the digest of `header` and `staged` to `staged`.
pub fn append(header: &[u8], mut staged: Vec<u8>) -> Vec<u8> {
    let sum = digest(header, &staged);
    staged.extend_from_slice(&sum);
    staged
}

/// Check and strip the trailer written by `append`.
pub fn verify<'a>(header: &[u8], payload: &'a [u8]) -> Result<&'a [u8]> {
    if payload.len() < DIGEST_LEN {
        return Err(BlobError::CorruptPayload(format!(
            "payload is {} bytes, shorter than its {DIGEST_LEN}-byte digest",
            payload.len()
        )));
    }

    let (staged, stored) = payload.split_at(payload.len() - DIGEST_LEN);
    if digest(header, staged).as_slice() != stored {
        return Err(BlobError::CorruptPayload("payload digest mismatch".into()));
    }
    Ok(staged)
}
