//! SHA-256 helpers for bytes and files.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::errors::Result;

/// Raw SHA-256 digest (32 bytes).
pub fn bytes_bin_hash(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 as 64 lowercase hex characters.
pub fn bytes_hex_hash(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// SHA-256 hex digest of a file's contents.
pub fn file_hex_hash(path: &Path) -> Result<String> {
    info!(path = %path.display(), "hashing file");
    let data = fs::read(path)?;
    Ok(bytes_hex_hash(&data))
}
