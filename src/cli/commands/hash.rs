//! `blobseal hash`: print the SHA-256 of a file.

use std::path::Path;

use crate::errors::Result;
use crate::hashing::file_hex_hash;

/// Execute the `hash` command.
pub fn execute(file: &Path) -> Result<()> {
    let digest = file_hex_hash(file)?;
    println!("{digest}  {}", file.display());
    Ok(())
}
