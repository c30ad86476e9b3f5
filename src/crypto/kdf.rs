//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that makes brute-forcing a password
//! from a captured container expensive.  The work factor is an explicit
//! per-call parameter (`KdfParams`), loaded from `.blobseal.toml` or
//! left at the defaults below.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::Zeroize;

use super::keys::{Key, KEY_LEN};
use crate::errors::{BlobError, Result};

/// Length of the salt in bytes (128 bits), fixed by the container layout.
pub const SALT_LEN: usize = 16;

/// Minimum safe memory cost in KiB (8 MB).
pub const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// The container header does not record these, so the same values must
/// be used to open a blob as were used to seal it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl KdfParams {
    /// The cheapest parameters still accepted by `derive_key`.
    ///
    /// Meant for tests and throwaway data only.
    pub const fn minimum() -> Self {
        Self {
            memory_kib: MIN_MEMORY_KIB,
            iterations: 1,
            parallelism: 1,
        }
    }

    /// Reject parameters weak enough to make the KDF pointless.
    pub fn validate(&self) -> Result<()> {
        if self.memory_kib < MIN_MEMORY_KIB {
            return Err(BlobError::InvalidInput(format!(
                "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
                self.memory_kib
            )));
        }
        if self.iterations < 1 {
            return Err(BlobError::InvalidInput(
                "Argon2 iterations must be at least 1".into(),
            ));
        }
        if self.parallelism < 1 {
            return Err(BlobError::InvalidInput(
                "Argon2 parallelism must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Derive a 32-byte key from a password and salt with the default params.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<Key> {
    derive_key_with_params(password, salt, &KdfParams::default())
}

/// Derive a 32-byte key with explicit Argon2id parameters.
///
/// The same password + salt + params always produce the same key.
/// Empty (or whitespace-only) passwords and salts of the wrong length are
/// rejected with `InvalidInput`.
pub fn derive_key_with_params(password: &str, salt: &[u8], params: &KdfParams) -> Result<Key> {
    if password.trim().is_empty() {
        return Err(BlobError::InvalidInput(
            "empty passwords are not allowed".into(),
        ));
    }
    if salt.len() != SALT_LEN {
        return Err(BlobError::InvalidInput(format!(
            "salt must be exactly {SALT_LEN} bytes, got {}",
            salt.len()
        )));
    }
    params.validate()?;

    let argon2_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| BlobError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut bytes = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut bytes)
        .map_err(|e| BlobError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    let key = Key::new(bytes);
    bytes.zeroize();
    Ok(key)
}

/// Generate a cryptographically random salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
