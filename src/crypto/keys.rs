//! Symmetric key material and the credentials a caller can supply.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::{BlobError, Result};

/// Length of a symmetric key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte symmetric key that zeroes its memory when dropped.
///
/// `Debug` never prints the key bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    bytes: [u8; KEY_LEN],
}

impl Key {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Build a key from a slice, which must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            BlobError::InvalidInput(format!(
                "key must be exactly {KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    /// Generate a random key.
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; KEY_LEN];
        rand::rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key(<redacted>)")
    }
}

/// What the caller hands over to encrypt or decrypt a blob.
#[derive(Clone)]
pub enum Credentials {
    /// A human password; a key is derived from it with a per-blob salt.
    Password(Zeroizing<String>),
    /// A ready-made 32-byte key, used as is.
    Key(Key),
}

impl Credentials {
    pub fn password(password: impl Into<String>) -> Self {
        Self::Password(Zeroizing::new(password.into()))
    }

    pub fn key(key: Key) -> Self {
        Self::Key(key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password(_) => f.write_str("Credentials::Password(<redacted>)"),
            Self::Key(_) => f.write_str("Credentials::Key(<redacted>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_checks_length() {
        assert!(Key::from_slice(&[0u8; KEY_LEN]).is_ok());
        assert!(matches!(
            Key::from_slice(&[0u8; 10]),
            Err(BlobError::InvalidInput(_))
        ));
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = Key::new([0x42u8; KEY_LEN]);
        let shown = format!("{key:?}");
        assert!(!shown.contains("42"));
        assert!(shown.contains("redacted"));

        let creds = Credentials::password("hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn generated_keys_differ() {
        assert_ne!(Key::generate().as_bytes(), Key::generate().as_bytes());
    }
}
