//! Binary container format.
//!
//! A sealed blob has this layout:
//!
//! ```text
//! [version: 1 byte][flags: 1 byte][salt: 16 bytes, only if ENCRYPTED][payload: rest]
//! ```
//!
//! - **Version**: format version (currently `1`). Unknown versions are refused.
//! - **Flags**: bit 0 = payload is compressed, bit 1 = payload is encrypted.
//!   Any other bit is refused, since a newer writer may have applied a
//!   stage this reader does not understand.
//! - **Salt**: Argon2id salt used to derive the key from a password.
//! - **Payload**: everything after the header.  There is no length field,
//!   so a container must always be read to the end and never embedded in
//!   a larger stream.  An encrypted payload is `nonce || ciphertext || tag`;
//!   a plaintext one ends with a SHA-256 trailer (see `integrity`).

use crate::crypto::SALT_LEN;
use crate::errors::{BlobError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Current binary format version.
pub const CURRENT_VERSION: u8 = 1;

/// Fixed-size prefix: 1 (version) + 1 (flags).
const PREFIX_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// Which optional stages were applied to the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    pub const COMPRESSED: u8 = 0b0000_0001;
    pub const ENCRYPTED: u8 = 0b0000_0010;
    const KNOWN: u8 = Self::COMPRESSED | Self::ENCRYPTED;

    pub fn new(compressed: bool, encrypted: bool) -> Self {
        let mut bits = 0;
        if compressed {
            bits |= Self::COMPRESSED;
        }
        if encrypted {
            bits |= Self::ENCRYPTED;
        }
        Self(bits)
    }

    /// Parse a flags byte, refusing bits this version does not know.
    pub fn from_bits(bits: u8) -> Result<Self> {
        if bits & !Self::KNOWN != 0 {
            return Err(BlobError::UnsupportedFormat(format!(
                "unknown flag bits {:#04x}",
                bits & !Self::KNOWN
            )));
        }
        Ok(Self(bits))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn compressed(self) -> bool {
        self.0 & Self::COMPRESSED != 0
    }

    pub fn encrypted(self) -> bool {
        self.0 & Self::ENCRYPTED != 0
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Everything in front of the payload.
///
/// Constructed only through `plain` / `encrypted` (or `decode`), so the
/// salt is present exactly when the encrypted flag is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    version: u8,
    flags: Flags,
    salt: Option<[u8; SALT_LEN]>,
}

impl Header {
    /// Header for an unencrypted payload.
    pub fn plain(compressed: bool) -> Self {
        Self {
            version: CURRENT_VERSION,
            flags: Flags::new(compressed, false),
            salt: None,
        }
    }

    /// Header for an encrypted payload carrying its KDF salt.
    pub fn encrypted(compressed: bool, salt: [u8; SALT_LEN]) -> Self {
        Self {
            version: CURRENT_VERSION,
            flags: Flags::new(compressed, true),
            salt: Some(salt),
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn salt(&self) -> Option<&[u8; SALT_LEN]> {
        self.salt.as_ref()
    }

    /// Number of bytes this header occupies on disk.
    pub fn encoded_len(&self) -> usize {
        PREFIX_LEN + self.salt.map_or(0, |s| s.len())
    }

    /// Serialize the header alone.
    ///
    /// These exact bytes are also the associated data of the encryption
    /// stage, so the flags and salt cannot be altered undetected.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.push(self.version);
        buf.push(self.flags.bits());
        if let Some(salt) = &self.salt {
            buf.extend_from_slice(salt);
        }
        buf
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Frame `payload` behind `header`.
pub fn encode(header: &Header, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(header.encoded_len() + payload.len());
    buf.extend_from_slice(&header.to_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Split a container into its header and payload.
///
/// The version is checked as soon as it is read, so a single unknown
/// version byte reports `UnsupportedFormat` rather than `Truncated`.
pub fn decode(data: &[u8]) -> Result<(Header, &[u8])> {
    let version = *data.first().ok_or(BlobError::Truncated {
        needed: PREFIX_LEN,
        available: 0,
    })?;
    if version != CURRENT_VERSION {
        return Err(BlobError::UnsupportedFormat(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }

    let flag_bits = *data.get(1).ok_or(BlobError::Truncated {
        needed: PREFIX_LEN,
        available: data.len(),
    })?;
    let flags = Flags::from_bits(flag_bits)?;

    let mut offset = PREFIX_LEN;
    let salt = if flags.encrypted() {
        let end = offset + SALT_LEN;
        let bytes = data.get(offset..end).ok_or(BlobError::Truncated {
            needed: end,
            available: data.len(),
        })?;
        offset = end;
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(bytes);
        Some(salt)
    } else {
        None
    };

    let header = Header {
        version,
        flags,
        salt,
    };
    Ok((header, &data[offset..]))
}

/// Summary of a container, read without touching the payload.
#[derive(Debug, Clone)]
pub struct ContainerInfo {
    pub header: Header,
    pub payload_len: usize,
    pub total_len: usize,
}

/// Parse just the header of a container for display or diagnostics.
pub fn inspect(data: &[u8]) -> Result<ContainerInfo> {
    let (header, payload) = decode(data)?;
    Ok(ContainerInfo {
        header,
        payload_len: payload.len(),
        total_len: data.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
