//! Persist / load entry points.
//!
//! Write path: serialize -> [compress] -> encrypt | digest -> frame -> write.
//! Read path:  read -> unframe -> decrypt | verify -> [decompress] -> deserialize.
//!
//! Either the AEAD tag or the plaintext digest vouches for the payload
//! before it is decompressed or parsed.
//!
//! The container header records which optional stages were applied, so
//! loading only ever needs the credentials, never the compress flag.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::crypto::encryption::{decrypt_with_aad, encrypt_with_aad};
use crate::crypto::kdf::{derive_key_with_params, generate_salt, KdfParams};
use crate::crypto::keys::{Credentials, Key};
use crate::errors::{BlobError, Result};
use crate::humanize::{humanized_bytes, humanized_duration};
use crate::timer::Timer;

use super::compression::{self, MAX_LEVEL};
use super::format::{self, Header};
use super::{integrity, serial};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How a value should be sealed.
#[derive(Debug, Clone)]
pub struct PersistOptions {
    /// Compress the serialized payload (default: true).
    pub compress: bool,
    /// zlib level 0..=9 (default: 9).
    pub compression_level: u32,
    /// Encrypt with these credentials; `None` leaves the payload in clear.
    pub credentials: Option<Credentials>,
    /// Argon2id parameters used when `credentials` is a password.
    pub kdf: KdfParams,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self {
            compress: true,
            compression_level: MAX_LEVEL,
            credentials: None,
            kdf: KdfParams::default(),
        }
    }
}

impl PersistOptions {
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::password(password));
        self
    }

    pub fn key(mut self, key: Key) -> Self {
        self.credentials = Some(Credentials::Key(key));
        self
    }

    pub fn kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }
}

/// How a sealed value should be opened.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Required if the container is encrypted, ignored otherwise.
    pub credentials: Option<Credentials>,
    /// Must match the parameters the container was sealed with.
    pub kdf: KdfParams,
}

impl LoadOptions {
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::password(password));
        self
    }

    pub fn key(mut self, key: Key) -> Self {
        self.credentials = Some(Credentials::Key(key));
        self
    }

    pub fn kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }
}

// ---------------------------------------------------------------------------
// Destinations
// ---------------------------------------------------------------------------

/// Where a sealed container is written.
#[derive(Debug)]
pub enum Destination<'a> {
    /// Create or truncate this file and write the whole container.
    File(&'a Path),
    /// Replace the buffer's contents with the container.
    Buffer(&'a mut Vec<u8>),
}

/// Where a sealed container is read from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    File(&'a Path),
    Bytes(&'a [u8]),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Seal `value` and write it to `destination`.
pub fn persist<T: Serialize + DeserializeOwned>(
    value: &T,
    destination: Destination<'_>,
    options: &PersistOptions,
) -> Result<()> {
    let container = seal(value, options)?;
    match destination {
        Destination::File(path) => write_container(path, &container),
        Destination::Buffer(buf) => {
            *buf = container;
            Ok(())
        }
    }
}

/// Read a container from `source` and open it.
pub fn load<T: DeserializeOwned>(source: Source<'_>, options: &LoadOptions) -> Result<T> {
    match source {
        Source::File(path) => {
            let data = read_container(path)?;
            open(&data, options)
        }
        Source::Bytes(data) => open(data, options),
    }
}

/// Seal `value` to `path`, also returning the container bytes.
pub fn persist_to_file<T: Serialize + DeserializeOwned>(
    value: &T,
    path: &Path,
    options: &PersistOptions,
) -> Result<Vec<u8>> {
    let container = seal(value, options)?;
    write_container(path, &container)?;
    Ok(container)
}

/// Open the container stored at `path`.
pub fn load_from_file<T: DeserializeOwned>(path: &Path, options: &LoadOptions) -> Result<T> {
    load(Source::File(path), options)
}

/// Serialize, optionally compress and encrypt, and frame `value`.
pub fn seal<T: Serialize + DeserializeOwned>(
    value: &T,
    options: &PersistOptions,
) -> Result<Vec<u8>> {
    // 1. Serialize.
    let mut tm_serial = Timer::new();
    let serialized = serial::encode(value)?;
    let serial_time = tm_serial.stop();
    let serial_len = serialized.len();

    // 2. Compress, if asked.
    let mut tm_compress = Timer::new();
    let staged = if options.compress {
        compression::compress(&serialized, options.compression_level)?
    } else {
        serialized
    };
    let compress_time = tm_compress.stop();
    let staged_len = staged.len();

    // 3. Encrypt if credentials were given (the header is the AAD),
    //    otherwise append the plaintext digest.
    let mut tm_crypto = Timer::new();
    let (header, payload) = match &options.credentials {
        None => {
            let header = Header::plain(options.compress);
            let payload = integrity::append(&header.to_bytes(), staged);
            (header, payload)
        }
        Some(credentials) => {
            let salt = generate_salt();
            let key = resolve_key(credentials, &salt, &options.kdf)?;
            let header = Header::encrypted(options.compress, salt);
            let sealed = encrypt_with_aad(&key, &staged, &header.to_bytes())?;
            (header, sealed)
        }
    };
    let crypto_time = tm_crypto.stop();

    // 4. Frame.
    let container = format::encode(&header, &payload);

    let mut summary = format!(
        "{} serial ({})",
        humanized_bytes(serial_len as u64),
        humanized_duration(serial_time)
    );
    if options.compress {
        summary.push_str(&format!(
            "; {} compressed ({})",
            humanized_bytes(staged_len as u64),
            humanized_duration(compress_time)
        ));
    }
    if header.flags().encrypted() {
        summary.push_str(&format!(
            "; {} encrypted ({})",
            humanized_bytes(payload.len() as u64),
            humanized_duration(crypto_time)
        ));
    }
    info!(container_len = container.len(), "sealed: {summary}");

    Ok(container)
}

/// Unframe, optionally decrypt and decompress, and deserialize `data`.
///
/// Decryption verifies the tag before any byte is decompressed or
/// parsed; a wrong key never reaches the deserializer.
pub fn open<T: DeserializeOwned>(data: &[u8], options: &LoadOptions) -> Result<T> {
    // 1. Unframe.
    let (header, payload) = format::decode(data)?;
    let flags = header.flags();
    debug!(
        version = header.version(),
        compressed = flags.compressed(),
        encrypted = flags.encrypted(),
        payload_len = payload.len(),
        "container header parsed"
    );

    // 2. Decrypt, or check the plaintext digest.
    let mut tm_crypto = Timer::new();
    let staged: Zeroizing<Vec<u8>> = if flags.encrypted() {
        let credentials = options.credentials.as_ref().ok_or(BlobError::MissingKey)?;
        let salt = header.salt().ok_or_else(|| {
            BlobError::UnsupportedFormat("encrypted container without salt".into())
        })?;
        let key = resolve_key(credentials, salt, &options.kdf)?;
        Zeroizing::new(decrypt_with_aad(&key, payload, &header.to_bytes())?)
    } else {
        if options.credentials.is_some() {
            warn!("credentials supplied for an unencrypted container; ignoring them");
        }
        Zeroizing::new(integrity::verify(&header.to_bytes(), payload)?.to_vec())
    };
    let crypto_time = tm_crypto.stop();

    // 3. Decompress, if the container says so.
    let mut tm_decompress = Timer::new();
    let serialized = if flags.compressed() {
        Zeroizing::new(compression::decompress(&staged)?)
    } else {
        staged.clone()
    };
    let decompress_time = tm_decompress.stop();

    // 4. Deserialize.
    let mut tm_serial = Timer::new();
    let value = serial::decode(&serialized)?;
    let serial_time = tm_serial.stop();

    let mut summary = format!(
        "{} serial ({})",
        humanized_bytes(serialized.len() as u64),
        humanized_duration(serial_time)
    );
    if flags.compressed() {
        summary.push_str(&format!(
            "; {} compressed ({})",
            humanized_bytes(staged.len() as u64),
            humanized_duration(decompress_time)
        ));
    }
    if flags.encrypted() {
        summary.push_str(&format!(
            "; {} encrypted ({})",
            humanized_bytes(payload.len() as u64),
            humanized_duration(crypto_time)
        ));
    }
    info!(container_len = data.len(), "opened: {summary}");

    Ok(value)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Turn credentials into the key for one seal/open call.
fn resolve_key(credentials: &Credentials, salt: &[u8], kdf: &KdfParams) -> Result<Key> {
    match credentials {
        Credentials::Password(password) => derive_key_with_params(password, salt, kdf),
        Credentials::Key(key) => Ok(key.clone()),
    }
}

fn write_container(path: &Path, container: &[u8]) -> Result<()> {
    let mut tm = Timer::new();
    fs::write(path, container)?;
    info!(
        path = %path.display(),
        size = %humanized_bytes(container.len() as u64),
        elapsed = %humanized_duration(tm.stop()),
        "blob file saved"
    );
    Ok(())
}

fn read_container(path: &Path) -> Result<Vec<u8>> {
    let mut tm = Timer::new();
    let data = fs::read(path)?;
    info!(
        path = %path.display(),
        size = %humanized_bytes(data.len() as u64),
        elapsed = %humanized_duration(tm.stop()),
        "blob file read"
    );
    Ok(data)
}
