use thiserror::Error;

/// All errors that can occur while sealing or opening a blob.
#[derive(Debug, Error)]
pub enum BlobError {
    // --- Caller errors ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // --- Container errors ---
    #[error("Unsupported container format: {0}")]
    UnsupportedFormat(String),

    #[error("Container truncated: needed {needed} bytes, only {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("Corrupt payload: {0}")]
    CorruptPayload(String),

    // --- Crypto errors ---
    #[error("Authentication failed: wrong password/key or tampered data")]
    AuthenticationFailure,

    #[error("Container is encrypted but no password or key was supplied")]
    MissingKey,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Ambient errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    #[error("Logging setup failed: {0}")]
    LoggingError(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for blobseal results.
pub type Result<T> = std::result::Result<T, BlobError>;
