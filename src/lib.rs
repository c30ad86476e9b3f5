//! # blobseal
//!
//! Persist exactly one value per call as a small self-describing
//! container, optionally zlib-compressed and optionally encrypted with
//! AES-256-GCM under a key derived from a password with Argon2id.
//!
//! ```no_run
//! use blobseal::blob::{load_from_file, persist_to_file, LoadOptions, PersistOptions, Value};
//!
//! # fn main() -> blobseal::errors::Result<()> {
//! let value = Value::map([(Value::from("a"), Value::Int(1)), (Value::from("b"), Value::Int(2))]);
//! let path = std::path::Path::new("/tmp/f1");
//!
//! persist_to_file(&value, path, &PersistOptions::default().password("correct horse"))?;
//! let back: Value = load_from_file(path, &LoadOptions::default().password("correct horse"))?;
//! assert_eq!(back, value);
//! # Ok(())
//! # }
//! ```
//!
//! ## Container layout
//!
//! `[version: u8][flags: u8][salt: 16 bytes if encrypted][payload]`;
//! see [`blob::format`].

pub mod blob;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod hashing;
pub mod humanize;
pub mod json;
pub mod logging;
pub mod timer;

pub use blob::{load, persist, Destination, LoadOptions, PersistOptions, Source, Value};
pub use errors::{BlobError, Result};
