//! Blob module: single-value persistence.
//!
//! This module provides:
//! - The schema-less `Value` type (`value`)
//! - The serializer stage with its type tag (`serial`)
//! - The plaintext integrity trailer (`integrity`)
//! - The zlib compression stage (`compression`)
//! - The binary container framing (`format`)
//! - `persist` / `load` orchestrating all stages (`store`)

pub mod compression;
pub mod format;
pub mod integrity;
pub mod serial;
pub mod store;
pub mod value;

// Re-export the most commonly used items.
pub use format::{ContainerInfo, Flags, Header, CURRENT_VERSION};
pub use store::{
    load, load_from_file, open, persist, persist_to_file, seal, Destination, LoadOptions,
    PersistOptions, Source,
};
pub use value::Value;
