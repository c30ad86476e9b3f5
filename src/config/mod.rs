//! Configuration module: `.blobseal.toml` settings.

pub mod settings;

pub use settings::Settings;
