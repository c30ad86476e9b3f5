//! Explicit, idempotent logging bootstrap.
//!
//! Nothing is installed when the library is loaded; applications call
//! [`init_logging`] once near the top of `main`.  Without a subscriber
//! the library's `tracing` events are simply dropped.
//!
//! `RUST_LOG` takes precedence over the configured level, e.g.
//! `RUST_LOG=blobseal=debug`.

use std::sync::OnceLock;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::errors::{BlobError, Result};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Default level when `RUST_LOG` is unset (default: INFO).
    pub level: LevelFilter,
    /// Include the thread name in every line (default: false).
    pub thread_names: bool,
    /// Colorize output (default: true).
    pub ansi: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            thread_names: false,
            ansi: true,
        }
    }
}

impl LogOptions {
    /// Build options from a level name such as `"debug"`.
    pub fn from_level_name(name: &str) -> Result<Self> {
        let level = name
            .parse::<LevelFilter>()
            .map_err(|e| BlobError::ConfigError(format!("invalid log level '{name}': {e}")))?;
        Ok(Self {
            level,
            ..Self::default()
        })
    }
}

/// Install a stderr `fmt` subscriber.
///
/// Returns `Ok(true)` if this call installed it and `Ok(false)` if
/// logging was already initialized (by this function or anyone else).
pub fn init_logging(options: &LogOptions) -> Result<bool> {
    if INSTALLED.get().is_some() {
        return Ok(false);
    }

    let filter = EnvFilter::builder()
        .with_default_directive(options.level.into())
        .from_env()
        .map_err(|e| BlobError::LoggingError(format!("invalid RUST_LOG: {e}")))?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(options.thread_names)
        .with_ansi(options.ansi)
        .try_init()
        .is_ok();

    // A failed try_init means some other subscriber is already global.
    let _ = INSTALLED.set(());
    Ok(installed)
}
