use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::blob::compression::MAX_LEVEL;
use crate::blob::{LoadOptions, PersistOptions};
use crate::crypto::kdf::KdfParams;
use crate::errors::{BlobError, Result};
use crate::logging::LogOptions;

/// Project-level configuration, loaded from `.blobseal.toml`.
///
/// Every field has a sensible default so blobseal works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Compress payloads before sealing (default: true).
    #[serde(default = "default_compress")]
    pub compress: bool,

    /// zlib level, 0..=9 (default: 9).
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Log level used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_compress() -> bool {
    true
}

fn default_compression_level() -> u32 {
    MAX_LEVEL
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            compress: default_compress(),
            compression_level: default_compression_level(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for.
    pub const FILE_NAME: &'static str = ".blobseal.toml";

    /// Load settings from `<dir>/.blobseal.toml`.
    ///
    /// If the file does not exist, defaults are returned.  If it exists
    /// but cannot be parsed or holds out-of-range values, an error is
    /// returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            BlobError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate().map_err(|e| {
            BlobError::ConfigError(format!("{}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.compression_level > MAX_LEVEL {
            return Err(BlobError::ConfigError(format!(
                "compression_level must be 0..={MAX_LEVEL}, got {}",
                self.compression_level
            )));
        }
        self.kdf_params()
            .validate()
            .map_err(|e| BlobError::ConfigError(e.to_string()))?;
        self.log_options()?;
        Ok(())
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Seal options without credentials; add them with `.password(..)`.
    pub fn persist_options(&self) -> PersistOptions {
        PersistOptions {
            compress: self.compress,
            compression_level: self.compression_level,
            credentials: None,
            kdf: self.kdf_params(),
        }
    }

    /// Open options without credentials.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            credentials: None,
            kdf: self.kdf_params(),
        }
    }

    pub fn log_options(&self) -> Result<LogOptions> {
        LogOptions::from_level_name(&self.log_level)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert!(s.compress);
        assert_eq!(s.compression_level, 9);
        assert_eq!(s.argon2_memory_kib, 65_536);
        assert_eq!(s.argon2_iterations, 3);
        assert_eq!(s.argon2_parallelism, 4);
        assert_eq!(s.log_level, "info");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert!(settings.compress);
        assert_eq!(settings.kdf_params(), KdfParams::default());
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
compress = false
compression_level = 4
argon2_memory_kib = 131072
argon2_iterations = 5
argon2_parallelism = 8
log_level = "debug"
"#;
        fs::write(tmp.path().join(".blobseal.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(!settings.compress);
        assert_eq!(settings.compression_level, 4);
        assert_eq!(settings.argon2_memory_kib, 131_072);
        assert_eq!(settings.argon2_iterations, 5);
        assert_eq!(settings.argon2_parallelism, 8);
        assert_eq!(settings.log_level, "debug");

        let opts = settings.persist_options();
        assert!(!opts.compress);
        assert_eq!(opts.compression_level, 4);
        assert_eq!(opts.kdf.memory_kib, 131_072);
        assert!(opts.credentials.is_none());
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".blobseal.toml"), "compress = false\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(!settings.compress);
        assert_eq!(settings.compression_level, 9);
        assert_eq!(settings.argon2_iterations, 3);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".blobseal.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(BlobError::ConfigError(_))));
    }

    #[test]
    fn load_errors_on_out_of_range_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".blobseal.toml"), "compression_level = 12\n").unwrap();
        assert!(matches!(
            Settings::load(tmp.path()),
            Err(BlobError::ConfigError(_))
        ));

        fs::write(tmp.path().join(".blobseal.toml"), "argon2_memory_kib = 16\n").unwrap();
        assert!(matches!(
            Settings::load(tmp.path()),
            Err(BlobError::ConfigError(_))
        ));

        fs::write(tmp.path().join(".blobseal.toml"), "log_level = \"loud\"\n").unwrap();
        assert!(matches!(
            Settings::load(tmp.path()),
            Err(BlobError::ConfigError(_))
        ));
    }
}
