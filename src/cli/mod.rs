//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{BlobError, Result};

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable checked before prompting for a password.
pub const PASSWORD_ENV: &str = "BLOBSEAL_PASSWORD";

/// blobseal CLI: seal a JSON document into a compressed, optionally encrypted blob.
#[derive(Parser)]
#[command(
    name = "blobseal",
    about = "Seal values into compressed, optionally encrypted blobs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding `.blobseal.toml` (default: current directory)
    #[arg(long, default_value = ".", global = true)]
    pub config_dir: PathBuf,

    /// Log at debug level (overrides the configured level)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Seal a JSON document into a blob file
    Seal {
        /// JSON file to read
        input: PathBuf,
        /// Blob file to write
        output: PathBuf,
        /// Store the payload uncompressed
        #[arg(long)]
        no_compress: bool,
        /// Encrypt with a password (prompted, or from BLOBSEAL_PASSWORD)
        #[arg(short, long)]
        encrypt: bool,
    },

    /// Open a blob file and print its value as JSON
    Open {
        /// Blob file to read
        input: PathBuf,
        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show a blob's header without decrypting it
    Inspect {
        /// Blob file to read
        input: PathBuf,
    },

    /// Print the SHA-256 of a file
    Hash {
        /// File to hash
        file: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from the `--config-dir` directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    Settings::load(&cli.config_dir)
}

/// Get the blob password, trying in order:
/// 1. `BLOBSEAL_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter blob password")
        .interact()
        .map_err(|e| BlobError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `seal --encrypt`).
///
/// Also respects `BLOBSEAL_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            check_password_strength(&pw)?;
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose blob password")
            .with_confirmation(
                "Confirm blob password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| BlobError::CommandFailed(format!("password prompt: {e}")))?;

        if let Err(e) = check_password_strength(&password) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Reject passwords that are too short to be worth deriving a key from.
pub fn check_password_strength(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(BlobError::CommandFailed(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_are_rejected() {
        assert!(check_password_strength("short").is_err());
        assert!(check_password_strength("").is_err());
    }

    #[test]
    fn long_enough_passwords_pass() {
        assert!(check_password_strength("correct horse").is_ok());
        assert!(check_password_strength("12345678").is_ok());
    }

    #[test]
    fn cli_parses_seal() {
        let cli = Cli::try_parse_from(["blobseal", "seal", "in.json", "out.blob", "--encrypt"])
            .unwrap();
        match cli.command {
            Commands::Seal {
                encrypt,
                no_compress,
                ..
            } => {
                assert!(encrypt);
                assert!(!no_compress);
            }
            _ => panic!("expected seal"),
        }
        assert_eq!(cli.config_dir, PathBuf::from("."));
    }
}
