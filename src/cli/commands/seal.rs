//! `blobseal seal`: read a JSON document and write it as a sealed blob.

use std::fs;
use std::path::Path;

use crate::blob::{persist_to_file, Value};
use crate::cli::output;
use crate::cli::{load_settings, prompt_new_password, Cli};
use crate::errors::Result;
use crate::humanize::humanized_bytes;
use crate::json::bytes_to_json;

/// Execute the `seal` command.
pub fn execute(
    cli: &Cli,
    input: &Path,
    output_path: &Path,
    no_compress: bool,
    encrypt: bool,
) -> Result<()> {
    let settings = load_settings(cli)?;

    // 1. Parse the input document.
    let raw = fs::read(input)?;
    let value = Value::from(bytes_to_json(&raw)?);

    // 2. Build options from settings + flags.
    let mut options = settings.persist_options();
    if no_compress {
        options = options.compress(false);
    }
    if encrypt {
        let password = prompt_new_password()?;
        options = options.password(password.as_str());
    }

    // 3. Seal and write.
    let blob = persist_to_file(&value, output_path, &options)?;

    output::success(&format!(
        "Sealed {} ({}) into {} ({}{})",
        input.display(),
        humanized_bytes(raw.len() as u64),
        output_path.display(),
        humanized_bytes(blob.len() as u64),
        if encrypt { ", encrypted" } else { "" }
    ));

    Ok(())
}
