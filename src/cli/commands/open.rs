//! `blobseal open`: load a sealed blob and print its value as JSON.

use std::fs;
use std::path::Path;

use crate::blob::{format, open, Value};
use crate::cli::output;
use crate::cli::{load_settings, prompt_password, Cli};
use crate::errors::Result;
use crate::json::json_to_string;

/// Execute the `open` command.
pub fn execute(cli: &Cli, input: &Path, output_path: Option<&Path>, pretty: bool) -> Result<()> {
    let settings = load_settings(cli)?;
    let data = fs::read(input)?;

    // Only ask for a password if the header says we need one.
    let mut options = settings.load_options();
    if format::inspect(&data)?.header.flags().encrypted() {
        let password = prompt_password()?;
        options = options.password(password.as_str());
    }

    let value: Value = open(&data, &options)?;
    let text = json_to_string(&value.into_json(), pretty)?;

    match output_path {
        Some(dest) => {
            fs::write(dest, format!("{text}\n"))?;
            output::success(&format!("Wrote {}", dest.display()));
        }
        None => println!("{text}"),
    }

    Ok(())
}
