//! `blobseal inspect`: show a blob's header without opening it.

use std::fs;
use std::path::Path;

use crate::blob::format;
use crate::cli::output;
use crate::errors::Result;

/// Execute the `inspect` command.
pub fn execute(input: &Path) -> Result<()> {
    let data = fs::read(input)?;
    let info = format::inspect(&data)?;
    output::print_container_table(&info);
    Ok(())
}
