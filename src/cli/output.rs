//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::blob::ContainerInfo;
use crate::humanize::humanized_bytes;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a table describing a container header.
pub fn print_container_table(info: &ContainerInfo) {
    let flags = info.header.flags();
    let salt = info.header.salt().map_or_else(
        || "-".to_string(),
        |s| s.iter().map(|b| format!("{b:02x}")).collect(),
    );

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Version".to_string(), info.header.version().to_string()]);
    table.add_row(vec!["Compressed".to_string(), yes_no(flags.compressed())]);
    table.add_row(vec!["Encrypted".to_string(), yes_no(flags.encrypted())]);
    table.add_row(vec!["Salt".to_string(), salt]);
    table.add_row(vec![
        "Payload".to_string(),
        humanized_bytes(info.payload_len as u64),
    ]);
    table.add_row(vec!["Total".to_string(), humanized_bytes(info.total_len as u64)]);

    println!("{table}");
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}
