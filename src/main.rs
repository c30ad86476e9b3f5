use clap::Parser;
use tracing::level_filters::LevelFilter;

use blobseal::cli::{Cli, Commands};
use blobseal::config::Settings;
use blobseal::logging::{init_logging, LogOptions};

fn main() {
    let cli = Cli::parse();

    // Logging first, so settings and commands can report what they do.
    let mut log_options = Settings::load(&cli.config_dir)
        .and_then(|s| s.log_options())
        .unwrap_or_default();
    if cli.verbose {
        log_options.level = LevelFilter::DEBUG;
    }
    if let Err(e) = init_logging(&log_options) {
        blobseal::cli::output::warning(&e.to_string());
    }

    let result = match cli.command {
        Commands::Seal {
            ref input,
            ref output,
            no_compress,
            encrypt,
        } => blobseal::cli::commands::seal::execute(&cli, input, output, no_compress, encrypt),
        Commands::Open {
            ref input,
            ref output,
            pretty,
        } => blobseal::cli::commands::open::execute(&cli, input, output.as_deref(), pretty),
        Commands::Inspect { ref input } => blobseal::cli::commands::inspect::execute(input),
        Commands::Hash { ref file } => blobseal::cli::commands::hash::execute(file),
    };

    if let Err(e) = result {
        blobseal::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
