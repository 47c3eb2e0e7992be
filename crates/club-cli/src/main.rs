use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use club_cli::Cli;
use club_core::report;

fn main() -> Result<()> {
    // Usage diagnostics share standard output with the report itself.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            print!("{err}");
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let input = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    match club_core::simulate(&input) {
        Ok(club) => {
            if cli.json {
                let data = report::report(&club);
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print!("{}", report::render(&club));
            }
            Ok(())
        }
        Err(err) => {
            tracing::debug!(error = %err, "input rejected");
            // The raw offending line is the whole diagnostic for bad input.
            println!("{}", err.raw_line());
            std::process::exit(1);
        }
    }
}
