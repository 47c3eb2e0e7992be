//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Computer-club day simulator.
///
/// Replays a chronological event log for one club day and prints the merged
/// log together with per-table revenue and usage totals.
#[derive(Debug, Parser)]
#[command(name = "clubsim", version, about, long_about = None)]
pub struct Cli {
    /// Path to the input log file.
    pub file: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the report as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}
