// deghost/src/cli.rs
//! This file defines the command-line interface (CLI) for the deghost
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "deghost",
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Scrub AI-generated footprints out of a source tree",
    long_about = "Deghost walks a source tree and removes AI-generated footprints: \
attribution comments, restating-the-obvious comments, conversational filler, and the \
degenerate comment artifacts they leave behind. Suspicious leftovers (unfinished-work \
markers, assistant telltale phrasing) are reported for human review rather than edited.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the 'deghost' crates to DEBUG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `deghost` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrubs a source tree in place, removing AI-generated footprints.
    #[command(about = "Scrubs a source tree in place, removing AI-generated footprints.")]
    Scrub(ScrubCommand),

    /// Analyzes a source tree and reports findings without writing anything.
    #[command(about = "Analyzes a source tree and reports findings without writing anything.")]
    Scan(ScanCommand),
}

/// Arguments for the `scrub` command.
#[derive(Parser, Debug)]
pub struct ScrubCommand {
    /// Root path to scrub (defaults to the current directory).
    #[arg(value_name = "ROOT", default_value = ".", help = "Root path to scrub.")]
    pub root: PathBuf,

    /// Report changes without writing any files.
    #[arg(long = "dry-run", short = 'n', help = "Show what would be changed without modifying files.")]
    pub dry_run: bool,

    /// Print each modified file's relative path and removed-line previews.
    #[arg(long, short = 'v', help = "Show detailed per-file output.")]
    pub verbose: bool,

    /// Path to a custom rule configuration file (YAML), merged over defaults.
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom rule configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Explicitly enable only these rule names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Explicitly enable only these rule names (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Explicitly disable these rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// Export run statistics to a JSON file.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the run statistics to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Print run statistics as JSON to stdout (conflicts with --json-file).
    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Export the run statistics to stdout as JSON instead of the console report.")]
    pub json_stdout: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Root path to scan (defaults to the current directory).
    #[arg(value_name = "ROOT", default_value = ".", help = "Root path to scan.")]
    pub root: PathBuf,

    /// Print each would-be-modified file's relative path and previews.
    #[arg(long, short = 'v', help = "Show detailed per-file output.")]
    pub verbose: bool,

    /// Path to a custom rule configuration file (YAML), merged over defaults.
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom rule configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Explicitly enable only these rule names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Explicitly enable only these rule names (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Explicitly disable these rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// Export run statistics to a JSON file.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the run statistics to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Print run statistics as JSON to stdout (conflicts with --json-file).
    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Export the run statistics to stdout as JSON instead of the console report.")]
    pub json_stdout: bool,
}
