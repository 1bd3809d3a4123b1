// deghost/src/main.rs
//! Deghost entry point.
//!
//! Parses arguments, bootstraps the logger, and dispatches to the command
//! runners. The process completes normally regardless of per-file errors;
//! only argument or configuration errors exit non-zero.

use anyhow::Result;
use clap::Parser;

use deghost::cli::{Cli, Commands};
use deghost::commands::scrub::{run_scan_command, run_scrub_command};
use deghost::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        log::LevelFilter::Off
    } else if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logger::init_logger(Some(level));

    match cli.command {
        Commands::Scrub(cmd) => run_scrub_command(cmd),
        Commands::Scan(cmd) => run_scan_command(cmd),
    }
}
