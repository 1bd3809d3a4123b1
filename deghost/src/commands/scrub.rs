// deghost/src/commands/scrub.rs
//! The run orchestrator: discovery, per-file processing, reporting.
//!
//! One file is fully processed (read, transformed, optionally written)
//! before the next begins. Per-file I/O failures are logged and skip the
//! file; they never abort the run.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use deghost_core::{merge_rules, FileKind, RunStats, ScrubConfig, ScrubEngine};

use crate::cli::{ScanCommand, ScrubCommand};
use crate::report::{self, ReportMode};
use crate::walker;

/// Options for one orchestrated run.
pub struct ScrubOptions {
    pub root: PathBuf,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Runs the `scrub` command end to end.
pub fn run_scrub_command(cmd: ScrubCommand) -> Result<()> {
    let engine = build_engine(cmd.config.as_deref(), &cmd.enable, &cmd.disable)?;
    let opts = ScrubOptions {
        root: cmd.root,
        dry_run: cmd.dry_run,
        verbose: cmd.verbose,
    };

    let stats = execute(&engine, &opts)?;

    export_stats(&stats, cmd.json_file.as_deref(), cmd.json_stdout)?;
    if !cmd.json_stdout {
        let mode = if opts.dry_run {
            ReportMode::DryRun
        } else {
            ReportMode::Apply
        };
        report::print_report(&stats, mode);
    }
    Ok(())
}

/// Runs the `scan` command: the same walk and analysis with writing forced off.
pub fn run_scan_command(cmd: ScanCommand) -> Result<()> {
    let engine = build_engine(cmd.config.as_deref(), &cmd.enable, &cmd.disable)?;
    let opts = ScrubOptions {
        root: cmd.root,
        dry_run: true,
        verbose: cmd.verbose,
    };

    let stats = execute(&engine, &opts)?;

    export_stats(&stats, cmd.json_file.as_deref(), cmd.json_stdout)?;
    if !cmd.json_stdout {
        report::print_report(&stats, ReportMode::Scan);
    }
    Ok(())
}

/// Loads defaults, merges an optional user config, applies rule filters,
/// and compiles the engine.
fn build_engine(
    config_path: Option<&Path>,
    enable: &[String],
    disable: &[String],
) -> Result<ScrubEngine> {
    let default_config = ScrubConfig::load_default_rules()?;
    let user_config = match config_path {
        Some(path) => Some(
            ScrubConfig::load_from_file(path)
                .with_context(|| format!("Failed to load rule file {}", path.display()))?,
        ),
        None => None,
    };

    let mut config = merge_rules(default_config, user_config);
    config.set_active_rules(enable, disable);

    ScrubEngine::new(config)
}

/// Walks the tree and processes every candidate file sequentially.
///
/// Statistics accumulate into the returned `RunStats`; nothing else is
/// shared across files.
pub fn execute(engine: &ScrubEngine, opts: &ScrubOptions) -> Result<RunStats> {
    info!(
        "{}Scrubbing {}...",
        if opts.dry_run { "[DRY RUN] " } else { "" },
        opts.root.display()
    );

    let mut stats = RunStats::new();

    for path in walker::discover(&opts.root) {
        let rel = path
            .strip_prefix(&opts.root)
            .unwrap_or(&path)
            .display()
            .to_string();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("Error reading {}: {}", path.display(), err);
                continue;
            }
        };
        let original = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => {
                // Rewriting a lossy decode would corrupt the file; treat it
                // as unreadable instead.
                warn!("Skipping {}: not valid UTF-8", path.display());
                continue;
            }
        };

        stats.files_processed += 1;

        let kind = FileKind::from_path(&path);
        debug!("Processing {} as {:?}", rel, kind);

        let outcome = engine.scrub(&original, kind);
        stats.record_transforms(outcome.lines_removed, outcome.patterns_replaced);

        // The review scan runs over the transformed text, for every kind.
        stats.record_findings(engine.review(&outcome.text, &rel));

        if outcome.text == original {
            continue;
        }

        if opts.verbose {
            println!("Modified: {}", rel);
            for preview in &outcome.removed_previews {
                println!("  removed: {}", preview);
            }
        }

        if !opts.dry_run {
            if let Err(err) = fs::write(&path, &outcome.text) {
                warn!("Error writing {}: {}", path.display(), err);
                // A failed write is not a modification.
                continue;
            }
        }

        stats.files_modified += 1;
    }

    Ok(stats)
}

fn export_stats(stats: &RunStats, json_file: Option<&Path>, json_stdout: bool) -> Result<()> {
    if let Some(path) = json_file {
        report::write_json_file(stats, path)?;
        info!("Statistics written to {}", path.display());
    }
    if json_stdout {
        report::print_json_stdout(stats)?;
    }
    Ok(())
}
