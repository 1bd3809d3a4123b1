// deghost/src/report.rs
//! End-of-run reporting.
//!
//! The human-readable report goes to stdout: a counters table, up to the
//! first ten suspicious findings, and an explicit notice when nothing was
//! written. JSON export serializes the full `RunStats`, findings included.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io;
use std::path::Path;

use deghost_core::{Finding, ReviewCategory, RunStats};

/// How many findings the console report shows before truncating.
const MAX_REPORTED_FINDINGS: usize = 10;

/// What kind of run the report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Files were rewritten in place.
    Apply,
    /// A scrub with `--dry-run`: changes computed, nothing written.
    DryRun,
    /// A `scan` run: analysis only, writing was never on the table.
    Scan,
}

/// Prints the aggregate statistics for a completed run.
pub fn print_report(stats: &RunStats, mode: ReportMode) {
    let color = io::stdout().is_terminal();

    let title = match mode {
        ReportMode::Apply | ReportMode::DryRun => "SCRUB REPORT",
        ReportMode::Scan => "SCAN REPORT",
    };
    println!();
    if color {
        println!("{}", title.bold());
    } else {
        println!("{}", title);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Metric", "Count"]);
    table.add_row(vec!["Files processed".to_string(), stats.files_processed.to_string()]);
    table.add_row(vec![
        match mode {
            ReportMode::Apply => "Files modified",
            ReportMode::DryRun | ReportMode::Scan => "Files needing changes",
        }
        .to_string(),
        stats.files_modified.to_string(),
    ]);
    table.add_row(vec!["Lines removed".to_string(), stats.lines_removed.to_string()]);
    table.add_row(vec!["Patterns replaced".to_string(), stats.patterns_replaced.to_string()]);
    println!("{table}");

    print_findings(&stats.findings, color);

    match mode {
        ReportMode::DryRun => {
            let notice = "[DRY RUN] No files were written. Run without --dry-run to apply changes.";
            if color {
                println!("\n{}", notice.yellow());
            } else {
                println!("\n{}", notice);
            }
        }
        ReportMode::Scan => {
            println!("\nScan only: no files were written.");
        }
        ReportMode::Apply => {}
    }
}

fn print_findings(findings: &[Finding], color: bool) {
    if findings.is_empty() {
        return;
    }

    println!("\nSuspicious patterns found ({}):", findings.len());
    for finding in findings.iter().take(MAX_REPORTED_FINDINGS) {
        let tag = finding.category.to_string();
        let tag = if color {
            match finding.category {
                ReviewCategory::Telltale => tag.red().to_string(),
                ReviewCategory::FollowUp => tag.yellow().to_string(),
            }
        } else {
            tag
        };
        println!(
            "  - {} [{} / {}]: {} match(es)",
            finding.file, finding.rule, tag, finding.count
        );
    }
    if findings.len() > MAX_REPORTED_FINDINGS {
        println!(
            "  ... and {} more (use --json-file for the full list)",
            findings.len() - MAX_REPORTED_FINDINGS
        );
    }
}

/// Writes the full statistics to a JSON file.
pub fn write_json_file(stats: &RunStats, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(stats).context("Failed to serialize run statistics")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write statistics to {}", path.display()))?;
    Ok(())
}

/// Prints the full statistics as JSON on stdout.
pub fn print_json_stdout(stats: &RunStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats).context("Failed to serialize run statistics")?;
    println!("{}", json);
    Ok(())
}
