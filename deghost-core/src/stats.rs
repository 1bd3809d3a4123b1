//! Run statistics and review findings.
//!
//! `RunStats` is an explicit accumulator owned by the run orchestrator and
//! passed through the processing flow; there is no module-level mutable
//! state. Counters only ever increase within a run.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::config::ReviewCategory;

/// An advisory record of a review-rule match, flagged for human review.
///
/// Findings never cause mutation and never alter the write decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Path of the file the match occurred in, relative to the scrub root.
    pub file: String,
    /// Name of the review rule that matched.
    pub rule: String,
    pub category: ReviewCategory,
    /// Number of occurrences in the file.
    pub count: usize,
}

/// Aggregate statistics for a single scrub run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    /// Files successfully read and analyzed.
    pub files_processed: u64,
    /// Files whose content changed (counted in dry-run mode too).
    pub files_modified: u64,
    /// Whole lines deleted by the line-removal stage.
    pub lines_removed: u64,
    /// Substitutions made by the replacement stage.
    pub patterns_replaced: u64,
    /// Suspicious-pattern findings, in discovery order.
    pub findings: Vec<Finding>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the transformation counters for one processed file.
    pub fn record_transforms(&mut self, lines_removed: usize, patterns_replaced: usize) {
        self.lines_removed += lines_removed as u64;
        self.patterns_replaced += patterns_replaced as u64;
    }

    pub fn record_findings(&mut self, findings: Vec<Finding>) {
        self.findings.extend(findings);
    }
}
