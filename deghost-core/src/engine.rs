//! The scrub engine: ordered transformation stages over one file's text.
//!
//! `ScrubEngine` holds a compiled rule set and applies the pipeline to file
//! content: line removal, whole-text replacements, structural cleanup,
//! comment-style normalization, and the read-only review scan. The engine is
//! immutable after construction and reusable across files; all stages are
//! pure functions of their input text.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::trace;
use std::sync::Arc;

use crate::cleanup;
use crate::compiler::{get_or_compile_rules, CompiledRules};
use crate::config::ScrubConfig;
use crate::filetype::FileKind;
use crate::stats::Finding;

/// Maximum characters of a removed line kept for verbose previews.
const PREVIEW_LEN: usize = 60;

/// The result of scrubbing one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubOutcome {
    /// The transformed text.
    pub text: String,
    /// Whole lines deleted by the line-removal stage.
    pub lines_removed: usize,
    /// Substitutions made by the replacement stage.
    pub patterns_replaced: usize,
    /// Truncated previews of removed lines, in file order.
    pub removed_previews: Vec<String>,
}

impl ScrubOutcome {
    fn unchanged(content: &str) -> Self {
        Self {
            text: content.to_string(),
            lines_removed: 0,
            patterns_replaced: 0,
            removed_previews: Vec::new(),
        }
    }
}

/// Applies the scrub pipeline using a compiled rule set.
#[derive(Debug)]
pub struct ScrubEngine {
    compiled: Arc<CompiledRules>,
    config: ScrubConfig,
}

impl ScrubEngine {
    pub fn new(config: ScrubConfig) -> Result<Self> {
        let compiled =
            get_or_compile_rules(&config).context("Failed to compile scrub rules for engine")?;
        Ok(Self { compiled, config })
    }

    pub fn config(&self) -> &ScrubConfig {
        &self.config
    }

    pub fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled
    }

    /// Line-removal stage.
    ///
    /// Tests each line against the line rules in order; the first matching
    /// rule deletes the line and no further rules are tried for it (one
    /// deletion per line). Surviving lines are kept verbatim, whitespace
    /// included, so a second pass over the output removes nothing.
    pub fn strip_flagged_lines(&self, content: &str) -> (String, usize, Vec<String>) {
        let mut kept: Vec<&str> = Vec::new();
        let mut removed = 0usize;
        let mut previews = Vec::new();

        for line in content.split('\n') {
            let matched = self.compiled.line.iter().find(|rule| rule.regex.is_match(line));
            match matched {
                Some(rule) => {
                    removed += 1;
                    trace!("Rule '{}' removed line: {}", rule.name, line.trim());
                    previews.push(line.trim().chars().take(PREVIEW_LEN).collect());
                }
                None => kept.push(line),
            }
        }

        (kept.join("\n"), removed, previews)
    }

    /// Replacement stage.
    ///
    /// Applies the replace rules in listed order across the whole text, each
    /// rule operating on the previous rule's output. The returned count is
    /// the exact number of substitutions performed, summed across rules.
    pub fn apply_replacements(&self, content: &str) -> (String, usize) {
        let mut current = content.to_string();
        let mut replaced = 0usize;

        for rule in &self.compiled.replace {
            let count = rule.regex.find_iter(&current).count();
            if count > 0 {
                current = rule
                    .regex
                    .replace_all(&current, rule.template.as_str())
                    .into_owned();
                replaced += count;
                trace!("Rule '{}' made {} substitution(s).", rule.name, count);
            }
        }

        (current, replaced)
    }

    /// Read-only review scan over the (possibly transformed) text.
    ///
    /// Every matching review rule yields one `Finding` with its occurrence
    /// count. Never mutates content and never affects the write decision.
    pub fn review(&self, content: &str, source_id: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in &self.compiled.review {
            let count = rule.regex.find_iter(content).count();
            if count > 0 {
                findings.push(Finding {
                    file: source_id.to_string(),
                    rule: rule.name.clone(),
                    category: rule.category,
                    count,
                });
            }
        }
        findings
    }

    /// Runs the full transformation pipeline for one file.
    ///
    /// Stage order is fixed: line removal, replacements, structural cleanup,
    /// comment-style normalization. Files without comment syntax (`Data`)
    /// pass through untouched; the caller runs the review scan separately in
    /// either case.
    pub fn scrub(&self, content: &str, kind: FileKind) -> ScrubOutcome {
        if !kind.has_comment_syntax() {
            return ScrubOutcome::unchanged(content);
        }

        let (text, lines_removed, removed_previews) = self.strip_flagged_lines(content);
        let (text, patterns_replaced) = self.apply_replacements(&text);
        let text = cleanup::collapse_comment_artifacts(&text);
        let text = cleanup::normalize_comment_style(&text, kind);

        ScrubOutcome {
            text,
            lines_removed,
            patterns_replaced,
            removed_previews,
        }
    }
}
