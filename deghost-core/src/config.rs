//! Configuration management for `deghost-core`.
//!
//! This module defines the three ordered rule tables that drive a scrub run:
//! line-removal rules, whole-text replacement rules, and read-only review
//! rules. It handles serialization/deserialization of YAML rule files and
//! provides utilities for loading, merging, filtering, and validating them.
//!
//! Rule order is significant everywhere: later rules see the output of
//! earlier ones, and the tables preserve listed order through load, merge,
//! and compilation.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A rule that deletes a whole line when its pattern matches.
///
/// Line rules are matched case-insensitively against one line at a time;
/// the first matching rule wins and no further rules are tried for that line.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct LineRule {
    /// Unique identifier for the rule (e.g., "ai_attribution_slash").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The regex pattern string, tested against a single line.
    pub pattern: String,
}

/// A pattern/template pair applied across the whole text.
///
/// Replace rules are case-sensitive and applied in listed order; each rule
/// operates on the output of the previous one.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplaceRule {
    pub name: String,
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: String,
    /// The substitution template. `$1`-style references expand to capture groups.
    pub replace_with: String,
    /// If true, `^`/`$` anchor at line boundaries instead of text boundaries.
    pub multiline: bool,
}

/// The two kinds of advisory findings a review rule can produce.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewCategory {
    /// Unfinished-work markers: TODO stubs, ellipsis placeholders.
    #[default]
    FollowUp,
    /// Characteristic assistant phrasing left behind in text.
    Telltale,
}

impl fmt::Display for ReviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewCategory::FollowUp => write!(f, "follow-up"),
            ReviewCategory::Telltale => write!(f, "telltale"),
        }
    }
}

/// A read-only rule whose matches are reported for human review.
///
/// Review rules never mutate content and never affect the write decision.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewRule {
    pub name: String,
    pub description: Option<String>,
    pub pattern: String,
    pub category: ReviewCategory,
}

/// The top-level configuration: the three ordered rule tables.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrubConfig {
    pub line_rules: Vec<LineRule>,
    pub replace_rules: Vec<ReplaceRule>,
    pub review_rules: Vec<ReviewRule>,
}

impl ScrubConfig {
    /// Loads scrub rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file {}", path.display()))?;
        let config: ScrubConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse rule file {}", path.display()))?;

        validate_rules(&config)?;
        info!(
            "Loaded {} line / {} replace / {} review rules from {}.",
            config.line_rules.len(),
            config.replace_rules.len(),
            config.review_rules.len(),
            path.display()
        );

        Ok(config)
    }

    /// Loads the default rule tables from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: ScrubConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        debug!(
            "Loaded {} default line rules, {} replace rules, {} review rules.",
            config.line_rules.len(),
            config.replace_rules.len(),
            config.review_rules.len()
        );
        Ok(config)
    }

    /// Filters active rules based on enable/disable lists provided via CLI.
    ///
    /// An empty `enable_rules` list keeps everything not disabled; a
    /// non-empty list keeps only the named rules. Unknown names are warned
    /// about, not rejected.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        let all_rule_names: HashSet<&str> = self.rule_names().collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }
        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        let keep = |name: &str| {
            !disable_set.contains(name) && (enable_set.is_empty() || enable_set.contains(name))
        };

        self.line_rules.retain(|r| keep(&r.name));
        self.replace_rules.retain(|r| keep(&r.name));
        self.review_rules.retain(|r| keep(&r.name));

        debug!(
            "Active rules after filtering: {} line, {} replace, {} review.",
            self.line_rules.len(),
            self.replace_rules.len(),
            self.review_rules.len()
        );
    }

    /// All rule names across the three tables, in listed order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.line_rules
            .iter()
            .map(|r| r.name.as_str())
            .chain(self.replace_rules.iter().map(|r| r.name.as_str()))
            .chain(self.review_rules.iter().map(|r| r.name.as_str()))
    }
}

/// Merges user-defined rules over the defaults.
///
/// Within each table, a user rule with the same name as a default rule
/// replaces it in place (preserving the default's position in the order);
/// user rules with new names are appended in their listed order.
pub fn merge_rules(default_config: ScrubConfig, user_config: Option<ScrubConfig>) -> ScrubConfig {
    let Some(user_cfg) = user_config else {
        return default_config;
    };

    debug!(
        "Merging user config: {} line / {} replace / {} review rules.",
        user_cfg.line_rules.len(),
        user_cfg.replace_rules.len(),
        user_cfg.review_rules.len()
    );

    fn merge_table<T, F>(mut base: Vec<T>, user: Vec<T>, name_of: F) -> Vec<T>
    where
        F: Fn(&T) -> &str,
    {
        let index: HashMap<String, usize> = base
            .iter()
            .enumerate()
            .map(|(i, rule)| (name_of(rule).to_string(), i))
            .collect();
        for user_rule in user {
            match index.get(name_of(&user_rule)) {
                Some(&i) => base[i] = user_rule,
                None => base.push(user_rule),
            }
        }
        base
    }

    ScrubConfig {
        line_rules: merge_table(default_config.line_rules, user_cfg.line_rules, |r| &r.name),
        replace_rules: merge_table(default_config.replace_rules, user_cfg.replace_rules, |r| {
            &r.name
        }),
        review_rules: merge_table(default_config.review_rules, user_cfg.review_rules, |r| {
            &r.name
        }),
    }
}

/// Validates rule integrity (names, regex compilation, capture groups).
pub fn validate_rules(config: &ScrubConfig) -> Result<()> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for name in config.rule_names() {
        if name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !seen.insert(name.to_string()) {
            errors.push(format!("Duplicate rule name found: '{}'.", name));
        }
    }

    fn check_pattern(errors: &mut Vec<String>, name: &str, pattern: &str) -> Option<usize> {
        if pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", name));
            return None;
        }
        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            return None;
        }
        match Regex::new(pattern) {
            Ok(_) => Some(count_capture_groups(pattern)),
            Err(e) => {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", name, e));
                None
            }
        }
    }

    for rule in &config.line_rules {
        check_pattern(&mut errors, &rule.name, &rule.pattern);
    }
    for rule in &config.review_rules {
        check_pattern(&mut errors, &rule.name, &rule.pattern);
    }

    let group_ref = Regex::new(r"\$(\d+)").unwrap();
    for rule in &config.replace_rules {
        let Some(group_count) = check_pattern(&mut errors, &rule.name, &rule.pattern) else {
            continue;
        };
        for cap in group_ref.captures_iter(&rule.replace_with) {
            if let Some(group_num_str) = cap.get(1) {
                if let Ok(group_num) = group_num_str.as_str().parse::<usize>() {
                    if group_num > group_count {
                        errors.push(format!(
                            "Rule '{}': replacement references non-existent capture group '${}'.",
                            rule.name, group_num
                        ));
                    }
                }
            }
        }
    }

    if !errors.is_empty() {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    } else {
        Ok(())
    }
}

/// Counts unescaped capturing groups in a pattern.
///
/// Non-capturing `(?:` groups and escaped parentheses are not counted.
fn count_capture_groups(pattern: &str) -> usize {
    let mut group_count = 0;
    let mut is_escaped = false;
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => is_escaped = !is_escaped,
            '(' if !is_escaped => {
                if chars.peek() != Some(&'?') {
                    group_count += 1;
                }
                is_escaped = false;
            }
            _ => is_escaped = false,
        }
    }
    group_count
}
