//! compiler.rs - Manages the compilation and caching of scrub rules.
//!
//! This module provides a thread-safe, cached mechanism to convert a
//! `ScrubConfig` into `CompiledRules`, which are optimized for efficient
//! application to file text. It uses a global, shared cache to avoid
//! redundant compilation.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{ReviewCategory, ScrubConfig, MAX_PATTERN_LENGTH};
use crate::errors::ScrubError;

/// 10 MB limit for a single compiled regex.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A compiled line-removal rule.
#[derive(Debug)]
pub struct CompiledLineRule {
    /// The compiled regular expression, case-insensitive.
    pub regex: Regex,
    /// The unique name of the rule.
    pub name: String,
}

/// A compiled whole-text replacement rule.
#[derive(Debug)]
pub struct CompiledReplaceRule {
    pub regex: Regex,
    /// The substitution template (`$1`-style group references).
    pub template: String,
    pub name: String,
}

/// A compiled read-only review rule.
#[derive(Debug)]
pub struct CompiledReviewRule {
    pub regex: Regex,
    pub name: String,
    pub category: ReviewCategory,
}

/// The full compiled rule set, in the same order as the source tables.
#[derive(Debug, Default)]
pub struct CompiledRules {
    pub line: Vec<CompiledLineRule>,
    pub replace: Vec<CompiledReplaceRule>,
    pub review: Vec<CompiledReviewRule>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled rules.
    /// The key is a hash of the `ScrubConfig`.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> =
        RwLock::new(HashMap::new());
}

/// Hashes the `ScrubConfig` to create a stable key for the cache.
///
/// Rule order is semantically significant here (later rules see earlier
/// rules' output), so the tables are hashed in listed order and two
/// orderings of the same rules are distinct configs.
fn hash_config(config: &ScrubConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

fn build_regex(
    name: &str,
    pattern: &str,
    case_insensitive: bool,
    multiline: bool,
    errors: &mut Vec<ScrubError>,
) -> Option<Regex> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        errors.push(ScrubError::PatternLengthExceeded(
            name.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
        return None;
    }

    match RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .multi_line(multiline)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => {
            debug!(target: "deghost_core::compiler", "Rule '{}' compiled successfully.", name);
            Some(regex)
        }
        Err(e) => {
            errors.push(ScrubError::RuleCompilationError(name.to_string(), e));
            None
        }
    }
}

/// Compiles a `ScrubConfig` into `CompiledRules` for efficient matching.
/// This is the low-level function that performs the actual regex compilation.
pub fn compile_rules(config: &ScrubConfig) -> Result<CompiledRules, ScrubError> {
    debug!(
        "Starting compilation of {} line / {} replace / {} review rules.",
        config.line_rules.len(),
        config.replace_rules.len(),
        config.review_rules.len()
    );

    let mut compiled = CompiledRules::default();
    let mut compilation_errors = Vec::new();

    for rule in &config.line_rules {
        // Line rules match single lines case-insensitively; `^` anchors at
        // the start of the line under test, so multiline mode is not needed.
        if let Some(regex) = build_regex(&rule.name, &rule.pattern, true, false, &mut compilation_errors)
        {
            compiled.line.push(CompiledLineRule {
                regex,
                name: rule.name.clone(),
            });
        }
    }

    for rule in &config.replace_rules {
        if let Some(regex) = build_regex(
            &rule.name,
            &rule.pattern,
            false,
            rule.multiline,
            &mut compilation_errors,
        ) {
            compiled.replace.push(CompiledReplaceRule {
                regex,
                template: rule.replace_with.clone(),
                name: rule.name.clone(),
            });
        }
    }

    for rule in &config.review_rules {
        if let Some(regex) = build_regex(&rule.name, &rule.pattern, true, false, &mut compilation_errors)
        {
            compiled.review.push(CompiledReviewRule {
                regex,
                name: rule.name.clone(),
                category: rule.category,
            });
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(ScrubError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!(
            "Finished compiling rules. Total compiled: {}.",
            compiled.line.len() + compiled.replace.len() + compiled.review.len()
        );
        Ok(compiled)
    }
}

/// Gets a `CompiledRules` instance from the cache or compiles it if not found.
///
/// This is the public entry point for retrieving compiled rules. It returns
/// an `Arc` to a `CompiledRules` instance, allowing for cheap sharing.
pub fn get_or_compile_rules(config: &ScrubConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_RULES_CACHE.read().unwrap();
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", &cache_key);
            return Ok(Arc::clone(rules));
        }
    } // Read lock is released here.

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled = compile_rules(config)?;
    let compiled_arc = Arc::new(compiled);

    COMPILED_RULES_CACHE
        .write()
        .unwrap()
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached rules for key: {}", &cache_key);
    Ok(compiled_arc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LineRule, ReplaceRule};

    #[test]
    fn compiles_default_rules() {
        let config = ScrubConfig::load_default_rules().unwrap();
        let compiled = compile_rules(&config).unwrap();
        assert_eq!(compiled.line.len(), config.line_rules.len());
        assert_eq!(compiled.replace.len(), config.replace_rules.len());
        assert_eq!(compiled.review.len(), config.review_rules.len());
    }

    #[test]
    fn line_rules_are_case_insensitive() {
        let config = ScrubConfig {
            line_rules: vec![LineRule {
                name: "caps".to_string(),
                pattern: "^abc$".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let compiled = compile_rules(&config).unwrap();
        assert!(compiled.line[0].regex.is_match("ABC"));
    }

    #[test]
    fn replace_rules_are_case_sensitive() {
        let config = ScrubConfig {
            replace_rules: vec![ReplaceRule {
                name: "exact".to_string(),
                pattern: "abc".to_string(),
                replace_with: "x".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let compiled = compile_rules(&config).unwrap();
        assert!(!compiled.replace[0].regex.is_match("ABC"));
        assert!(compiled.replace[0].regex.is_match("abc"));
    }

    #[test]
    fn oversized_pattern_is_rejected() {
        let config = ScrubConfig {
            line_rules: vec![LineRule {
                name: "huge".to_string(),
                pattern: "a".repeat(MAX_PATTERN_LENGTH + 1),
                ..Default::default()
            }],
            ..Default::default()
        };
        let err = compile_rules(&config).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum allowed"));
    }

    #[test]
    fn cache_returns_shared_instance() {
        let config = ScrubConfig::load_default_rules().unwrap();
        let first = get_or_compile_rules(&config).unwrap();
        let second = get_or_compile_rules(&config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
