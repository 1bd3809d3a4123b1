// deghost-core/src/lib.rs
//! # Deghost Core Library
//!
//! `deghost-core` provides the platform-independent logic for scrubbing
//! AI-generated footprints out of source text. It defines the ordered rule
//! tables that drive a scrub run, compiles them into efficient matchers, and
//! implements the transformation pipeline and the read-only review scan.
//!
//! The library is pure and stateless: it transforms input text according to
//! the configured rules, without any filesystem or application-state
//! concerns. Walking a tree, reading and writing files, and reporting are
//! the CLI's job.
//!
//! ## Modules
//!
//! * `config`: Defines the `LineRule`/`ReplaceRule`/`ReviewRule` tables and
//!   the `ScrubConfig` loading, merging, filtering, and validation surface.
//! * `compiler`: Compiles a config into cached `CompiledRules`.
//! * `engine`: The `ScrubEngine` pipeline (line removal, replacements,
//!   cleanup, normalization) and the review scan.
//! * `cleanup`: Fixed structural-cleanup and style-normalization passes.
//! * `filetype`: The extension allow-set, directory exclusion set, and
//!   `FileKind` comment-family classification.
//! * `stats`: `RunStats` and `Finding` accumulators.
//! * `errors`: The `ScrubError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use deghost_core::{FileKind, ScrubConfig, ScrubEngine};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ScrubConfig::load_default_rules()?;
//!     let engine = ScrubEngine::new(config)?;
//!
//!     let outcome = engine.scrub("// AI generated this function\nlet x = 1;\n", FileKind::Slash);
//!     assert_eq!(outcome.text, "let x = 1;\n");
//!     assert_eq!(outcome.lines_removed, 1);
//!
//!     let findings = engine.review("TODO: implement this", "notes.md");
//!     assert_eq!(findings.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `anyhow::Result`; the structured `ScrubError`
//! enum covers rule-compilation failures. The transformation stages
//! themselves are infallible: the rule tables are validated at load, so
//! pattern errors cannot surface at scrub time.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod cleanup;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod errors;
pub mod filetype;
pub mod stats;

/// Re-exports the public configuration types and functions for managing
/// scrub rules.
pub use config::{
    merge_rules, validate_rules, LineRule, ReplaceRule, ReviewCategory, ReviewRule, ScrubConfig,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ScrubError;

/// Re-exports the engine and its outcome type.
pub use engine::{ScrubEngine, ScrubOutcome};

/// Re-exports file typing and the fixed filter sets.
pub use filetype::{is_candidate, is_skipped_dir, FileKind, CODE_EXTENSIONS, SKIP_DIRS};

/// Re-exports run statistics and findings.
pub use stats::{Finding, RunStats};

/// Re-exports compiled-rule types for advanced usage.
pub use compiler::{compile_rules, get_or_compile_rules, CompiledRules};
