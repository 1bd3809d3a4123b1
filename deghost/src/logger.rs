// deghost/src/logger.rs
//! Logger bootstrap for the CLI.
//!
//! Wraps `env_logger` so `RUST_LOG` still works, while the `--quiet` and
//! `--debug` flags can force a level. Safe to call more than once (tests
//! initialize it per process).

use log::LevelFilter;

/// Initializes the global logger.
///
/// A `Some(level)` forces that level; `None` defers entirely to `RUST_LOG`.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    // Logs go to stderr; the report owns stdout.
    let _ = builder.format_timestamp(None).try_init();
}
