// deghost/src/walker.rs
//! Candidate-file discovery.
//!
//! A lazy, single pass over the tree: excluded directory names are pruned
//! before descent, so nothing under them is ever enumerated, and only files
//! whose extension is in the allow-set are yielded. Unreadable entries are
//! logged and skipped; discovery itself has no other side effects.

use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use deghost_core::filetype::{is_candidate, is_skipped_dir};

/// Returns a lazy iterator over candidate file paths under `root`.
///
/// One pass per invocation; the iterator is not restartable.
pub fn discover(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            // Never prune the root itself, even if its own name is excluded;
            // the caller asked for this tree explicitly.
            if entry.depth() == 0 {
                return true;
            }
            if entry.file_type().is_dir() {
                let excluded = entry
                    .file_name()
                    .to_str()
                    .map(is_skipped_dir)
                    .unwrap_or(false);
                return !excluded;
            }
            true
        })
        .filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Failed to access entry during discovery: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_candidate(entry.path()))
        .map(|entry| entry.into_path())
}
