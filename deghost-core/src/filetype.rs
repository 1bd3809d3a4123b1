//! File typing and candidate filtering.
//!
//! The allow-set of extensions and the directory exclusion set are fixed,
//! language-agnostic lists. `FileKind` classifies a candidate by its
//! comment-marker convention; the kind gates style normalization and the
//! structured-data skip, never the review scan.
//!
//! License: MIT OR Apache-2.0

use std::path::Path;

/// File extensions eligible for processing (matched case-insensitively).
pub const CODE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "rs", "py", "css", "scss", "html", "md", "json", "toml", "yaml",
    "yml", "sh",
];

/// Directory names excluded from traversal at any depth.
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "target",
    ".next",
    "__pycache__",
    ".venv",
    "venv",
    "coverage",
    ".nyc_output",
];

/// Comment-marker family of a candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// C-style `//` line comments and `/** */` doc blocks.
    Slash,
    /// `#` line comments.
    Hash,
    /// Comment syntax unknown or too risky to normalize; transforms still run.
    Other,
    /// Structured data with no comment syntax; only the review scan applies.
    Data,
}

impl FileKind {
    /// Classifies an extension (without leading dot, any case).
    pub fn from_extension(ext: &str) -> FileKind {
        match ext.to_ascii_lowercase().as_str() {
            "js" | "jsx" | "ts" | "tsx" | "rs" => FileKind::Slash,
            // toml/yaml also use `#`, but `#` occurs inside quoted values
            // (e.g. "#fff") often enough that normalizing them is unsafe.
            "py" | "sh" => FileKind::Hash,
            "json" => FileKind::Data,
            _ => FileKind::Other,
        }
    }

    /// Classifies a path by its extension; `Other` when there is none.
    pub fn from_path(path: &Path) -> FileKind {
        path.extension()
            .and_then(|e| e.to_str())
            .map(FileKind::from_extension)
            .unwrap_or(FileKind::Other)
    }

    /// Whether the line-removal, replacement, cleanup, and normalization
    /// stages apply to this kind. `Data` files go straight to the review scan.
    pub fn has_comment_syntax(&self) -> bool {
        !matches!(self, FileKind::Data)
    }
}

/// Whether a file's extension is in the allow-set.
pub fn is_candidate(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            CODE_EXTENSIONS.iter().any(|allowed| *allowed == ext)
        })
        .unwrap_or(false)
}

/// Whether a directory name is in the exclusion set.
///
/// The walker checks this against every path segment before descending, so
/// nested occurrences at any depth are excluded too.
pub fn is_skipped_dir(name: &str) -> bool {
    SKIP_DIRS.iter().any(|skip| *skip == name)
}
