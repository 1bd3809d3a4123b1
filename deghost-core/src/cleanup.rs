//! Structural cleanup and comment-style normalization.
//!
//! These passes use fixed, built-in patterns rather than the configurable
//! rule tables: they repair degenerate artifacts the earlier stages leave
//! behind (empty comment shells, runs of blank lines) and enforce marker
//! spacing conventions per file family.
//!
//! License: MIT OR Apache-2.0

use once_cell::sync::Lazy;
use regex::Regex;

use crate::filetype::FileKind;

/// `/* */` and wider empty block-comment shells.
static EMPTY_BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*+\s*\*+/").unwrap());

/// Three or more consecutive near-empty `//` comment lines. Each repetition
/// owns its trailing newline, so the whole run is consumed however long it
/// is, not just the first three lines.
static EMPTY_COMMENT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n([ \t]*//[ \t]*\n){3,}").unwrap());

/// Runs of four or more newlines.
static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{4,}").unwrap());

/// `//` not followed by a space, another slash, or `!`, and not part of a
/// `://` URL scheme or a longer slash run.
static SLASH_MARKER_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^|[^:/])//([^\s/!])").unwrap());

/// Doc-block annotation opener split across lines: `/**` + ` * @...`.
static DOC_ANNOTATION_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*\*\s+\*\s*@").unwrap());

/// `#` not followed by a space, another `#`, or `!` (shebangs, banners).
static HASH_MARKER_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"#([^\s#!])").unwrap());

/// Collapses degenerate comment artifacts left behind by the removal and
/// replacement stages.
///
/// In order: empty block-comment shells are deleted, runs of three or more
/// near-empty `//` lines collapse to nothing, and runs of four or more
/// newlines collapse to three (two blank lines).
pub fn collapse_comment_artifacts(content: &str) -> String {
    let content = EMPTY_BLOCK_COMMENT.replace_all(content, "");
    let content = EMPTY_COMMENT_RUN.replace_all(&content, "\n");
    let content = EXCESS_BLANK_LINES.replace_all(&content, "\n\n\n");
    content.into_owned()
}

/// Enforces the canonical single-space-after-marker style for the file's
/// comment family, without altering comment content otherwise.
///
/// Families without a safe convention (`Other`, `Data`) pass through
/// unchanged.
pub fn normalize_comment_style(content: &str, kind: FileKind) -> String {
    match kind {
        FileKind::Slash => {
            let content = SLASH_MARKER_SPACING.replace_all(content, "$1// $2");
            let content = DOC_ANNOTATION_SPACING.replace_all(&content, "/** @");
            content.into_owned()
        }
        FileKind::Hash => HASH_MARKER_SPACING.replace_all(content, "# $1").into_owned(),
        FileKind::Other | FileKind::Data => content.to_string(),
    }
}
