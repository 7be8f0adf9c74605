//! Final layout normalization of the corrected document text.
//!
//! Runs after the correction engine and only touches whitespace. What it
//! changed is reported as `autoCorrections`.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::AutoCorrections;
use crate::utils::char_len;

static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{3,}").unwrap());
static BLANK_LINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{4,}").unwrap());
static TRAILING_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

/// Collapse space runs of three or more to one space, runs of four or more
/// newlines to a paragraph break, and strip trailing spaces on each line.
pub fn normalize_layout(text: &str) -> (String, AutoCorrections) {
    let mut suggestions = Vec::new();

    if SPACE_RUN.is_match(text) {
        suggestions.push("Collapsed runs of three or more spaces".to_string());
    }
    if BLANK_LINE_RUN.is_match(text) {
        suggestions.push("Collapsed runs of four or more line breaks".to_string());
    }

    let normalized = SPACE_RUN.replace_all(text, " ");
    let normalized = BLANK_LINE_RUN.replace_all(&normalized, "\n\n");
    let normalized = TRAILING_SPACE.replace_all(&normalized, "");
    let normalized = normalized.trim().to_string();

    let removed = char_len(text).saturating_sub(char_len(&normalized));
    if removed > 0 {
        suggestions.push(format!("Removed {} redundant whitespace characters", removed));
    }

    let applied = suggestions.len();
    (normalized, AutoCorrections { applied, suggestions })
}
