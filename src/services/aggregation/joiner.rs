//! Joins ordered region texts into one page-level block.
//!
//! Regions are line-granular, so each text is flattened to a single line and
//! the separator between two consecutive texts is picked heuristically:
//! paragraph break after terminal punctuation, a synthesized sentence
//! boundary before a capitalized continuation, a paragraph break when the
//! script switches between Arabic and non-Arabic, and a plain space otherwise.

use crate::utils::{collapse_whitespace, contains_arabic};

const PARAGRAPH_BREAK: &str = "\n\n";
const SENTENCE_BREAK: &str = ". ";
const WORD_BREAK: &str = " ";

/// Flatten one region text: trim, turn newlines into spaces, and collapse
/// whitespace runs.
pub fn clean_region_text(text: &str) -> String {
    collapse_whitespace(text)
}

/// Separator to place between two cleaned, non-empty texts.
pub fn separator(current: &str, next: &str) -> &'static str {
    if current.ends_with(['.', '!', '?']) {
        return PARAGRAPH_BREAK;
    }

    let starts_sentence = next.chars().next().is_some_and(char::is_uppercase);
    if starts_sentence && !current.ends_with(['.', ',', ';', ':', '!', '?']) {
        return SENTENCE_BREAK;
    }

    if contains_arabic(current) != contains_arabic(next) {
        return PARAGRAPH_BREAK;
    }

    WORD_BREAK
}

/// Join ordered texts into one block. Texts that clean to nothing are skipped.
pub fn join_texts<S: AsRef<str>>(texts: &[S]) -> String {
    let cleaned: Vec<String> = texts
        .iter()
        .map(|t| clean_region_text(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect();

    let mut joined = String::with_capacity(cleaned.iter().map(|t| t.len() + 2).sum());
    for (i, text) in cleaned.iter().enumerate() {
        if i > 0 {
            joined.push_str(separator(&cleaned[i - 1], text));
        }
        joined.push_str(text);
    }
    joined
}
