//! Shared utility functions.
//!
//! This module contains reusable utilities used across the codebase:
//! - `text`: script detection and whitespace handling
//! - `format`: human-readable formatting (percentages, durations)

mod format;
mod text;

pub use format::{format_duration_ms, format_percent};
pub use text::{
    char_len, collapse_whitespace, contains_arabic, is_arabic_char, is_arabic_letter,
    is_latin_letter, script_counts,
};
