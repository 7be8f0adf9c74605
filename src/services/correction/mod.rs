//! OCR text correction engine.
//!
//! Applies the rewrite tables in a fixed stage order:
//!
//! 1. Strip bidirectional control characters
//! 2. Re-split concatenated words (phrase splits, number reordering, letter/digit fallback)
//! 3. Expand Arabic presentation-form ligatures
//! 4. Fix misrecognized legal terms and normalize date phrases
//! 5. Collapse long space runs and trim
//!
//! The engine holds no state; every call is a pure function of its input.
//! The returned text is a fixed point: correcting it again returns it unchanged.

mod rules;

use std::sync::LazyLock;

use regex::Regex;

pub use rules::{Replacement, RewriteRule, RuleCategory, LEGAL_RULES, WORD_SPLIT_RULES};

use rules::{ligature_expansion, BIDI_CONTROLS};

/// Upper bound on full staged passes before giving up on settling.
const MAX_SETTLE_PASSES: usize = 8;

static LONG_SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {3,}").unwrap());

/// Output of a correction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionOutcome {
    pub corrected_text: String,
    /// Human-readable log, in stage order.
    pub corrections: Vec<String>,
    /// Word-split rules that changed the text (counted per rule, not per match).
    pub words_separated: usize,
    /// Ligature code points expanded.
    pub ligatures_fixed: usize,
    /// Whether any directional control character was removed.
    pub rtl_fixed: bool,
    /// Legal and date rules that changed the text.
    pub legal_fixed: usize,
}

/// Counters for one staged pass.
#[derive(Debug, Default)]
struct PassStats {
    bidi_removed: usize,
    split_rules: Vec<&'static RewriteRule>,
    ligatures_fixed: usize,
    legal_fixed: usize,
}

impl PassStats {
    fn merge(&mut self, other: PassStats) {
        self.bidi_removed += other.bidi_removed;
        for rule in other.split_rules {
            if !self.split_rules.iter().any(|r| std::ptr::eq(*r, rule)) {
                self.split_rules.push(rule);
            }
        }
        self.ligatures_fixed += other.ligatures_fixed;
        self.legal_fixed += other.legal_fixed;
    }

    fn into_outcome(self, corrected_text: String) -> CorrectionOutcome {
        let mut corrections = Vec::new();
        if self.bidi_removed > 0 {
            corrections.push(format!(
                "Removed {} bidirectional control characters",
                self.bidi_removed
            ));
        }
        corrections.extend(self.split_rules.iter().map(|r| r.description.clone()));
        if self.ligatures_fixed > 0 {
            corrections.push(format!("Ligatures normalized: {}", self.ligatures_fixed));
        }
        if self.legal_fixed > 0 {
            corrections.push(format!("Legal corrections: {}", self.legal_fixed));
        }

        CorrectionOutcome {
            corrected_text,
            corrections,
            words_separated: self.split_rules.len(),
            ligatures_fixed: self.ligatures_fixed,
            rtl_fixed: self.bidi_removed > 0,
            legal_fixed: self.legal_fixed,
        }
    }
}

/// Stateless correction engine over the static rule tables.
#[derive(Debug, Clone, Copy)]
pub struct CorrectionEngine {
    word_split_rules: &'static [RewriteRule],
    legal_rules: &'static [RewriteRule],
}

impl Default for CorrectionEngine {
    fn default() -> Self {
        Self {
            word_split_rules: WORD_SPLIT_RULES.as_slice(),
            legal_rules: LEGAL_RULES.as_slice(),
        }
    }
}

impl CorrectionEngine {
    /// Create an engine over the built-in tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Correct a text.
    ///
    /// One staged pass is normally enough. When a later stage exposes a
    /// pattern an earlier stage handles (a ligature expanding next to a
    /// digit, for instance), further passes run until the text settles.
    pub fn correct(&self, text: &str) -> CorrectionOutcome {
        let (mut current, mut stats) = self.run_pass(text);

        for pass in 1..MAX_SETTLE_PASSES {
            let (next, next_stats) = self.run_pass(&current);
            if next == current {
                break;
            }
            tracing::debug!("Correction pass {} changed text further", pass + 1);
            stats.merge(next_stats);
            current = next;

            if pass + 1 == MAX_SETTLE_PASSES {
                tracing::warn!(
                    "Correction did not settle after {} passes ({} chars)",
                    MAX_SETTLE_PASSES,
                    current.chars().count()
                );
            }
        }

        stats.into_outcome(current)
    }

    fn run_pass(&self, text: &str) -> (String, PassStats) {
        let mut stats = PassStats::default();

        let (mut text, removed) = strip_bidi_controls(text);
        stats.bidi_removed = removed;

        for rule in self.word_split_rules {
            if let Some(next) = rule.apply(&text) {
                tracing::debug!("Word split rule fired: {}", rule.description);
                stats.split_rules.push(rule);
                text = next;
            }
        }

        let (expanded, ligatures) = expand_ligatures(&text);
        text = expanded;
        stats.ligatures_fixed = ligatures;

        for rule in self.legal_rules {
            if let Some(next) = rule.apply(&text) {
                tracing::debug!("Legal rule fired: {}", rule.description);
                stats.legal_fixed += 1;
                text = next;
            }
        }

        (normalize_spacing(&text), stats)
    }
}

/// Correct a text with the built-in tables.
pub fn correct(text: &str) -> CorrectionOutcome {
    CorrectionEngine::new().correct(text)
}

/// Remove directional control characters, returning how many were removed.
fn strip_bidi_controls(text: &str) -> (String, usize) {
    let stripped: String = text.chars().filter(|c| !BIDI_CONTROLS.contains(c)).collect();
    let removed = text.chars().count() - stripped.chars().count();
    (stripped, removed)
}

/// Expand presentation-form ligatures, returning how many were expanded.
fn expand_ligatures(text: &str) -> (String, usize) {
    let mut count = 0;
    let mut expanded = String::with_capacity(text.len());
    for c in text.chars() {
        match ligature_expansion(c) {
            Some(base) => {
                expanded.push_str(base);
                count += 1;
            }
            None => expanded.push(c),
        }
    }
    (expanded, count)
}

/// Collapse runs of three or more spaces to two, then trim.
fn normalize_spacing(text: &str) -> String {
    LONG_SPACE_RUN.replace_all(text, "  ").trim().to_string()
}
