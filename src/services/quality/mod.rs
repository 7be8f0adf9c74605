//! Quality scoring for aggregated document text.
//!
//! Three heuristic sub-scores, each clamped to `[0,1]`, and their mean:
//!
//! - coherence: structural markers, page markers, plausible sentence length
//! - readability: share of noise characters, bilingual balance
//! - completeness: overall length, legal-pattern coverage

mod recommendations;

use std::sync::LazyLock;

use regex::Regex;

use crate::models::QualityMetrics;
use crate::services::aggregation::DEFAULT_PAGE_MARKER;
use crate::utils::{char_len, is_arabic_char, script_counts};

pub use recommendations::{recommend, DocumentSignals, QualityThresholds, POSITIVE_RECOMMENDATION};

const COHERENCE_BASE: f64 = 0.5;
const READABILITY_BASE: f64 = 0.5;
const COMPLETENESS_BASE: f64 = 0.3;

/// Noise ratio under which the text is considered clean.
const MAX_NOISE_RATIO: f64 = 0.05;

/// Sentence fragments this short (in chars) are ignored when averaging.
const MIN_SENTENCE_CHARS: usize = 10;

/// Bonus per legal-pattern family present.
const LEGAL_FAMILY_BONUS: f64 = 0.075;

static STRUCTURE_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:article|chapitre|chapter|section|titre)\b|المادة|الفصل|الباب|القسم")
        .unwrap()
});

/// Legal-pattern families for completeness: dates, numbering, institutions, connectives.
static LEGAL_FAMILIES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"\b\d{1,2}\s*[/.\-]\s*\d{1,2}\s*[/.\-]\s*\d{2,4}\b").unwrap(),
        Regex::new(
            r"(?i)\b(?:article|art\.|chapitre|section|titre)\s*(?:\d+|premier|1er|[ivxlc]+)\b|(?:المادة|الفصل|الباب|القسم)\s*(?:\d+|الأولى|الأول)",
        )
        .unwrap(),
        Regex::new(
            r"(?i)\b(?:ministère|wilaya|daïra|commune|tribunal|cour|conseil|république|assemblée)\b|وزارة|ولاية|دائرة|بلدية|المحكمة|مجلس|الجمهورية",
        )
        .unwrap(),
        Regex::new(
            r"(?i)\b(?:vu|considérant|attendu|décide|décrète|arrête|ordonne)\b|بمقتضى|نظرا|وبعد|يقرر|يرسم|يأمر",
        )
        .unwrap(),
    ]
});

/// Characters that count as ordinary punctuation for readability.
fn is_basic_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '"' | '(' | ')' | '[' | ']' | '-' | '/'
            | '%' | '°' | '«' | '»' | '=' | '،' | '؛' | '؟'
    )
}

fn is_noise_char(c: char) -> bool {
    !(c.is_alphanumeric()
        || c == '_'
        || c.is_whitespace()
        || is_arabic_char(c)
        || is_basic_punctuation(c))
}

/// Stateless scorer; only the page-marker shape is configurable.
#[derive(Debug, Clone)]
pub struct QualityScorer {
    page_marker: Option<Regex>,
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_MARKER)
    }
}

impl QualityScorer {
    /// Build a scorer that recognizes page markers rendered from `page_marker`.
    pub fn new(page_marker: &str) -> Self {
        Self {
            page_marker: page_marker_pattern(page_marker),
        }
    }

    pub fn score(&self, text: &str) -> QualityMetrics {
        let coherence_score = self.coherence(text);
        let readability_score = readability(text);
        let completeness_score = completeness(text);

        QualityMetrics {
            coherence_score,
            readability_score,
            completeness_score,
            overall_score: (coherence_score + readability_score + completeness_score) / 3.0,
        }
    }

    fn coherence(&self, text: &str) -> f64 {
        let mut score = COHERENCE_BASE;
        if STRUCTURE_MARKERS.is_match(text) {
            score += 0.2;
        }
        if self.page_marker.as_ref().is_some_and(|re| re.is_match(text)) {
            score += 0.1;
        }
        if average_sentence_length(text).is_some_and(|avg| avg > 20.0 && avg < 200.0) {
            score += 0.2;
        }
        score.min(1.0)
    }
}

/// Score a text with the default page marker.
pub fn score(text: &str) -> QualityMetrics {
    QualityScorer::default().score(text)
}

/// Regex matching any rendering of a page-marker template.
fn page_marker_pattern(template: &str) -> Option<Regex> {
    let literal = template.trim();
    if literal.is_empty() {
        return None;
    }
    let pattern = regex::escape(literal).replace(r"\{page\}", r"\d+");
    Regex::new(&pattern).ok()
}

/// Mean length in chars of the sentences longer than the fragment cutoff.
fn average_sentence_length(text: &str) -> Option<f64> {
    let lengths: Vec<usize> = text
        .split(['.', '!', '?'])
        .map(|s| char_len(s.trim()))
        .filter(|&len| len > MIN_SENTENCE_CHARS)
        .collect();

    if lengths.is_empty() {
        return None;
    }
    Some(lengths.iter().sum::<usize>() as f64 / lengths.len() as f64)
}

fn readability(text: &str) -> f64 {
    let mut score = READABILITY_BASE;

    let total = char_len(text);
    if total > 0 {
        let noise = text.chars().filter(|&c| is_noise_char(c)).count();
        if (noise as f64 / total as f64) < MAX_NOISE_RATIO {
            score += 0.3;
        }
    }

    let (arabic, latin) = script_counts(text);
    if arabic > 0 && latin > 0 {
        score += 0.2;
    }

    score.min(1.0)
}

/// Number of legal-pattern families present in the text.
pub fn legal_families_matched(text: &str) -> usize {
    LEGAL_FAMILIES.iter().filter(|re| re.is_match(text)).count()
}

fn completeness(text: &str) -> f64 {
    let mut score = COMPLETENESS_BASE;

    let len = char_len(text);
    if len > 100 {
        score += 0.2;
    }
    if len > 1000 {
        score += 0.2;
    }
    score += LEGAL_FAMILY_BONUS * legal_families_matched(text) as f64;

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_text_gets_base_scores() {
        let metrics = score("");
        assert!(approx(metrics.coherence_score, 0.5));
        assert!(approx(metrics.readability_score, 0.5));
        assert!(approx(metrics.completeness_score, 0.3));
        assert!(approx(metrics.overall_score, 1.3 / 3.0));
    }

    #[test]
    fn test_coherence_bonuses() {
        let scorer = QualityScorer::default();
        assert!(approx(scorer.coherence("bonjour"), 0.5));
        assert!(approx(scorer.coherence("Article 3"), 0.7));
        assert!(approx(scorer.coherence("Article 3.\n=== PAGE 2 ==="), 0.8));
        let text = "=== PAGE 1 ===\nArticle 1. Le présent arrêté fixe les modalités d'application.";
        assert!(approx(scorer.coherence(text), 1.0));
    }

    #[test]
    fn test_custom_page_marker() {
        let scorer = QualityScorer::new("--- p{page} ---");
        assert!(approx(scorer.coherence("--- p7 ---"), 0.6));
        assert!(approx(scorer.coherence("=== PAGE 7 ==="), 0.5));
    }

    #[test]
    fn test_sentence_length_window() {
        assert_eq!(average_sentence_length("short. tiny!"), None);
        let avg = average_sentence_length("This sentence has thirty chars. ok.").unwrap();
        assert!(approx(avg, 30.0));
        let long = "x".repeat(250);
        assert!(approx(average_sentence_length(&long).unwrap(), 250.0));
        assert!(approx(QualityScorer::default().coherence(&long), 0.5));
    }

    #[test]
    fn test_readability_noise_and_balance() {
        assert!(approx(readability("Le décret est publié."), 0.8));
        assert!(approx(readability("Le décret المرسوم"), 1.0));
        assert!(approx(readability("#### @@@ ~~~ abc"), 0.5));
        assert!(approx(readability("@@@ abc المادة"), 0.7));
    }

    #[test]
    fn test_completeness_short_plain_text() {
        assert!(approx(completeness("Texte court sans motif particulier"), 0.3));
    }

    #[test]
    fn test_completeness_long_legal_text() {
        let mut text = String::from("Article 1 : publié le 12/03/2020. ");
        while char_len(&text) <= 1000 {
            text.push_str("Le texte continue sans autre motif particulier. ");
        }
        assert_eq!(legal_families_matched(&text), 2);
        let value = completeness(&text);
        assert!(approx(value, 0.85), "{value}");
    }

    #[test]
    fn test_legal_families() {
        assert_eq!(legal_families_matched("le 5/11/1990"), 1);
        assert_eq!(legal_families_matched("المادة 12"), 1);
        assert_eq!(legal_families_matched("Vu la loi, le Ministère"), 2);
        assert_eq!(legal_families_matched("بمقتضى القانون"), 1);
        assert_eq!(legal_families_matched("rien"), 0);
    }

    #[test]
    fn test_all_families_clamped() {
        let text = format!(
            "{}Article 2 du 01/01/2020, Vu le Ministère",
            "lorem ipsum ".repeat(100)
        );
        let value = completeness(&text);
        assert!(value <= 1.0);
        assert!(approx(value, 1.0));
    }

    #[test]
    fn test_overall_is_mean() {
        let metrics = score("=== PAGE 1 ===\nArticle 1. Vu la loi du 12/03/2020 portant organisation.");
        let mean =
            (metrics.coherence_score + metrics.readability_score + metrics.completeness_score) / 3.0;
        assert!(approx(metrics.overall_score, mean));
    }
}
