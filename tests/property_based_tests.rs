//! Property-Based Tests
//!
//! Invariants checked over generated inputs:
//! - Reading order is deterministic
//! - Confidences stay within [0, 1]
//! - Quality scores stay within [0, 1]
//! - Correction output is a fixed point

use ocr_aggregate::models::{BoundingBox, Language, TextRegion};
use ocr_aggregate::services::aggregation::{order_regions, Aggregator};
use ocr_aggregate::services::{correction, quality};
use proptest::prelude::*;

/// Fragments that exercise the correction tables when glued together.
const FRAGMENTS: &[&str] = &[
    "مرسوم", "رقم", "قرار", "وزاري", "مشترك", "المرسوم", "الجمهورية", "الجزائرية",
    "الجمهوريه", "وزارة", "العدل", "المورخ", "في", "12", "٢٠٢٠", "/", " / ", "2020",
    "\u{FEFB}", "\u{FDF2}", "\u{FEDF}", "\u{200F}", "\u{202B}", "\u{2066}", " ", "   ",
    "\n", "Republique", "Algerienne", "Journal", "Officiel", "JournalOfficiel", "Daira",
    "ماى", "جانفى", "Article", ".", "1",
];

fn glued_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..24).prop_map(|parts| parts.concat())
}

fn language() -> impl Strategy<Value = Language> {
    prop_oneof![Just(Language::Ar), Just(Language::Fr), Just(Language::Mixed)]
}

fn region() -> impl Strategy<Value = TextRegion> {
    (
        "[a-zA-Zé ]{0,12}|[\u{0621}-\u{064A} ]{0,12}",
        0.0f64..800.0,
        0.0f64..1200.0,
        any::<f64>(),
        language(),
    )
        .prop_map(|(text, x, y, confidence, language)| {
            TextRegion::new(text, BoundingBox::new(x, y, 40.0, 12.0), confidence, language)
        })
}

fn pages() -> impl Strategy<Value = Vec<Vec<TextRegion>>> {
    prop::collection::vec(prop::collection::vec(region(), 0..12), 0..5)
}

/// Property: ordering the same regions twice gives the same sequence
#[test]
fn proptest_ordering_is_deterministic() {
    proptest!(|(regions in prop::collection::vec(region(), 0..30))| {
        let once = order_regions(&regions, 10.0);
        let twice = order_regions(&regions, 10.0);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.len(), regions.len());
        for r in &regions {
            prop_assert!(once.contains(r));
        }
    });
}

/// Property: every confidence consumed and the document average are in [0, 1]
#[test]
fn proptest_confidence_bounds() {
    proptest!(|(pages in pages())| {
        for region in pages.iter().flatten() {
            prop_assert!((0.0..=1.0).contains(&region.confidence));
        }
        let result = Aggregator::default().aggregate(&pages);
        let avg = result.metadata().average_confidence;
        prop_assert!((0.0..=1.0).contains(&avg), "average {}", avg);
        for page in result.page_breakdowns() {
            prop_assert!((0.0..=1.0).contains(&page.average_confidence));
        }
    });
}

/// Property: quality scores are bounded for arbitrary text
#[test]
fn proptest_quality_bounds() {
    proptest!(|(text in "\\PC{0,400}")| {
        let metrics = quality::score(&text);
        for score in [
            metrics.coherence_score,
            metrics.readability_score,
            metrics.completeness_score,
            metrics.overall_score,
        ] {
            prop_assert!((0.0..=1.0).contains(&score), "score {} for {:?}", score, text);
        }
    });
}

/// Property: quality scores are bounded for aggregated documents
#[test]
fn proptest_document_quality_bounds() {
    proptest!(|(pages in pages())| {
        let metrics = Aggregator::default().aggregate(&pages).quality_metrics;
        prop_assert!((0.0..=1.0).contains(&metrics.overall_score));
        prop_assert!((0.0..=1.0).contains(&metrics.completeness_score));
    });
}

/// Property: correcting corrected text changes nothing (glued legal fragments)
#[test]
fn proptest_correction_idempotent_on_fragments() {
    proptest!(|(text in glued_text())| {
        let once = correction::correct(&text).corrected_text;
        let twice = correction::correct(&once).corrected_text;
        prop_assert_eq!(twice, once);
    });
}

/// Property: correcting corrected text changes nothing (arbitrary Unicode)
#[test]
fn proptest_correction_idempotent_on_unicode() {
    proptest!(|(text in "\\PC{0,200}")| {
        let once = correction::correct(&text).corrected_text;
        let twice = correction::correct(&once).corrected_text;
        prop_assert_eq!(twice, once);
    });
}

/// Property: a glued run of number words of any length settles in one call
#[test]
fn proptest_glued_number_runs_settle() {
    const NOUNS: &[&str] = &["مرسوم", "المرسوم", "قرار وزاري", "مقرر"];
    proptest!(|(noun in prop::sample::select(NOUNS), count in 1usize..400)| {
        let text = format!("{}{}", noun, "رقم".repeat(count));
        let once = correction::correct(&text).corrected_text;
        prop_assert!(once.ends_with(noun), "{:?}", once);
        let twice = correction::correct(&once).corrected_text;
        prop_assert_eq!(twice, once);
    });
}
