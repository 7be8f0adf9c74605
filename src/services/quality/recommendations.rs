//! Recommendations derived from quality scores and document signals.

use serde::{Deserialize, Serialize};

use crate::models::{Language, PageBreakdown, QualityMetrics};
use crate::utils::format_percent;

/// Emitted alone when no threshold is crossed.
pub const POSITIVE_RECOMMENDATION: &str =
    "Good overall quality: no issues detected in the aggregated text";

/// Thresholds below which a recommendation is emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    pub coherence_threshold: f64,
    pub readability_threshold: f64,
    pub completeness_threshold: f64,
    /// Document-level average OCR confidence.
    pub confidence_threshold: f64,
    /// Share of mixed-language pages strictly above which detection is questioned.
    pub mixed_pages_ratio: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            coherence_threshold: 0.7,
            readability_threshold: 0.7,
            completeness_threshold: 0.7,
            confidence_threshold: 0.8,
            mixed_pages_ratio: 0.5,
        }
    }
}

/// Document-level inputs to the recommendations that are not part of the scores.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DocumentSignals {
    pub average_confidence: f64,
    pub pages: usize,
    pub mixed_pages: usize,
}

impl DocumentSignals {
    pub fn from_breakdowns(average_confidence: f64, breakdowns: &[PageBreakdown]) -> Self {
        Self {
            average_confidence,
            pages: breakdowns.len(),
            mixed_pages: breakdowns
                .iter()
                .filter(|p| p.language == Language::Mixed)
                .count(),
        }
    }
}

/// Derive recommendations. Never returns an empty list.
pub fn recommend(
    metrics: &QualityMetrics,
    signals: &DocumentSignals,
    thresholds: &QualityThresholds,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if metrics.coherence_score < thresholds.coherence_threshold {
        recommendations.push(
            "Low coherence: check the document structure and the order of the pages".to_string(),
        );
    }
    if metrics.readability_score < thresholds.readability_threshold {
        recommendations.push(
            "Low readability: noisy characters detected, consider re-running OCR with a cleaner scan"
                .to_string(),
        );
    }
    if metrics.completeness_score < thresholds.completeness_threshold {
        recommendations
            .push("Low completeness: check whether pages or sections are missing".to_string());
    }
    if signals.average_confidence < thresholds.confidence_threshold {
        recommendations.push(format!(
            "Low average OCR confidence ({}): consider re-processing the source images",
            format_percent(signals.average_confidence)
        ));
    }
    if signals.pages > 0
        && signals.mixed_pages as f64 / signals.pages as f64 > thresholds.mixed_pages_ratio
    {
        recommendations.push(format!(
            "{} of {} pages are mixed-language: review the language detection",
            signals.mixed_pages, signals.pages
        ));
    }

    if recommendations.is_empty() {
        recommendations.push(POSITIVE_RECOMMENDATION.to_string());
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(coherence: f64, readability: f64, completeness: f64) -> QualityMetrics {
        QualityMetrics {
            coherence_score: coherence,
            readability_score: readability,
            completeness_score: completeness,
            overall_score: (coherence + readability + completeness) / 3.0,
        }
    }

    fn signals(confidence: f64, pages: usize, mixed_pages: usize) -> DocumentSignals {
        DocumentSignals {
            average_confidence: confidence,
            pages,
            mixed_pages,
        }
    }

    #[test]
    fn test_no_issue_yields_single_positive_statement() {
        let recs = recommend(
            &metrics(0.9, 0.8, 0.7),
            &signals(0.95, 2, 1),
            &QualityThresholds::default(),
        );
        assert_eq!(recs, vec![POSITIVE_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn test_each_threshold_emits_one_recommendation() {
        let recs = recommend(
            &metrics(0.5, 0.5, 0.3),
            &signals(0.6, 3, 2),
            &QualityThresholds::default(),
        );
        assert_eq!(recs.len(), 5);
        assert!(recs[0].contains("coherence"));
        assert!(recs[1].contains("readability"));
        assert!(recs[2].contains("completeness"));
        assert!(recs[3].contains("60.0%"));
        assert!(recs[4].starts_with("2 of 3 pages"));
        assert!(!recs.contains(&POSITIVE_RECOMMENDATION.to_string()));
    }

    #[test]
    fn test_half_mixed_is_not_more_than_half() {
        let recs = recommend(
            &metrics(0.9, 0.9, 0.9),
            &signals(0.9, 4, 2),
            &QualityThresholds::default(),
        );
        assert_eq!(recs, vec![POSITIVE_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn test_signals_from_breakdowns() {
        let page = |n, language| PageBreakdown {
            page_number: n,
            region_count: 1,
            text_length: 10,
            average_confidence: 0.9,
            language,
        };
        let breakdowns = vec![page(1, Language::Mixed), page(2, Language::Ar), page(3, Language::Mixed)];
        let signals = DocumentSignals::from_breakdowns(0.9, &breakdowns);
        assert_eq!(signals.pages, 3);
        assert_eq!(signals.mixed_pages, 2);
    }
}
