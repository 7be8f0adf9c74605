//! Document aggregation pipeline.
//!
//! Per page: drop blank regions, sort into reading order, classify the page
//! language, and join the texts under a page marker. The joined document is
//! then corrected, scored, and given a final whitespace normalization.
//!
//! Every call is independent; an [`Aggregator`] holds only configuration.

mod config;
mod error;
mod extract;
mod input;
mod joiner;
mod language;
mod normalize;
mod ordering;
mod summary;

use std::time::Instant;

use serde_json::Value;

use crate::models::{
    clamp_confidence, AggregationMetadata, AggregationResult, EnhancedAggregationResult,
    LanguageDistribution, PageBreakdown, TextRegion,
};
use crate::services::correction::CorrectionEngine;
use crate::services::quality::{
    recommend, DocumentSignals, QualityScorer, QualityThresholds, POSITIVE_RECOMMENDATION,
};
use crate::utils::char_len;

pub use config::{
    AggregationConfig, DEFAULT_MIXED_RATIO_THRESHOLD, DEFAULT_PAGE_MARKER,
    DEFAULT_SAME_LINE_TOLERANCE, PAGE_PLACEHOLDER,
};
pub use error::AggregationError;
pub use extract::extract_by_entity_type;
pub use input::{pages_from_json, pages_from_str};
pub use joiner::{clean_region_text, join_texts, separator};
pub use language::LanguageTally;
pub use normalize::normalize_layout;
pub use ordering::{order_regions, sort_in_reading_order};
pub use summary::summarize;

/// One page that produced text.
struct PageSection {
    text: String,
    breakdown: PageBreakdown,
}

/// Pages joined under their markers, before correction.
struct Assembly {
    text: String,
    metadata: AggregationMetadata,
    page_breakdowns: Vec<PageBreakdown>,
}

/// Aggregates the OCR regions of one document at a time.
#[derive(Debug, Clone)]
pub struct Aggregator {
    config: AggregationConfig,
    thresholds: QualityThresholds,
    engine: CorrectionEngine,
    scorer: QualityScorer,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(AggregationConfig::default(), QualityThresholds::default())
    }
}

impl Aggregator {
    pub fn new(config: AggregationConfig, thresholds: QualityThresholds) -> Self {
        let scorer = QualityScorer::new(&config.page_marker);
        Self {
            config,
            thresholds,
            engine: CorrectionEngine::new(),
            scorer,
        }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Run the full pipeline: assembly, correction, scoring, recommendations.
    pub fn aggregate(&self, pages: &[Vec<TextRegion>]) -> EnhancedAggregationResult {
        let started = Instant::now();
        let assembly = self.assemble(pages);

        let correction = self.engine.correct(&assembly.text);
        for entry in &correction.corrections {
            tracing::debug!("Correction: {}", entry);
        }

        let quality_metrics = self.scorer.score(&correction.corrected_text);
        let (aggregated_text, auto_corrections) = normalize_layout(&correction.corrected_text);

        let recommendations = if aggregated_text.is_empty() {
            vec![POSITIVE_RECOMMENDATION.to_string()]
        } else {
            let signals = DocumentSignals::from_breakdowns(
                assembly.metadata.average_confidence,
                &assembly.page_breakdowns,
            );
            recommend(&quality_metrics, &signals, &self.thresholds)
        };

        let mut metadata = assembly.metadata;
        metadata.processing_time_ms = elapsed_ms(started);

        tracing::info!(
            "Aggregated {} pages ({} regions): {} corrections, overall quality {:.2}, {} ms",
            metadata.total_pages,
            metadata.total_regions,
            correction.corrections.len(),
            quality_metrics.overall_score,
            metadata.processing_time_ms
        );

        EnhancedAggregationResult {
            base: AggregationResult {
                aggregated_text,
                metadata,
                page_breakdowns: assembly.page_breakdowns,
            },
            quality_metrics,
            recommendations,
            auto_corrections,
        }
    }

    /// Assemble pages only, without correction or scoring.
    pub fn aggregate_raw(&self, pages: &[Vec<TextRegion>]) -> AggregationResult {
        let started = Instant::now();
        let assembly = self.assemble(pages);

        let mut metadata = assembly.metadata;
        metadata.processing_time_ms = elapsed_ms(started);

        AggregationResult {
            aggregated_text: assembly.text,
            metadata,
            page_breakdowns: assembly.page_breakdowns,
        }
    }

    /// Decode a JSON page array (or `{"pages": [...]}`) and aggregate it.
    pub fn aggregate_value(&self, value: &Value) -> Result<EnhancedAggregationResult, AggregationError> {
        let pages = pages_from_json(value)?;
        Ok(self.aggregate(&pages))
    }

    /// Parse a JSON document and aggregate it.
    pub fn aggregate_json(&self, json: &str) -> Result<EnhancedAggregationResult, AggregationError> {
        let pages = pages_from_str(json)?;
        Ok(self.aggregate(&pages))
    }

    fn assemble(&self, pages: &[Vec<TextRegion>]) -> Assembly {
        let mut sections = Vec::new();
        let mut page_breakdowns = Vec::new();
        let mut distribution = LanguageDistribution::default();
        let mut confidence_sum = 0.0;

        for (index, regions) in pages.iter().enumerate() {
            for region in regions.iter().filter(|r| !r.is_blank()) {
                distribution.record(region.language);
                confidence_sum += clamp_confidence(region.confidence);
            }

            match self.assemble_page(index + 1, regions) {
                Some(section) => {
                    sections.push(section.text);
                    page_breakdowns.push(section.breakdown);
                }
                None => tracing::debug!("Page {} has no text, skipping", index + 1),
            }
        }

        let total_regions = distribution.total();
        let average_confidence = if total_regions > 0 {
            confidence_sum / total_regions as f64
        } else {
            0.0
        };

        Assembly {
            text: sections.join("\n\n"),
            metadata: AggregationMetadata {
                total_pages: pages.len(),
                total_regions,
                average_confidence,
                language_distribution: distribution,
                processing_time_ms: 0,
            },
            page_breakdowns,
        }
    }

    fn assemble_page(&self, page_number: usize, regions: &[TextRegion]) -> Option<PageSection> {
        let mut kept: Vec<TextRegion> = regions.iter().filter(|r| !r.is_blank()).cloned().collect();
        if kept.is_empty() {
            return None;
        }

        sort_in_reading_order(&mut kept, self.config.same_line_tolerance);
        let language = LanguageTally::from_regions(&kept).dominant(self.config.mixed_ratio_threshold);

        let texts: Vec<&str> = kept.iter().map(|r| r.text.as_str()).collect();
        let text = join_texts(&texts);
        if text.is_empty() {
            return None;
        }

        let average_confidence =
            kept.iter().map(|r| clamp_confidence(r.confidence)).sum::<f64>() / kept.len() as f64;
        tracing::debug!(
            "Page {}: {} regions kept of {}, language {}",
            page_number,
            kept.len(),
            regions.len(),
            language.as_str()
        );

        Some(PageSection {
            breakdown: PageBreakdown {
                page_number,
                region_count: regions.len(),
                text_length: char_len(&text),
                average_confidence,
                language,
            },
            text: format!("{}\n{}", self.config.page_marker_for(page_number), text),
        })
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Aggregate with default settings.
pub fn aggregate(pages: &[Vec<TextRegion>]) -> EnhancedAggregationResult {
    Aggregator::default().aggregate(pages)
}

/// Parse and aggregate a JSON document with default settings.
pub fn aggregate_json(json: &str) -> Result<EnhancedAggregationResult, AggregationError> {
    Aggregator::default().aggregate_json(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundingBox, Language};

    fn region(text: &str, x: f64, y: f64, confidence: f64, language: Language) -> TextRegion {
        TextRegion::new(text, BoundingBox::new(x, y, 100.0, 12.0), confidence, language)
    }

    #[test]
    fn test_pages_get_markers_in_order() {
        let pages = vec![
            vec![region("Page one text.", 0.0, 0.0, 0.9, Language::Fr)],
            vec![region("Page two text.", 0.0, 0.0, 0.9, Language::Fr)],
        ];
        let result = aggregate(&pages);
        assert_eq!(
            result.aggregated_text(),
            "=== PAGE 1 ===\nPage one text.\n\n=== PAGE 2 ===\nPage two text."
        );
        assert_eq!(result.metadata().total_pages, 2);
        assert_eq!(result.page_breakdowns().len(), 2);
    }

    #[test]
    fn test_blank_page_counted_but_not_broken_down() {
        let pages = vec![
            vec![region("   ", 0.0, 0.0, 0.2, Language::Mixed)],
            vec![region("Texte.", 0.0, 0.0, 0.9, Language::Fr)],
        ];
        let result = Aggregator::default().aggregate_raw(&pages);
        assert_eq!(result.metadata.total_pages, 2);
        assert_eq!(result.metadata.total_regions, 1);
        assert_eq!(result.page_breakdowns.len(), 1);
        assert_eq!(result.page_breakdowns[0].page_number, 2);
        assert_eq!(result.aggregated_text, "=== PAGE 2 ===\nTexte.");
        assert_eq!(result.metadata.language_distribution.mixed, 0);
    }

    #[test]
    fn test_page_breakdown_fields() {
        let pages = vec![vec![
            region("world", 200.0, 2.0, 0.8, Language::Fr),
            region("", 0.0, 0.0, 0.1, Language::Fr),
            region("hello", 10.0, 0.0, 0.6, Language::Fr),
        ]];
        let result = Aggregator::default().aggregate_raw(&pages);
        let page = &result.page_breakdowns[0];
        assert_eq!(page.page_number, 1);
        assert_eq!(page.region_count, 3);
        assert_eq!(page.text_length, "hello world".len());
        assert!((page.average_confidence - 0.7).abs() < 1e-9);
        assert_eq!(page.language, Language::Fr);
        assert!((result.metadata.average_confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_correction_applies_to_document_text() {
        let pages = vec![vec![region("مرسومرقم 15", 0.0, 0.0, 0.9, Language::Ar)]];
        let result = aggregate(&pages);
        assert!(result.aggregated_text().contains("رقم مرسوم"));
        // The raw subset is not corrected
        let raw = Aggregator::default().aggregate_raw(&pages);
        assert!(raw.aggregated_text.contains("مرسومرقم"));
    }

    #[test]
    fn test_custom_page_marker() {
        let config = AggregationConfig {
            page_marker: "[page {page}]".to_string(),
            ..Default::default()
        };
        let aggregator = Aggregator::new(config, QualityThresholds::default());
        let pages = vec![vec![region("Bonjour", 0.0, 0.0, 0.9, Language::Fr)]];
        assert_eq!(aggregator.aggregate(&pages).aggregated_text(), "[page 1]\nBonjour");
    }

    #[test]
    fn test_empty_document() {
        let result = aggregate(&[]);
        assert_eq!(result.aggregated_text(), "");
        assert_eq!(result.metadata().total_pages, 0);
        assert_eq!(result.metadata().average_confidence, 0.0);
        assert_eq!(result.recommendations, vec![POSITIVE_RECOMMENDATION.to_string()]);
        assert_eq!(result.auto_corrections.applied, 0);
    }

    #[test]
    fn test_unclamped_confidence_is_clamped_on_use() {
        // Public fields let callers bypass the clamp in `TextRegion::new`
        let literal = |text: &str, confidence: f64| TextRegion {
            text: text.to_string(),
            bbox: BoundingBox::default(),
            confidence,
            language: Language::Fr,
            entity_type: None,
        };
        let pages = vec![vec![literal("Haut", 5.0), literal("Bas", f64::NAN), literal("Milieu", -3.0)]];

        let result = aggregate(&pages);
        let page_avg = result.page_breakdowns()[0].average_confidence;
        let doc_avg = result.metadata().average_confidence;
        assert!((0.0..=1.0).contains(&page_avg), "page average {page_avg}");
        assert!((0.0..=1.0).contains(&doc_avg), "document average {doc_avg}");
        assert!((doc_avg - 1.0 / 3.0).abs() < 1e-9);
        assert!(result.recommendations.iter().any(|r| r.contains("33.3%")));
    }

    #[test]
    fn test_low_confidence_recommendation() {
        let pages = vec![vec![region("Texte peu lisible", 0.0, 0.0, 0.4, Language::Fr)]];
        let result = aggregate(&pages);
        assert!(result.recommendations.iter().any(|r| r.contains("40.0%")));
    }
}
