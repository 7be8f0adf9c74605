//! Aggregation result models.
//!
//! All result types are plain values built fresh for each aggregation call.

use serde::{Deserialize, Serialize};

use super::Language;

/// Per-page summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBreakdown {
    /// 1-based page number.
    pub page_number: usize,
    /// Raw region count, blank regions included.
    pub region_count: usize,
    /// Length in characters of the joined page text (marker excluded).
    pub text_length: usize,
    /// Mean confidence over the page's non-blank regions.
    pub average_confidence: f64,
    /// Dominant page language.
    pub language: Language,
}

/// Counts of non-blank regions by their per-region language tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDistribution {
    pub arabic: usize,
    pub french: usize,
    pub mixed: usize,
}

impl LanguageDistribution {
    pub fn record(&mut self, language: Language) {
        match language {
            Language::Ar => self.arabic += 1,
            Language::Fr => self.french += 1,
            Language::Mixed => self.mixed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.arabic + self.french + self.mixed
    }
}

/// Document-level statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationMetadata {
    /// Pages in the input, skipped pages included.
    pub total_pages: usize,
    /// Non-blank regions across all pages.
    pub total_regions: usize,
    pub average_confidence: f64,
    pub language_distribution: LanguageDistribution,
    pub processing_time_ms: u64,
}

/// Raw aggregation output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub aggregated_text: String,
    pub metadata: AggregationMetadata,
    pub page_breakdowns: Vec<PageBreakdown>,
}

/// Quality sub-scores, each in `[0,1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub coherence_score: f64,
    pub readability_score: f64,
    pub completeness_score: f64,
    pub overall_score: f64,
}

/// Changes made by the final layout normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoCorrections {
    pub applied: usize,
    pub suggestions: Vec<String>,
}

/// Aggregation output with quality scoring and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedAggregationResult {
    #[serde(flatten)]
    pub base: AggregationResult,
    pub quality_metrics: QualityMetrics,
    /// Never empty.
    pub recommendations: Vec<String>,
    pub auto_corrections: AutoCorrections,
}

impl EnhancedAggregationResult {
    pub fn aggregated_text(&self) -> &str {
        &self.base.aggregated_text
    }

    pub fn metadata(&self) -> &AggregationMetadata {
        &self.base.metadata
    }

    pub fn page_breakdowns(&self) -> &[PageBreakdown] {
        &self.base.page_breakdowns
    }

    /// Drop the enhancement, keeping the raw subset.
    pub fn into_base(self) -> AggregationResult {
        self.base
    }
}
