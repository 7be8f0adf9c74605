//! Data models for OCR aggregation.

mod region;
mod result;

pub use region::{clamp_confidence, detect_script_language, BoundingBox, Language, TextRegion};
pub use result::{
    AggregationMetadata, AggregationResult, AutoCorrections, EnhancedAggregationResult,
    LanguageDistribution, PageBreakdown, QualityMetrics,
};
