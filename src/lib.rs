//! OCR text aggregation, correction, and quality scoring.
//!
//! Turns the per-region output of an OCR engine into one ordered, corrected,
//! and scored document text. Arabic and French legal documents are the
//! primary target: the correction tables and quality heuristics know their
//! vocabulary.
//!
//! ```no_run
//! use ocr_aggregate::models::{BoundingBox, Language, TextRegion};
//!
//! let pages = vec![vec![TextRegion::new(
//!     "Article 1 : Le présent décret.",
//!     BoundingBox::new(10.0, 20.0, 300.0, 14.0),
//!     0.93,
//!     Language::Fr,
//! )]];
//! let result = ocr_aggregate::aggregate(&pages);
//! println!("{}", result.aggregated_text());
//! ```

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{Config, ConfigError};
pub use models::{
    AggregationResult, BoundingBox, EnhancedAggregationResult, Language, QualityMetrics,
    TextRegion,
};
pub use services::{
    aggregate, aggregate_json, correct, extract_by_entity_type, summarize, AggregationError,
    Aggregator, CorrectionOutcome,
};
