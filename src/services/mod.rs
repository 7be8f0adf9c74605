//! Service layer for OCR aggregation.
//!
//! Pipeline stages are plain synchronous functions; only the batch service
//! touches the async runtime. Services can be used by the CLI or embedded
//! directly by other interfaces.

pub mod aggregation;
pub mod batch;
pub mod correction;
pub mod quality;

pub use aggregation::{
    aggregate, aggregate_json, extract_by_entity_type, summarize, AggregationConfig,
    AggregationError, Aggregator,
};
pub use batch::{BatchAggregator, BatchConfig, BatchDocument, BatchEvent, BatchResult};
pub use correction::{correct, CorrectionEngine, CorrectionOutcome};
pub use quality::{QualityScorer, QualityThresholds};
