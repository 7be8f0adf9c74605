//! Batch aggregation types and events.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::{EnhancedAggregationResult, TextRegion};

/// Default number of documents aggregated concurrently.
pub const DEFAULT_WORKERS: usize = 4;

/// Events emitted while a batch runs.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Batch accepted
    Started { total: usize },
    /// A worker picked up a document
    DocumentStarted { index: usize, id: String },
    /// Document aggregated
    DocumentCompleted {
        index: usize,
        id: String,
        overall_score: f64,
        processing_time_ms: u64,
    },
    /// Document could not be read or decoded
    DocumentFailed {
        index: usize,
        id: String,
        error: String,
    },
    /// Abort was requested before the document started
    DocumentSkipped { index: usize, id: String },
    /// All documents accounted for
    Complete {
        succeeded: usize,
        failed: usize,
        skipped: usize,
    },
}

/// Where a document's pages come from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Already decoded pages.
    Pages(Vec<Vec<TextRegion>>),
    /// A JSON document held in memory.
    Json(String),
    /// A JSON file, read on the worker.
    File(PathBuf),
}

/// One document of a batch.
#[derive(Debug, Clone)]
pub struct BatchDocument {
    pub id: String,
    pub source: DocumentSource,
}

impl BatchDocument {
    pub fn new(id: impl Into<String>, source: DocumentSource) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }

    /// A file-backed document identified by its path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: path.display().to_string(),
            source: DocumentSource::File(path),
        }
    }
}

/// Final state of one document.
#[derive(Debug, Clone)]
pub enum DocumentStatus {
    Completed(Box<EnhancedAggregationResult>),
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub id: String,
    pub status: DocumentStatus,
}

/// Result of a batch run. `results` follows input order.
#[derive(Debug)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub results: Vec<DocumentOutcome>,
}

/// Configuration for batch aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}
