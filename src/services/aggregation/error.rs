//! Aggregation error types.

use thiserror::Error;

/// Caller contract violations on aggregation input.
///
/// Malformed regions are tolerated and never produce one of these; only the
/// page structure itself is checked.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Invalid page {}: {reason}", .page_index + 1)]
    InvalidPage { page_index: usize, reason: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AggregationError {
    /// 0-based index of the offending page, when the error concerns one.
    pub fn page_index(&self) -> Option<usize> {
        match self {
            Self::InvalidPage { page_index, .. } => Some(*page_index),
            _ => None,
        }
    }
}
