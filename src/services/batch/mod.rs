//! Batch aggregation service.
//!
//! Aggregates many independent documents concurrently on the blocking pool.
//! Each document runs to completion once started; an abort request only
//! prevents documents that have not started yet.
//! Separated from UI concerns - emits events for progress tracking.

mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use futures::future::join_all;
use tokio::sync::{mpsc, Semaphore};

use crate::models::EnhancedAggregationResult;
use crate::services::aggregation::{pages_from_str, Aggregator};

pub use types::{
    BatchConfig, BatchDocument, BatchEvent, BatchResult, DocumentOutcome, DocumentSource,
    DocumentStatus, DEFAULT_WORKERS,
};

/// Service for aggregating a batch of documents.
pub struct BatchAggregator {
    aggregator: Arc<Aggregator>,
    config: BatchConfig,
    abort: Arc<AtomicBool>,
}

impl BatchAggregator {
    /// Create a new batch service.
    pub fn new(aggregator: Aggregator, config: BatchConfig) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            config,
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag; setting it stops documents that have not started yet.
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        self.abort.clone()
    }

    /// Request cancellation of the remaining documents.
    pub fn abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    /// Aggregate every document, at most `workers` at a time.
    pub async fn run(
        &self,
        documents: Vec<BatchDocument>,
        event_tx: mpsc::Sender<BatchEvent>,
    ) -> anyhow::Result<BatchResult> {
        let total = documents.len();
        let workers = self.config.workers.max(1);
        let semaphore = Arc::new(Semaphore::new(workers));

        let _ = event_tx.send(BatchEvent::Started { total }).await;
        tracing::info!("Aggregating {} documents with {} workers", total, workers);

        let mut outcomes: Vec<Option<DocumentOutcome>> = vec![None; total];
        let mut handles = Vec::with_capacity(total);

        for (index, document) in documents.into_iter().enumerate() {
            let permit = semaphore.clone().acquire_owned().await?;

            if self.abort.load(Ordering::Relaxed) {
                drop(permit);
                let _ = event_tx
                    .send(BatchEvent::DocumentSkipped {
                        index,
                        id: document.id.clone(),
                    })
                    .await;
                outcomes[index] = Some(DocumentOutcome {
                    id: document.id,
                    status: DocumentStatus::Skipped,
                });
                continue;
            }

            let _ = event_tx
                .send(BatchEvent::DocumentStarted {
                    index,
                    id: document.id.clone(),
                })
                .await;

            let aggregator = self.aggregator.clone();
            let event_tx = event_tx.clone();
            let handle = tokio::spawn(async move {
                let BatchDocument { id, source } = document;
                let joined = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    aggregate_document(&aggregator, source)
                })
                .await;

                let status = match joined {
                    Ok(Ok(result)) => {
                        let _ = event_tx
                            .send(BatchEvent::DocumentCompleted {
                                index,
                                id: id.clone(),
                                overall_score: result.quality_metrics.overall_score,
                                processing_time_ms: result.metadata().processing_time_ms,
                            })
                            .await;
                        DocumentStatus::Completed(Box::new(result))
                    }
                    Ok(Err(e)) => {
                        let error = format!("{:#}", e);
                        tracing::warn!("Failed to aggregate {}: {}", id, error);
                        let _ = event_tx
                            .send(BatchEvent::DocumentFailed {
                                index,
                                id: id.clone(),
                                error: error.clone(),
                            })
                            .await;
                        DocumentStatus::Failed(error)
                    }
                    Err(e) => {
                        let error = format!("worker task failed: {}", e);
                        tracing::error!("Aggregation of {} panicked: {}", id, e);
                        let _ = event_tx
                            .send(BatchEvent::DocumentFailed {
                                index,
                                id: id.clone(),
                                error: error.clone(),
                            })
                            .await;
                        DocumentStatus::Failed(error)
                    }
                };

                (index, DocumentOutcome { id, status })
            });
            handles.push(handle);
        }

        for joined in join_all(handles).await {
            let (index, outcome) = joined.context("batch worker task failed")?;
            outcomes[index] = Some(outcome);
        }

        let results: Vec<DocumentOutcome> = outcomes.into_iter().flatten().collect();
        let mut result = BatchResult {
            succeeded: 0,
            failed: 0,
            skipped: 0,
            results,
        };
        for outcome in &result.results {
            match outcome.status {
                DocumentStatus::Completed(_) => result.succeeded += 1,
                DocumentStatus::Failed(_) => result.failed += 1,
                DocumentStatus::Skipped => result.skipped += 1,
            }
        }

        let _ = event_tx
            .send(BatchEvent::Complete {
                succeeded: result.succeeded,
                failed: result.failed,
                skipped: result.skipped,
            })
            .await;

        Ok(result)
    }
}

/// Resolve a document's pages and aggregate them. Runs on the blocking pool.
fn aggregate_document(
    aggregator: &Aggregator,
    source: DocumentSource,
) -> anyhow::Result<EnhancedAggregationResult> {
    let pages = match source {
        DocumentSource::Pages(pages) => pages,
        DocumentSource::Json(json) => pages_from_str(&json)?,
        DocumentSource::File(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            pages_from_str(&json).with_context(|| format!("Invalid input in {}", path.display()))?
        }
    };
    Ok(aggregator.aggregate(&pages))
}
