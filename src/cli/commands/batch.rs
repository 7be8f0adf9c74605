//! Batch aggregation command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use ocr_aggregate::config::Config;
use ocr_aggregate::services::batch::{BatchDocument, BatchEvent, DocumentStatus};

use crate::cli::helpers::truncate;
use crate::cli::icons::{error, success, warning};

pub async fn cmd_batch(
    mut config: Config,
    inputs: Vec<PathBuf>,
    workers: Option<usize>,
    output_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(workers) = workers {
        config.batch.workers = workers;
    }
    config.validate()?;

    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    println!(
        "{} Aggregating {} documents with {} workers",
        style("→").cyan(),
        inputs.len(),
        config.batch.workers
    );

    let service = config.batch_aggregator();

    // Ctrl-C stops documents that have not started yet
    let abort = service.abort_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            abort.store(true, Ordering::Relaxed);
        }
    });

    let (event_tx, mut event_rx) = mpsc::channel::<BatchEvent>(100);

    let event_handler = tokio::spawn(async move {
        let mut progress: Option<ProgressBar> = None;

        while let Some(event) = event_rx.recv().await {
            match event {
                BatchEvent::Started { total } => {
                    let pb = ProgressBar::new(total as u64);
                    pb.set_style(
                        ProgressStyle::default_bar()
                            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                            .unwrap()
                            .progress_chars("█▓░"),
                    );
                    pb.set_message("Aggregating...");
                    progress = Some(pb);
                }
                BatchEvent::DocumentStarted { id, .. } => {
                    if let Some(pb) = &progress {
                        pb.set_message(truncate(&id, 48));
                    }
                }
                BatchEvent::DocumentCompleted { .. } | BatchEvent::DocumentSkipped { .. } => {
                    if let Some(pb) = &progress {
                        pb.inc(1);
                    }
                }
                BatchEvent::DocumentFailed { id, error: err, .. } => match &progress {
                    Some(pb) => {
                        pb.suspend(|| eprintln!("  {} {} failed: {}", error(), id, err));
                        pb.inc(1);
                    }
                    None => eprintln!("  {} {} failed: {}", error(), id, err),
                },
                BatchEvent::Complete { .. } => {
                    if let Some(pb) = progress.take() {
                        pb.finish_and_clear();
                    }
                }
            }
        }
    });

    let documents = inputs.iter().map(BatchDocument::from_path).collect();
    let result = service.run(documents, event_tx).await?;
    let _ = event_handler.await;

    if let Some(dir) = &output_dir {
        let paths = result_paths(dir, &inputs);
        for (path, outcome) in paths.iter().zip(&result.results) {
            if let DocumentStatus::Completed(enhanced) = &outcome.status {
                let json = serde_json::to_string_pretty(enhanced.as_ref())?;
                std::fs::write(path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
    } else {
        for outcome in &result.results {
            if let DocumentStatus::Completed(enhanced) = &outcome.status {
                println!(
                    "  {} {} (quality {:.2})",
                    success(),
                    outcome.id,
                    enhanced.quality_metrics.overall_score
                );
            }
        }
    }

    println!(
        "{} Batch complete: {} succeeded, {} failed, {} skipped",
        success(),
        result.succeeded,
        result.failed,
        result.skipped
    );
    if result.skipped > 0 {
        println!("  {} Interrupted before all documents started", warning());
    }

    if result.failed > 0 {
        anyhow::bail!("{} documents failed", result.failed);
    }
    Ok(())
}

fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// `<dir>/<stem>.result.json` per input. Stems shared by several inputs get
/// the 1-based input position appended so no output overwrites another.
fn result_paths(dir: &Path, inputs: &[PathBuf]) -> Vec<PathBuf> {
    let stems: Vec<String> = inputs.iter().map(|input| file_stem(input)).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for stem in &stems {
        *counts.entry(stem.as_str()).or_default() += 1;
    }

    stems
        .iter()
        .enumerate()
        .map(|(i, stem)| {
            if counts[stem.as_str()] > 1 {
                dir.join(format!("{}-{}.result.json", stem, i + 1))
            } else {
                dir.join(format!("{}.result.json", stem))
            }
        })
        .collect()
}
