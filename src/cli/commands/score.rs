//! Quality scoring command.

use std::path::Path;

use console::style;

use ocr_aggregate::config::Config;
use ocr_aggregate::models::clamp_confidence;
use ocr_aggregate::services::quality::{recommend, DocumentSignals, QualityScorer};

use crate::cli::helpers::read_input;

pub fn cmd_score(config: &Config, input: &Path, confidence: f64) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let scorer = QualityScorer::new(&config.aggregation.page_marker);
    let metrics = scorer.score(&text);

    let signals = DocumentSignals {
        average_confidence: clamp_confidence(confidence),
        ..Default::default()
    };
    let recommendations = recommend(&metrics, &signals, &config.quality);

    println!("{}", style("Quality").bold());
    println!("  coherence:    {:.3}", metrics.coherence_score);
    println!("  readability:  {:.3}", metrics.readability_score);
    println!("  completeness: {:.3}", metrics.completeness_score);
    println!("  overall:      {}", style(format!("{:.3}", metrics.overall_score)).cyan());
    println!();
    println!("{}", style("Recommendations").bold());
    for recommendation in recommendations {
        println!("  - {}", recommendation);
    }
    Ok(())
}
