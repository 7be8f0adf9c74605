//! Single-document aggregation command.

use std::path::Path;

use console::style;

use ocr_aggregate::config::Config;
use ocr_aggregate::services::aggregation::summarize;

use crate::cli::helpers::{read_pages, write_output};
use crate::cli::icons::{arrow, success};
use crate::cli::OutputFormat;

pub fn cmd_aggregate(
    config: &Config,
    input: &Path,
    raw: bool,
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let pages = read_pages(input)?;
    let aggregator = config.aggregator();

    let rendered = if raw {
        let result = aggregator.aggregate_raw(&pages);
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(&result)?,
            OutputFormat::Summary => summarize(&result),
            OutputFormat::Text => result.aggregated_text,
        }
    } else {
        let result = aggregator.aggregate(&pages);
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(&result)?,
            OutputFormat::Summary => {
                let mut report = summarize(&result.base);
                let metrics = &result.quality_metrics;
                report.push_str(&format!(
                    "  Quality:            overall {:.2} (coherence {:.2}, readability {:.2}, completeness {:.2})\n",
                    metrics.overall_score,
                    metrics.coherence_score,
                    metrics.readability_score,
                    metrics.completeness_score
                ));
                for recommendation in &result.recommendations {
                    report.push_str(&format!("  - {}\n", recommendation));
                }
                report
            }
            OutputFormat::Text => result.base.aggregated_text,
        }
    };

    write_output(output, &rendered)?;

    if let Some(path) = output {
        eprintln!("{} Aggregated {}", success(), input.display());
        eprintln!("  {} Output: {}", arrow(), style(path.display()).cyan());
    }
    Ok(())
}
