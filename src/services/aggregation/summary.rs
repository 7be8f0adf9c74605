//! Human-readable report of an aggregation result, for logs and diagnostics.

use std::fmt::Write;

use crate::models::AggregationResult;
use crate::utils::{format_duration_ms, format_percent};

pub fn summarize(result: &AggregationResult) -> String {
    let meta = &result.metadata;
    let dist = &meta.language_distribution;

    let mut out = String::new();
    let _ = writeln!(out, "Aggregation summary");
    let _ = writeln!(
        out,
        "  Pages:              {} ({} with text)",
        meta.total_pages,
        result.page_breakdowns.len()
    );
    let _ = writeln!(out, "  Regions:            {}", meta.total_regions);
    let _ = writeln!(
        out,
        "  Average confidence: {}",
        format_percent(meta.average_confidence)
    );
    let _ = writeln!(
        out,
        "  Languages:          ar {}, fr {}, mixed {}",
        dist.arabic, dist.french, dist.mixed
    );
    let _ = writeln!(
        out,
        "  Processing time:    {}",
        format_duration_ms(meta.processing_time_ms)
    );

    for page in &result.page_breakdowns {
        let _ = writeln!(
            out,
            "  Page {}: {} regions, {} chars, confidence {}, language {}",
            page.page_number,
            page.region_count,
            page.text_length,
            format_percent(page.average_confidence),
            page.language.as_str()
        );
    }

    out
}
