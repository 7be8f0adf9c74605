//! Formatting utilities for human-readable reports.

/// Format a `[0,1]` ratio as a percentage with one decimal.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Format an elapsed duration given in milliseconds.
pub fn format_duration_ms(ms: u64) -> String {
    if ms >= 60_000 {
        format!("{}m {:.1}s", ms / 60_000, (ms % 60_000) as f64 / 1000.0)
    } else if ms >= 1_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{} ms", ms)
    }
}
