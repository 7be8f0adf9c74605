//! Aggregation configuration.

use serde::{Deserialize, Serialize};

/// Default vertical distance (px) under which two regions share a line.
pub const DEFAULT_SAME_LINE_TOLERANCE: f64 = 10.0;

/// Default share of mixed regions above which a page is tagged mixed.
pub const DEFAULT_MIXED_RATIO_THRESHOLD: f64 = 0.3;

/// Placeholder replaced by the 1-based page number in a page marker template.
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Default page marker template.
pub const DEFAULT_PAGE_MARKER: &str = "=== PAGE {page} ===";

/// Tunables for ordering, classification, and page assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Maximum `|y_a - y_b|` for two regions to be read as one line.
    pub same_line_tolerance: f64,
    /// Mixed-region ratio strictly above which a page is `mixed`.
    pub mixed_ratio_threshold: f64,
    /// Page marker template.
    pub page_marker: String,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            same_line_tolerance: DEFAULT_SAME_LINE_TOLERANCE,
            mixed_ratio_threshold: DEFAULT_MIXED_RATIO_THRESHOLD,
            page_marker: DEFAULT_PAGE_MARKER.to_string(),
        }
    }
}

impl AggregationConfig {
    /// Render the marker line for a 1-based page number.
    pub fn page_marker_for(&self, page_number: usize) -> String {
        self.page_marker.replace(PAGE_PLACEHOLDER, &page_number.to_string())
    }

    /// Check if this is the default config.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
