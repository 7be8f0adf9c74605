//! Pass-through extraction of regions by upstream entity tag.

use crate::models::TextRegion;

/// Trimmed text of every non-blank region tagged `entity_type`, in
/// page-then-region input order. No correction is applied.
pub fn extract_by_entity_type(pages: &[Vec<TextRegion>], entity_type: &str) -> Vec<String> {
    pages
        .iter()
        .flatten()
        .filter(|r| !r.is_blank() && r.entity_type.as_deref() == Some(entity_type))
        .map(|r| r.text.trim().to_string())
        .collect()
}
