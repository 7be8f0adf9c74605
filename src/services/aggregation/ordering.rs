//! Reading-order sorting for the regions of one page.
//!
//! Regions are sorted top to bottom by `bbox.y`, then regions that sit on the
//! same line (vertical distance within the tolerance) are reordered left to
//! right by `bbox.x`. Script direction is not considered here: RTL text keeps
//! its logical order inside each region.

use std::cmp::Ordering;

use crate::models::TextRegion;

/// Sort regions into natural reading order.
///
/// Deterministic and stable: identical input always yields identical output,
/// and regions with equal coordinates keep their input order.
pub fn order_regions(regions: &[TextRegion], same_line_tolerance: f64) -> Vec<TextRegion> {
    let mut sorted = regions.to_vec();
    sort_in_reading_order(&mut sorted, same_line_tolerance);
    sorted
}

/// In-place variant of [`order_regions`].
pub fn sort_in_reading_order(regions: &mut [TextRegion], same_line_tolerance: f64) {
    if regions.len() < 2 {
        return;
    }

    regions.sort_by(|a, b| match a.bbox.y.total_cmp(&b.bbox.y) {
        Ordering::Equal => a.bbox.x.total_cmp(&b.bbox.x),
        other => other,
    });

    // Insertion pass: walk each region back past same-line neighbours that
    // start further right.
    for i in 1..regions.len() {
        let mut j = i;
        while j > 0 {
            let prev = &regions[j - 1].bbox;
            let curr = &regions[j].bbox;
            if (curr.y - prev.y).abs() <= same_line_tolerance && curr.x < prev.x {
                regions.swap(j - 1, j);
                j -= 1;
            } else {
                break;
            }
        }
    }
}
