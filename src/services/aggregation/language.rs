//! Page-level language classification from per-region tags.

use crate::models::{Language, TextRegion};

/// Running tally of region languages on one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageTally {
    pub ar: usize,
    pub fr: usize,
    pub mixed: usize,
}

impl LanguageTally {
    /// Tally the non-blank regions of a page.
    pub fn from_regions<'a>(regions: impl IntoIterator<Item = &'a TextRegion>) -> Self {
        let mut tally = Self::default();
        for region in regions.into_iter().filter(|r| !r.is_blank()) {
            tally.record(region.language);
        }
        tally
    }

    pub fn record(&mut self, language: Language) {
        match language {
            Language::Ar => self.ar += 1,
            Language::Fr => self.fr += 1,
            Language::Mixed => self.mixed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ar + self.fr + self.mixed
    }

    /// Dominant language of the tallied page.
    ///
    /// `Mixed` when the mixed share is strictly above `mixed_ratio_threshold`,
    /// otherwise `Ar` when Arabic regions outnumber French ones, otherwise `Fr`.
    /// An empty tally is `Fr`.
    pub fn dominant(&self, mixed_ratio_threshold: f64) -> Language {
        let total = self.total();
        if total == 0 {
            return Language::Fr;
        }
        if self.mixed as f64 / total as f64 > mixed_ratio_threshold {
            Language::Mixed
        } else if self.ar > self.fr {
            Language::Ar
        } else {
            Language::Fr
        }
    }
}
