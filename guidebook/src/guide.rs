//! Guide document
//!
//! The parsed guide as a whole: a display title plus the ordered
//! sections. This is what the pipeline hands to exporters and what the
//! command-line tools report on.

use crate::reading_stats;
use crate::source_model::{Section, SlugRegistry};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The parsed guide ready for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideDocument {
    /// Display title (configured, first H1, or fallback)
    pub title: String,

    /// Sections in reading order
    pub sections: Vec<Section>,
}

impl GuideDocument {
    /// Create a guide from parsed sections
    pub fn new(title: String, sections: Vec<Section>) -> Self {
        Self { title, sections }
    }

    /// Get the total word count across all sections
    pub fn word_count(&self) -> usize {
        self.sections
            .iter()
            .map(reading_stats::section_word_count)
            .sum()
    }

    /// Estimated reading time for the whole guide
    pub fn reading_time_minutes(&self) -> usize {
        reading_stats::reading_time_minutes(self.word_count())
    }

    /// Get the total number of blocks
    pub fn block_count(&self) -> usize {
        self.sections.iter().map(|s| s.blocks.len()).sum()
    }

    /// Look up a section by id (first match when ids collide)
    pub fn find_section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Section ids used by more than one section, in first-seen order
    pub fn duplicate_section_ids(&self) -> Vec<&str> {
        self.sections
            .iter()
            .map(|section| section.id.as_str())
            .duplicates()
            .collect()
    }

    /// Re-number `order` as 1..n in current sequence
    ///
    /// Needed after sections from several sources are concatenated.
    pub fn normalize_order(&mut self) {
        for (index, section) in self.sections.iter_mut().enumerate() {
            section.order = index + 1;
        }
    }

    /// Suffix section ids repeated across the whole guide
    ///
    /// Each source is de-duplicated on its own while parsing; this pass
    /// covers collisions between sources.
    pub fn make_section_ids_unique(&mut self) {
        let mut registry = SlugRegistry::new();
        for section in &mut self.sections {
            let id = std::mem::take(&mut section.id);
            section.id = registry.claim(id);
        }
    }
}
