//! Section representation
//!
//! A section is a top-level chapter of a guide: the unit of reader
//! navigation, search results and export documents.

use super::blocks::{Block, TextBlock};
use serde::{Deserialize, Serialize};

/// A chapter of the guide delimited by a section-level heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Slug of the title, or `section-<order>` when the slug is empty
    pub id: String,

    /// Heading text (or the fallback title for implicit sections)
    pub title: String,

    /// 1-based position in creation order
    pub order: usize,

    /// Heading depth treated as a section boundary for this document
    pub level: u8,

    /// Content blocks in source order
    pub blocks: Vec<Block>,
}

impl Section {
    /// Create an empty section
    ///
    /// # Parameters
    /// * `id` - Section identifier
    /// * `title` - Display title
    /// * `order` - 1-based creation order
    /// * `level` - Resolved section heading level
    ///
    /// # Returns
    /// * `Section` - A section with no blocks
    pub fn new(id: String, title: String, order: usize, level: u8) -> Self {
        Self {
            id,
            title,
            order,
            level,
            blocks: Vec::new(),
        }
    }

    /// Whether the section has no content blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over heading and sub-heading blocks
    pub fn headings(&self) -> impl Iterator<Item = &TextBlock> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Text(text) if text.is_heading() => Some(text),
            _ => None,
        })
    }
}
