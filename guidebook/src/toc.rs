//! Table of contents
//!
//! The "On this page" list for a section, derived from its heading and
//! sub-heading blocks.

use crate::source_model::{Section, TextVariant};
use serde::Serialize;

/// Shallowest heading level shown by default
pub const DEFAULT_TOC_MIN_LEVEL: u8 = 2;

/// One navigable heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// Block id, usable as an anchor
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// Headings of a section at or below `min_level`
///
/// Blocks without a recorded level count as 2 for headings and 3 for
/// sub-headings.
pub fn toc_items(section: &Section, min_level: u8) -> Vec<TocItem> {
    section
        .headings()
        .map(|heading| TocItem {
            id: heading.id.clone(),
            text: heading.content.clone(),
            level: heading.level.unwrap_or(match heading.variant {
                TextVariant::Heading => 2,
                _ => 3,
            }),
        })
        .filter(|item| item.level >= min_level)
        .collect()
}
