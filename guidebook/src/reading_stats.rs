//! Reading statistics
//!
//! Word counts and a reading-time estimate, shown next to each section
//! in the reader and printed by `guidebook stats`.

use crate::source_model::{Block, Section};

/// Assumed reading speed
pub const WORDS_PER_MINUTE: usize = 200;

/// Count whitespace-separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count the words a reader sees in a section
///
/// Text, list items, callout title and content, and code all count;
/// rules contribute nothing. The section title is not included.
pub fn section_word_count(section: &Section) -> usize {
    section
        .blocks
        .iter()
        .map(|block| match block {
            Block::Text(text) => count_words(&text.content),
            Block::List(list) => list.items.iter().map(|item| count_words(item)).sum(),
            Block::Callout(callout) => {
                callout.title.as_deref().map_or(0, count_words) + count_words(&callout.content)
            }
            Block::Code(code) => count_words(&code.content),
            Block::Hr(_) => 0,
        })
        .sum()
}

/// Estimated reading time, rounded, never below one minute
pub fn reading_time_minutes(word_count: usize) -> usize {
    let minutes = word_count.saturating_add(WORDS_PER_MINUTE / 2) / WORDS_PER_MINUTE;
    minutes.max(1)
}
