//! Source model for the parsing stage
//!
//! This module defines the guide document model (sections made of typed
//! blocks) and the line-based parser that builds it from Markdown text.
//! Parsing is side-effect free and never fails; the same model feeds the
//! reader, the search index and every exporter.

// Submodules
mod accumulator;
mod blocks;
mod builder;
mod error;
mod heading_level;
mod line;
mod parser;
mod section;
mod slug;

// Re-export public types
pub use accumulator::{BlockAccumulator, PendingBlock};
pub use blocks::{
    Block, CalloutBlock, CalloutTone, CodeBlock, HrBlock, ListBlock, ListVariant, TextBlock,
    TextVariant,
};
pub use error::SourceModelError;
pub use heading_level::{count_headings, SectionHeadingLevel, MAX_HEADING_DEPTH};
pub use line::LineKind;
pub use parser::{MarkdownParser, ParseOptions, ParsedGuide, DEFAULT_FALLBACK_TITLE};
pub use section::Section;
pub use slug::{slugify, SlugRegistry};

/// Parse Markdown into sections
///
/// Convenience wrapper around [`MarkdownParser::parse`].
pub fn parse(markdown: &str, options: &ParseOptions) -> Vec<Section> {
    MarkdownParser::parse(markdown, options)
}
