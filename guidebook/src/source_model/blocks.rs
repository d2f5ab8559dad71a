//! Block-level guide elements
//!
//! This module defines the structured representation of guide content
//! at the block level (paragraphs, headings, lists, callouts, code, rules).
//! The serialized shape carries a `type` tag with lowercase kind names so
//! the JSON output can be consumed directly by the reader front end.

use serde::{Deserialize, Serialize};

/// Block-level guide element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// Headings, sub-headings, paragraphs and quotes
    Text(TextBlock),

    /// A bullet or ordered list of plain items
    List(ListBlock),

    /// A titled aside (authored as data, never produced from Markdown)
    Callout(CalloutBlock),

    /// A fenced code block
    Code(CodeBlock),

    /// A horizontal rule (thematic break)
    Hr(HrBlock),
}

impl Block {
    /// Identifier of the block, unique within one parse run
    pub fn id(&self) -> &str {
        match self {
            Block::Text(block) => &block.id,
            Block::List(block) => &block.id,
            Block::Callout(block) => &block.id,
            Block::Code(block) => &block.id,
            Block::Hr(block) => &block.id,
        }
    }

    /// Short kind name used in log output
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Text(_) => "text",
            Block::List(_) => "list",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Hr(_) => "hr",
        }
    }

    /// Plain text carried by the block, as used for search excerpts
    ///
    /// Code and rules contribute an empty string.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Text(block) => block.content.clone(),
            Block::List(block) => block.items.join(" "),
            Block::Callout(block) => format!(
                "{} {}",
                block.title.as_deref().unwrap_or(""),
                block.content
            )
            .trim()
            .to_string(),
            Block::Code(_) | Block::Hr(_) => String::new(),
        }
    }
}

/// Rendering variant of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextVariant {
    Heading,
    Subheading,
    Paragraph,
    Quote,
}

/// A run of text with a rendering variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: String,

    pub variant: TextVariant,

    /// Text content; inline code spans are kept in backticks
    pub content: String,

    /// Literal Markdown heading depth, set for headings and sub-headings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl TextBlock {
    /// Whether this block is rendered as a heading of some depth
    pub fn is_heading(&self) -> bool {
        matches!(self.variant, TextVariant::Heading | TextVariant::Subheading)
    }
}

/// List flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListVariant {
    Bullet,
    Ordered,
}

/// A flat list of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBlock {
    pub id: String,
    pub variant: ListVariant,
    pub items: Vec<String>,
}

/// Tone of a callout, drives styling in the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutTone {
    Tip,
    Warning,
    Example,
    Note,
}

/// A titled aside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalloutBlock {
    pub id: String,
    pub tone: CalloutTone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
}

/// A code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub id: String,

    /// Language tag from the opening fence (e.g., "rust", "js")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Raw code lines joined with `\n`
    pub content: String,
}

/// A horizontal rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrBlock {
    pub id: String,
}
