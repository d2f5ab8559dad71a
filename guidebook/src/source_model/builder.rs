//! Section assembly
//!
//! Owns the growing list of sections for one parse run, the block id
//! counter shared by every block kind, and the document title used to
//! name sections that start without a heading.

use super::accumulator::PendingBlock;
use super::blocks::{Block, CodeBlock, HrBlock, ListBlock, TextBlock, TextVariant};
use super::section::Section;
use super::slug::{slugify, SlugRegistry};

/// Builder for the ordered section list
pub struct SectionBuilder {
    /// Completed and in-progress sections; the last one is open
    sections: Vec<Section>,

    /// Resolved section heading level for this document
    section_level: u8,

    /// Shared, never reset, counter for block ids
    next_block: usize,

    /// Title for implicit sections when no H1 has been seen
    fallback_title: String,

    /// Text of the first depth-1 heading
    document_title: Option<String>,

    /// Present only when repeated ids must be suffixed
    registry: Option<SlugRegistry>,
}

impl SectionBuilder {
    /// Create a builder with no sections
    ///
    /// # Parameters
    /// * `section_level` - Heading depth that starts a section
    /// * `fallback_title` - Title for implicit sections before any H1
    /// * `unique_ids` - Suffix repeated section and heading ids
    pub fn new(section_level: u8, fallback_title: &str, unique_ids: bool) -> Self {
        Self {
            sections: Vec::new(),
            section_level,
            next_block: 0,
            fallback_title: fallback_title.to_string(),
            document_title: None,
            registry: unique_ids.then(SlugRegistry::new),
        }
    }

    /// Whether any section has been created
    pub fn has_section(&self) -> bool {
        !self.sections.is_empty()
    }

    /// First depth-1 heading text, if one has been seen
    pub fn document_title(&self) -> Option<&str> {
        self.document_title.as_deref()
    }

    /// Record the first depth-1 heading as the document title
    ///
    /// # Returns
    /// * `true` - This heading became the document title
    /// * `false` - A title was already recorded
    pub fn remember_title(&mut self, text: &str) -> bool {
        if self.document_title.is_some() {
            return false;
        }
        self.document_title = Some(text.to_string());
        true
    }

    /// Always start a new section
    pub fn start_section(&mut self, title: &str, level: u8) {
        let order = self.sections.len() + 1;
        let slug = slugify(title);
        let id = if slug.is_empty() {
            format!("section-{}", order)
        } else {
            slug
        };
        let id = self.claim(id);

        log::debug!(
            "Starting section {} '{}' (id: {}, level: {})",
            order,
            title,
            id,
            level
        );
        self.sections
            .push(Section::new(id, title.to_string(), order, level));
    }

    /// Start a section titled after the document only if none exists yet
    pub fn ensure_section(&mut self) {
        if self.has_section() {
            return;
        }
        let title = self
            .document_title
            .clone()
            .unwrap_or_else(|| self.fallback_title.clone());
        self.start_section(&title, self.section_level);
    }

    /// Turn a released buffer into a block on the open section
    pub fn push_pending(&mut self, pending: PendingBlock) {
        let block = match pending {
            PendingBlock::Paragraph(content) => Block::Text(TextBlock {
                id: format!("p-{}", self.next_index()),
                variant: TextVariant::Paragraph,
                content,
                level: None,
            }),
            PendingBlock::List { variant, items } => Block::List(ListBlock {
                id: format!("list-{}", self.next_index()),
                variant,
                items,
            }),
            PendingBlock::Code { language, content } => Block::Code(CodeBlock {
                id: format!("code-{}", self.next_index()),
                language,
                content,
            }),
        };
        self.push_block(block);
    }

    /// Append a horizontal rule to the open section
    pub fn push_rule(&mut self) {
        let block = Block::Hr(HrBlock {
            id: format!("hr-{}", self.next_index()),
        });
        self.push_block(block);
    }

    /// Append an in-section heading
    ///
    /// One level below the section level is a `heading`; any other depth
    /// is a `subheading`. The id prefers the slug of the text.
    pub fn push_heading(&mut self, depth: u8, text: &str) {
        let variant = if Some(depth) == self.section_level.checked_add(1) {
            TextVariant::Heading
        } else {
            TextVariant::Subheading
        };

        let slug = slugify(text);
        let id = if slug.is_empty() {
            format!("h-{}", self.next_index())
        } else {
            format!("h-{}", slug)
        };
        let id = self.claim(id);

        self.push_block(Block::Text(TextBlock {
            id,
            variant,
            content: text.to_string(),
            level: Some(depth),
        }));
    }

    /// Finish the run; an input with no content still yields one section
    pub fn finish(mut self) -> Vec<Section> {
        self.ensure_section();
        self.sections
    }

    fn push_block(&mut self, block: Block) {
        self.ensure_section();
        if let Some(section) = self.sections.last_mut() {
            log::trace!("Adding {} block {} to '{}'", block.kind(), block.id(), section.id);
            section.blocks.push(block);
        }
    }

    fn next_index(&mut self) -> usize {
        let index = self.next_block;
        self.next_block += 1;
        index
    }

    fn claim(&mut self, id: String) -> String {
        match self.registry.as_mut() {
            Some(registry) => registry.claim(id),
            None => id,
        }
    }
}
