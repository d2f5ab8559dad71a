//! Line-based Markdown parser
//!
//! Converts raw Markdown into an ordered list of sections. The parser
//! resolves the section heading level once, then streams every line
//! through the classifier and the block accumulator, handing finished
//! blocks to the section builder. It is a pure function of its input:
//! all state lives in one parser value that is consumed by the run.

use super::accumulator::{BlockAccumulator, PendingBlock};
use super::blocks::ListVariant;
use super::builder::SectionBuilder;
use super::heading_level::SectionHeadingLevel;
use super::line::LineKind;
use super::section::Section;

/// Title given to sections that start before any heading
pub const DEFAULT_FALLBACK_TITLE: &str = "Imported Guide";

/// Options for one parse run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Which heading depth starts a section
    pub section_heading_level: SectionHeadingLevel,

    /// Title for sections created before any H1 is seen
    pub fallback_title: String,

    /// Suffix repeated section and heading ids with `-2`, `-3`, ...
    pub unique_ids: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            section_heading_level: SectionHeadingLevel::Auto,
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            unique_ids: false,
        }
    }
}

/// Result of parsing one Markdown source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGuide {
    /// Text of the first depth-1 heading, if any
    pub title: Option<String>,

    /// Sections in creation order; never empty
    pub sections: Vec<Section>,
}

/// Parser state for one Markdown source
pub struct MarkdownParser {
    /// Buffers and fence state
    blocks: BlockAccumulator,

    /// Sections, block ids and the document title
    sections: SectionBuilder,

    /// Resolved section heading level, fixed for the run
    section_level: u8,
}

impl MarkdownParser {
    /// Create a parser for a document with a known section level
    fn new(section_level: u8, options: &ParseOptions) -> Self {
        // An empty fallback counts as unset
        let fallback_title = match options.fallback_title.trim() {
            "" => DEFAULT_FALLBACK_TITLE,
            _ => options.fallback_title.as_str(),
        };
        Self {
            blocks: BlockAccumulator::new(),
            sections: SectionBuilder::new(section_level, fallback_title, options.unique_ids),
            section_level,
        }
    }

    /// Parse Markdown content into sections
    ///
    /// # Parameters
    /// * `markdown` - Raw Markdown text
    /// * `options` - Section level, fallback title and id policy
    ///
    /// # Returns
    /// * `Vec<Section>` - At least one section; never fails
    pub fn parse(markdown: &str, options: &ParseOptions) -> Vec<Section> {
        Self::parse_document(markdown, options).sections
    }

    /// Parse Markdown content, also reporting the detected document title
    pub fn parse_document(markdown: &str, options: &ParseOptions) -> ParsedGuide {
        let section_level = options.section_heading_level.resolve(markdown.lines());
        log::debug!(
            "Resolved section heading level {} (requested: {})",
            section_level,
            options.section_heading_level
        );

        let mut parser = Self::new(section_level, options);
        for line in markdown.lines() {
            parser.process_line(line);
        }

        parser.finalize()
    }

    /// Process a single physical line
    fn process_line(&mut self, raw: &str) {
        match LineKind::classify(raw, self.blocks.in_fence()) {
            LineKind::Fence { language } => {
                let released = self.blocks.toggle_fence(language);
                self.emit(released);
            }
            LineKind::Code(line) => self.blocks.push_code(line),
            LineKind::Blank => self.flush_open(),
            LineKind::Rule => {
                self.flush_open();
                self.sections.push_rule();
            }
            LineKind::Heading { depth, text } => self.handle_heading(depth, text),
            LineKind::OrderedItem(item) => {
                let released = self.blocks.push_list_item(ListVariant::Ordered, item);
                self.emit(released);
            }
            LineKind::BulletItem(item) => {
                let released = self.blocks.push_list_item(ListVariant::Bullet, item);
                self.emit(released);
            }
            LineKind::Text(text) => {
                let released = self.blocks.push_text(text);
                self.emit(released);
                // Paragraph text always belongs to some section
                self.sections.ensure_section();
            }
        }
    }

    /// Handle a heading line
    fn handle_heading(&mut self, depth: u8, text: &str) {
        self.flush_open();

        let became_title = depth == 1 && self.sections.remember_title(text);

        if depth == self.section_level {
            self.sections.start_section(text, depth);
            return;
        }

        // A title heading above the section level, before any section,
        // names the document and produces no block
        if became_title && depth < self.section_level && !self.sections.has_section() {
            log::debug!("Using '{}' as document title", text);
            return;
        }

        self.sections.push_heading(depth, text);
    }

    fn flush_open(&mut self) {
        let released = self.blocks.flush_open();
        self.emit(released);
    }

    fn emit(&mut self, released: Option<PendingBlock>) {
        if let Some(pending) = released {
            self.sections.push_pending(pending);
        }
    }

    /// Flush remaining buffers and return the finished guide
    fn finalize(mut self) -> ParsedGuide {
        let released = self.blocks.finish();
        self.emit(released);

        let title = self.sections.document_title().map(str::to_string);
        ParsedGuide {
            title,
            sections: self.sections.finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_model::blocks::{Block, TextVariant};

    fn parse(markdown: &str) -> Vec<Section> {
        MarkdownParser::parse(markdown, &ParseOptions::default())
    }

    #[test]
    fn test_parse_single_title_with_chapters() {
        // Arrange: one H1 title followed by H2 chapters
        let markdown = "# Title\n\n## Intro\nHello world.\n\n## Next\n- a\n- b\n";

        // Act
        let sections = parse(markdown);

        // Assert: H2 chapters become sections, the H1 only names the guide
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Intro");
        assert_eq!(sections[0].level, 2);
        assert_eq!(sections[1].title, "Next");
        match &sections[0].blocks[..] {
            [Block::Text(p)] => {
                assert_eq!(p.variant, TextVariant::Paragraph);
                assert_eq!(p.content, "Hello world.");
            }
            other => panic!("Expected one paragraph, got {:?}", other),
        }
        match &sections[1].blocks[..] {
            [Block::List(list)] => {
                assert_eq!(list.variant, ListVariant::Bullet);
                assert_eq!(list.items, vec!["a", "b"]);
            }
            other => panic!("Expected one list, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_reports_document_title() {
        let parsed = MarkdownParser::parse_document(
            "# Title\n\n## Intro\ntext\n",
            &ParseOptions::default(),
        );

        assert_eq!(parsed.title.as_deref(), Some("Title"));
    }

    #[test]
    fn test_parse_multiple_h1_sections() {
        let sections = parse("# A\n# B\nbody\n");

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "A");
        assert!(sections[0].is_empty());
        assert_eq!(sections[1].title, "B");
        assert_eq!(sections[1].blocks.len(), 1);
    }

    #[test]
    fn test_parse_text_before_first_heading_uses_fallback() {
        // Arrange
        let options = ParseOptions {
            fallback_title: "Notes".to_string(),
            ..ParseOptions::default()
        };

        // Act
        let sections = MarkdownParser::parse("Loose intro.\n\n# Real\nBody\n", &options);

        // Assert
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Notes");
        assert_eq!(sections[0].id, "notes");
        assert_eq!(sections[1].title, "Real");
    }

    #[test]
    fn test_title_then_text_before_chapters_names_first_section() {
        let sections = parse("# Guide\nWelcome text.\n\n## One\nBody\n");

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Guide");
        assert_eq!(sections[0].blocks.len(), 1);
        assert_eq!(sections[1].title, "One");
    }

    #[test]
    fn test_in_section_headings() {
        let sections = parse("# T\n## Chapter\n### Part\n#### Detail\n");

        let headings: Vec<(&str, TextVariant, Option<u8>, &str)> = sections[0]
            .headings()
            .map(|h| (h.id.as_str(), h.variant, h.level, h.content.as_str()))
            .collect();
        assert_eq!(
            headings,
            vec![
                ("h-part", TextVariant::Heading, Some(3), "Part"),
                ("h-detail", TextVariant::Subheading, Some(4), "Detail"),
            ]
        );
    }

    #[test]
    fn test_explicit_level_overrides_auto() {
        let options = ParseOptions {
            section_heading_level: SectionHeadingLevel::Depth(1),
            ..ParseOptions::default()
        };

        let sections = MarkdownParser::parse("# Title\n## Intro\n## Next\n", &options);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Title");
        assert_eq!(sections[0].blocks.len(), 2);
    }

    #[test]
    fn test_rule_before_any_heading_creates_section() {
        let sections = parse("---\n# A\n");

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Imported Guide");
        assert!(matches!(sections[0].blocks[0], Block::Hr(_)));
    }

    #[test]
    fn test_deep_heading_before_any_section_uses_fallback() {
        // Arrange: no H1 or H2, so the level resolves to 1
        let markdown = "### Deep\ntext\n";

        // Act
        let sections = parse(markdown);

        // Assert
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Imported Guide");
        assert_eq!(sections[0].level, 1);
        match &sections[0].blocks[..] {
            [Block::Text(heading), Block::Text(body)] => {
                assert_eq!(heading.id, "h-deep");
                assert_eq!(heading.variant, TextVariant::Subheading);
                assert_eq!(heading.level, Some(3));
                assert_eq!(body.variant, TextVariant::Paragraph);
                assert_eq!(body.content, "text");
            }
            other => panic!("unexpected blocks: {:?}", other),
        }
    }

    #[test]
    fn test_deep_heading_after_title_uses_document_title() {
        // Arrange: the H1 names the guide, sections split on H2
        let options = ParseOptions {
            section_heading_level: SectionHeadingLevel::Depth(2),
            ..ParseOptions::default()
        };

        // Act
        let sections = MarkdownParser::parse("# Field Notes\n### Deep\ntext\n", &options);

        // Assert
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Field Notes");
        assert_eq!(sections[0].id, "field-notes");
        assert_eq!(sections[0].level, 2);
        match &sections[0].blocks[..] {
            [Block::Text(heading), Block::Text(body)] => {
                assert_eq!(heading.id, "h-deep");
                assert_eq!(heading.variant, TextVariant::Heading);
                assert_eq!(heading.level, Some(3));
                assert_eq!(body.content, "text");
            }
            other => panic!("unexpected blocks: {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_level_does_not_panic() {
        let options = ParseOptions {
            section_heading_level: SectionHeadingLevel::Depth(255),
            ..ParseOptions::default()
        };

        let sections = MarkdownParser::parse("# a\n## b\n", &options);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].level, 6);
        assert_eq!(sections[0].headings().count(), 1);
    }

    #[test]
    fn test_empty_fallback_title_uses_default() {
        let options = ParseOptions {
            fallback_title: String::new(),
            ..ParseOptions::default()
        };

        let sections = MarkdownParser::parse("Loose text.\n", &options);

        assert_eq!(sections[0].title, "Imported Guide");
        assert_eq!(sections[0].id, "imported-guide");
    }

    #[test]
    fn test_code_fence_suspends_other_rules() {
        let markdown = "# Doc\n```md\n# not a heading\n- not a list\n\n---\n```\nafter\n";

        let sections = parse(markdown);

        assert_eq!(sections.len(), 1);
        match &sections[0].blocks[..] {
            [Block::Code(code), Block::Text(after)] => {
                assert_eq!(code.language.as_deref(), Some("md"));
                assert_eq!(code.content, "# not a heading\n- not a list\n\n---");
                assert_eq!(after.content, "after");
            }
            other => panic!("Expected code then paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_fence_still_emits_code() {
        let sections = parse("```js\nconsole.log(1)\n");

        assert_eq!(sections.len(), 1);
        match &sections[0].blocks[..] {
            [Block::Code(code)] => {
                assert_eq!(code.language.as_deref(), Some("js"));
                assert_eq!(code.content, "console.log(1)");
            }
            other => panic!("Expected one code block, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_yields_one_empty_section() {
        let sections = parse("");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Imported Guide");
        assert!(sections[0].is_empty());
    }

    #[test]
    fn test_whitespace_only_input() {
        let sections = parse("   \n\n\t\n");

        assert_eq!(sections.len(), 1);
        assert!(sections[0].is_empty());
    }

    #[test]
    fn test_list_type_change_splits_lists() {
        let sections = parse("1. First\n2. Second\n- Switch\n");

        assert_eq!(sections.len(), 1);
        match &sections[0].blocks[..] {
            [Block::List(ordered), Block::List(bullet)] => {
                assert_eq!(ordered.variant, ListVariant::Ordered);
                assert_eq!(ordered.items, vec!["First", "Second"]);
                assert_eq!(bullet.variant, ListVariant::Bullet);
                assert_eq!(bullet.items, vec!["Switch"]);
            }
            other => panic!("Expected two lists, got {:?}", other),
        }
    }

    #[test]
    fn test_consecutive_lines_form_one_paragraph() {
        let sections = parse("# A\nline one\n  line two  \n\nnext para\n");

        let contents: Vec<&str> = sections[0]
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Text(t) => Some(t.content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(contents, vec!["line one line two", "next para"]);
    }

    #[test]
    fn test_crlf_input() {
        let sections = parse("# A\r\n```\r\nx\r\n```\r\ntext\r\n");

        match &sections[0].blocks[..] {
            [Block::Code(code), Block::Text(text)] => {
                assert_eq!(code.content, "x");
                assert_eq!(text.content, "text");
            }
            other => panic!("Unexpected blocks {:?}", other),
        }
    }

    #[test]
    fn test_parse_is_deterministic() {
        let markdown = "# A\n## B\ntext\n```\ncode\n```\n---\n1. x\n";

        assert_eq!(parse(markdown), parse(markdown));
    }
}
