//! End-to-end parsing scenarios through the public API

use guidebook::source_model::{
    count_headings, slugify, Block, BlockAccumulator, LineKind, ListVariant, MarkdownParser,
    ParseOptions, SectionHeadingLevel, TextVariant,
};
use guidebook::{parse, Section};
use rstest::rstest;

fn parse_auto(markdown: &str) -> Vec<Section> {
    parse(markdown, &ParseOptions::default())
}

#[test]
fn test_scenario_single_title_with_chapters() {
    // Arrange
    let markdown = "# Title\n\n## Intro\nHello world.\n\n## Next\n- a\n- b\n";

    // Act
    let parsed = MarkdownParser::parse_document(markdown, &ParseOptions::default());

    // Assert
    assert_eq!(parsed.title.as_deref(), Some("Title"));
    let sections = parsed.sections;
    assert_eq!(sections.len(), 2);
    assert_eq!((sections[0].id.as_str(), sections[0].level), ("intro", 2));
    assert_eq!((sections[1].id.as_str(), sections[1].order), ("next", 2));
    assert!(matches!(
        &sections[0].blocks[..],
        [Block::Text(p)] if p.variant == TextVariant::Paragraph && p.content == "Hello world."
    ));
    assert!(matches!(
        &sections[1].blocks[..],
        [Block::List(l)] if l.variant == ListVariant::Bullet && l.items == ["a", "b"]
    ));
}

#[test]
fn test_scenario_multiple_h1() {
    let sections = parse_auto("# A\n# B\nbody\n");

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, "A");
    assert!(sections[0].blocks.is_empty());
    assert_eq!(sections[1].title, "B");
    assert!(matches!(
        &sections[1].blocks[..],
        [Block::Text(p)] if p.content == "body"
    ));
}

#[test]
fn test_scenario_unterminated_fence() {
    let sections = parse_auto("```js\nconsole.log(1)\n");

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
fn test_scenario_empty_input() {
    let options = ParseOptions {
        fallback_title: "Untitled".to_string(),
        ..ParseOptions::default()
    };

    let sections = parse("", &options);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "Untitled");
    assert_eq!(sections[0].order, 1);
    assert!(sections[0].blocks.is_empty());
}

#[test]
fn test_scenario_list_type_change() {
    let sections = parse_auto("1. First\n2. Second\n- Switch\n");

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

#[rstest]
#[case("# A\n# B\n## c\n", 1)]
#[case("# A\n## B\n## C\n", 2)]
#[case("# A\ntext\n", 1)]
#[case("## Only chapters\n## More\n", 2)]
#[case("### deep\n", 1)]
#[case("", 1)]
fn test_auto_level_resolution(#[case] markdown: &str, #[case] expected: u8) {
    assert_eq!(SectionHeadingLevel::Auto.resolve(markdown.lines()), expected);
}

#[test]
fn test_explicit_level_ignores_content() {
    let level = SectionHeadingLevel::Depth(3);

    assert_eq!(level.resolve("# A\n# B\n".lines()), 3);
    assert_eq!(count_headings("# A\n# B\n## C\n".lines())[..2], [2, 1]);
}

#[test]
fn test_parse_is_deterministic() {
    let markdown = "# Guide\n## One\ntext\n### Sub\n- a\n```\ncode\n```\n## One\n---\n";

    let first = parse_auto(markdown);
    let second = parse_auto(markdown);

    assert_eq!(first, second);
}

#[test]
fn test_every_content_line_is_represented() {
    // Arrange: each content line carries a unique marker word
    let markdown = "\
# Doc
w01 intro
w02 continues

- w03 bullet
- w04 bullet
1. w05 ordered
w06 after list
---
### w07 heading
> w08 quote-like text
```
w09 code
```
";

    // Act
    let sections = parse_auto(markdown);

    // Assert
    let text: String = sections
        .iter()
        .flat_map(|s| s.blocks.iter())
        .map(|b| match b {
            Block::Code(code) => code.content.clone(),
            other => other.plain_text(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    for marker in 1..=9 {
        let word = format!("w{:02}", marker);
        assert_eq!(text.matches(&word).count(), 1, "{} missing or repeated", word);
    }
}

#[test]
fn test_fence_contents_are_verbatim() {
    let inner = ["# not a heading", "- not a list", "", "    indented", "1. nor ordered", "---"];
    let markdown = format!("# A\n```text\n{}\n```\nafter\n", inner.join("\r\n"));

    let sections = parse_auto(&markdown);

    match &sections[0].blocks[..] {
        [Block::Code(code), Block::Text(after)] => {
            assert_eq!(code.content, inner.join("\n"));
            assert_eq!(after.content, "after");
        }
        other => panic!("Unexpected blocks {:?}", other),
    }
}

#[test]
fn test_block_ids_unique_within_a_parse() {
    let sections = parse_auto("# A\np\n\n- l\n---\n# B\nq\n```\nc\n```\n");

    let ids: Vec<&str> = sections
        .iter()
        .flat_map(|s| s.blocks.iter().map(Block::id))
        .collect();

    assert_eq!(ids, vec!["p-0", "list-1", "hr-2", "p-3", "code-4"]);
}

#[test]
fn test_duplicate_titles_keep_or_suffix_ids() {
    let markdown = "# Overview\n# Setup\n# Overview\n";

    let kept = parse_auto(markdown);
    let unique = parse(
        markdown,
        &ParseOptions {
            unique_ids: true,
            ..ParseOptions::default()
        },
    );

    assert_eq!(kept[2].id, "overview");
    assert_eq!(unique[2].id, "overview-2");
}

#[rstest]
#[case("Getting Started")]
#[case("  Spaces  and  TABS\t")]
#[case("C++ / Rust: 2024!")]
#[case("already-slugged")]
fn test_slug_is_idempotent(#[case] title: &str) {
    let once = slugify(title);

    assert_eq!(slugify(&once), once);
}

#[test]
fn test_accumulator_never_holds_two_buffers() {
    let markdown = "text\n- a\n1. b\nmore\n```\ncode\n```\n- c\n\npara\n";
    let mut acc = BlockAccumulator::new();

    for line in markdown.lines() {
        match LineKind::classify(line, acc.in_fence()) {
            LineKind::Fence { language } => {
                acc.toggle_fence(language);
            }
            LineKind::Code(code) => acc.push_code(code),
            LineKind::Text(text) => {
                acc.push_text(text);
            }
            LineKind::BulletItem(item) => {
                acc.push_list_item(ListVariant::Bullet, item);
            }
            LineKind::OrderedItem(item) => {
                acc.push_list_item(ListVariant::Ordered, item);
            }
            _ => {
                acc.flush_open();
            }
        }
        assert!(acc.open_buffers() <= 1, "after line {:?}", line);
    }
}
