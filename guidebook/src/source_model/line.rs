//! Line classification
//!
//! Every physical line is assigned exactly one construct, checked in a
//! fixed order (first match wins):
//! 1. code fence delimiter
//! 2. raw code, while inside a fence
//! 3. blank line
//! 4. horizontal rule
//! 5. heading
//! 6. ordered list item
//! 7. bullet list item
//! 8. plain text

use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^`{3,}([\w+#.-]+)?$").unwrap());

static RULE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").unwrap());

static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

static ORDERED_ITEM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.+)$").unwrap());

static BULLET_ITEM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s+(.+)$").unwrap());

/// The construct a single line represents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Opening or closing fence, with an optional language tag
    Fence { language: Option<&'a str> },
    /// A line inside a fence, verbatim apart from a trailing `\r`
    Code(&'a str),
    /// Empty or whitespace-only line
    Blank,
    /// Three or more of the same `-`, `*` or `_`
    Rule,
    /// `#` to `######` followed by whitespace and text
    Heading { depth: u8, text: &'a str },
    /// `1. item`
    OrderedItem(&'a str),
    /// `- item`, `* item` or `+ item`
    BulletItem(&'a str),
    /// Anything else, trimmed
    Text(&'a str),
}

impl<'a> LineKind<'a> {
    /// Classify a raw line
    ///
    /// # Parameters
    /// * `raw` - The line as read from the source, without its `\n`
    /// * `in_fence` - Whether a code fence is currently open
    ///
    /// # Returns
    /// * `LineKind` - The construct this line represents
    pub fn classify(raw: &'a str, in_fence: bool) -> Self {
        let line = raw.trim();

        if let Some(captures) = FENCE_REGEX.captures(line) {
            return LineKind::Fence {
                language: captures.get(1).map(|m| m.as_str()),
            };
        }

        if in_fence {
            return LineKind::Code(raw.strip_suffix('\r').unwrap_or(raw));
        }

        if line.is_empty() {
            return LineKind::Blank;
        }

        if RULE_REGEX.is_match(line) {
            return LineKind::Rule;
        }

        if let Some((depth, text)) = match_heading(line) {
            return LineKind::Heading { depth, text };
        }

        if let Some(captures) = ORDERED_ITEM_REGEX.captures(line) {
            if let Some(item) = captures.get(1) {
                return LineKind::OrderedItem(item.as_str().trim());
            }
        }

        if let Some(captures) = BULLET_ITEM_REGEX.captures(line) {
            if let Some(item) = captures.get(1) {
                return LineKind::BulletItem(item.as_str().trim());
            }
        }

        LineKind::Text(line)
    }
}

/// Depth of a trimmed heading line, if it is one
pub fn heading_depth(line: &str) -> Option<u8> {
    match_heading(line).map(|(depth, _)| depth)
}

fn match_heading(line: &str) -> Option<(u8, &str)> {
    let captures = HEADING_REGEX.captures(line)?;
    let hashes = captures.get(1)?;
    let text = captures.get(2)?;
    let depth = u8::try_from(hashes.as_str().len()).ok()?;
    Some((depth, text.as_str().trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("```", LineKind::Fence { language: None })]
    #[case("```rust", LineKind::Fence { language: Some("rust") })]
    #[case("  ````c++  ", LineKind::Fence { language: Some("c++") })]
    #[case("", LineKind::Blank)]
    #[case("   \t", LineKind::Blank)]
    #[case("---", LineKind::Rule)]
    #[case("*****", LineKind::Rule)]
    #[case("___", LineKind::Rule)]
    #[case("# Title", LineKind::Heading { depth: 1, text: "Title" })]
    #[case("###   Spaced  ", LineKind::Heading { depth: 3, text: "Spaced" })]
    #[case("1. First", LineKind::OrderedItem("First"))]
    #[case("12.  Twelfth ", LineKind::OrderedItem("Twelfth"))]
    #[case("- dash", LineKind::BulletItem("dash"))]
    #[case("* star", LineKind::BulletItem("star"))]
    #[case("+ plus", LineKind::BulletItem("plus"))]
    #[case("  plain words ", LineKind::Text("plain words"))]
    fn test_classify_outside_fence(#[case] raw: &'static str, #[case] expected: LineKind<'static>) {
        assert_eq!(LineKind::classify(raw, false), expected);
    }

    #[rstest]
    #[case("``` js")]
    #[case("```js extra")]
    #[case("``")]
    #[case("-*-")]
    #[case("--")]
    #[case("#NoSpace")]
    #[case("####### seven")]
    #[case("1.NoSpace")]
    #[case("-NoSpace")]
    fn test_near_misses_are_plain_text(#[case] raw: &str) {
        assert_eq!(LineKind::classify(raw, false), LineKind::Text(raw.trim()));
    }

    #[rstest]
    #[case("# not a heading")]
    #[case("- not a list")]
    #[case("")]
    #[case("    indented()")]
    fn test_inside_fence_lines_are_raw_code(#[case] raw: &str) {
        assert_eq!(LineKind::classify(raw, true), LineKind::Code(raw));
    }

    #[test]
    fn test_inside_fence_strips_only_trailing_carriage_return() {
        assert_eq!(
            LineKind::classify("  let x = 1;  \r", true),
            LineKind::Code("  let x = 1;  ")
        );
    }

    #[test]
    fn test_fence_wins_inside_fence() {
        assert_eq!(
            LineKind::classify("```", true),
            LineKind::Fence { language: None }
        );
    }

    #[test]
    fn test_rule_takes_precedence_over_bullet() {
        assert_eq!(LineKind::classify("---", false), LineKind::Rule);
        assert_eq!(
            LineKind::classify("- - -", false),
            LineKind::BulletItem("- -")
        );
    }
}
