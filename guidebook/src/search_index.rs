//! Search index
//!
//! A static index with one entry per section, written as JSON by
//! `guidebook index` and matched with a plain case-insensitive substring
//! filter.

use crate::source_model::Section;
use serde::{Deserialize, Serialize};

/// Maximum excerpt length in characters
pub const EXCERPT_CHARS: usize = 240;

/// One searchable section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexEntry {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

/// Build one index entry per section
///
/// The excerpt is the plain text of every block joined with single
/// spaces, cut to [`EXCERPT_CHARS`] characters.
pub fn build_search_index(sections: &[Section]) -> Vec<SearchIndexEntry> {
    sections
        .iter()
        .map(|section| {
            let excerpt: String = section
                .blocks
                .iter()
                .map(|block| block.plain_text())
                .collect::<Vec<_>>()
                .join(" ")
                .chars()
                .take(EXCERPT_CHARS)
                .collect();

            SearchIndexEntry {
                id: section.id.clone(),
                title: section.title.clone(),
                excerpt,
                keywords: None,
            }
        })
        .collect()
}

/// Filter entries whose title, excerpt or keywords contain the query
///
/// Matching is case-insensitive; a blank query matches nothing.
pub fn search<'a>(index: &'a [SearchIndexEntry], query: &str) -> Vec<&'a SearchIndexEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    index
        .iter()
        .filter(|entry| {
            entry.title.to_lowercase().contains(&query)
                || entry.excerpt.to_lowercase().contains(&query)
                || entry
                    .keywords
                    .iter()
                    .flatten()
                    .any(|keyword| keyword.to_lowercase().contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_model::{parse, ParseOptions};

    fn index(markdown: &str) -> Vec<SearchIndexEntry> {
        build_search_index(&parse(markdown, &ParseOptions::default()))
    }

    #[test]
    fn test_excerpt_joins_block_text() {
        // Arrange
        let markdown = "# Setup\nInstall the tool.\n\n- step one\n- step two\n";

        // Act
        let entries = index(markdown);

        // Assert
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "setup");
        assert_eq!(entries[0].title, "Setup");
        assert_eq!(entries[0].excerpt, "Install the tool. step one step two");
    }

    #[test]
    fn test_code_contributes_empty_text() {
        let entries = index("# A\nbefore\n```\nhidden\n```\nafter\n");

        assert_eq!(entries[0].excerpt, "before  after");
    }

    #[test]
    fn test_excerpt_is_truncated_by_characters() {
        let long = "é".repeat(300);
        let entries = index(&format!("# A\n{}\n", long));

        assert_eq!(entries[0].excerpt.chars().count(), EXCERPT_CHARS);
    }

    #[test]
    fn test_empty_section_has_empty_excerpt() {
        let entries = index("");

        assert_eq!(entries[0].excerpt, "");
    }

    #[test]
    fn test_search_matches_title_excerpt_and_keywords() {
        let mut entries = index("# Install\nRun the setup.\n# Usage\nCall it.\n# Misc\nOther.\n");
        entries[2].keywords = Some(vec!["Troubleshooting".to_string()]);

        let by_title: Vec<&str> = search(&entries, "INSTALL").iter().map(|e| e.id.as_str()).collect();
        let by_excerpt: Vec<&str> = search(&entries, "call").iter().map(|e| e.id.as_str()).collect();
        let by_keyword: Vec<&str> = search(&entries, " trouble ").iter().map(|e| e.id.as_str()).collect();

        assert_eq!(by_title, vec!["install"]);
        assert_eq!(by_excerpt, vec!["usage"]);
        assert_eq!(by_keyword, vec!["misc"]);
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let entries = index("# A\ntext\n");

        assert!(search(&entries, "   ").is_empty());
    }

    #[test]
    fn test_keywords_omitted_from_json_when_absent() {
        let entries = index("# A\ntext\n");

        let json = serde_json::to_string(&entries[0]).unwrap();

        assert_eq!(json, r#"{"id":"a","title":"A","excerpt":"text"}"#);
    }
}
