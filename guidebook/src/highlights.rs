//! Reader highlights
//!
//! Highlights are produced by a reader front end and stored as JSON. This
//! module only models them and renders the Markdown digest; capturing the
//! selection and persisting it belong to the front end.

use crate::source_model::Section;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A passage a reader marked in a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub id: String,
    pub section_id: String,
    pub text: String,
    /// Creation time in milliseconds since the Unix epoch
    pub date: i64,
}

/// Render highlights as a Markdown digest
///
/// Groups appear in the order their section is first mentioned in
/// `highlights`; within a group the newest highlight comes first. A
/// section id with no matching section is printed as-is.
///
/// # Parameters
/// * `highlights` - Highlights in stored order
/// * `sections` - Parsed sections used to resolve titles
///
/// # Returns
/// * `String` - The digest, lines joined with `\n`
pub fn highlights_to_markdown(highlights: &[Highlight], sections: &[Section]) -> String {
    let titles: HashMap<&str, &str> = sections
        .iter()
        .map(|section| (section.id.as_str(), section.title.as_str()))
        .collect();

    let mut groups: Vec<(&str, Vec<&Highlight>)> = Vec::new();
    for highlight in highlights {
        match groups
            .iter_mut()
            .find(|(section_id, _)| *section_id == highlight.section_id)
        {
            Some((_, items)) => items.push(highlight),
            None => groups.push((highlight.section_id.as_str(), vec![highlight])),
        }
    }

    let mut lines = vec!["# Highlights".to_string(), String::new()];
    for (section_id, mut items) in groups {
        let title = titles.get(section_id).copied().unwrap_or(section_id);
        lines.push(format!("## {}", title));

        items.sort_by(|a, b| b.date.cmp(&a.date));
        lines.extend(items.iter().map(|item| format!("- {}", item.text)));
        lines.push(String::new());
    }

    lines.join("\n")
}
