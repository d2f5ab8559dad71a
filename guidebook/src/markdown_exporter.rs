//! Plain-text exporters
//!
//! This module writes the text outputs of a guide:
//! - The llms.txt digest, a flattened Markdown rendition meant for
//!   language-model ingestion
//! - Pretty-printed JSON for the document model, search index and TOC

use crate::source_model::{Block, Section, TextVariant};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Description used when the configuration does not provide one
pub const DEFAULT_DESCRIPTION: &str = "A reader-first framework for teaching materials and guides.";

/// Errors that can occur during text export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Render sections as an llms.txt digest
///
/// # Parameters
/// * `sections` - Parsed sections in reading order
/// * `title` - Document title for the top heading
/// * `description` - Summary line below the title
///
/// # Returns
/// * `String` - The digest, lines joined with `\n`
pub fn to_llms_text(sections: &[Section], title: &str, description: &str) -> String {
    let mut lines = vec![
        format!("# {}", title),
        String::new(),
        description.to_string(),
        String::new(),
        "## Contents".to_string(),
    ];
    lines.extend(sections.iter().map(|section| format!("- {}", section.title)));
    lines.push(String::new());
    lines.push("## Content".to_string());

    for section in sections {
        lines.push(format!("# {}", section.title));
        for block in &section.blocks {
            write_block(&mut lines, block);
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Write the llms.txt digest to a file
///
/// # Parameters
/// * `sections` - Parsed sections in reading order
/// * `title` - Document title
/// * `description` - Summary line below the title
/// * `output_path` - Destination file; parent directories are created
///
/// # Returns
/// * `Ok(())` - Successfully written
/// * `Err(ExportError)` - Error writing the file
pub fn to_llms_file(
    sections: &[Section],
    title: &str,
    description: &str,
    output_path: &Path,
) -> Result<(), ExportError> {
    let text = to_llms_text(sections, title, description);
    write_output(output_path, text.as_bytes())?;
    log::info!("Wrote llms digest to {}", output_path.display());
    Ok(())
}

/// Serialize any model value as pretty JSON to a file
pub fn to_json_file<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(value)?;
    write_output(output_path, json.as_bytes())?;
    Ok(())
}

/// Write bytes to a path, creating parent directories first
pub fn write_output(output_path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = fs::File::create(output_path)?;
    file.write_all(bytes)?;
    Ok(())
}

/// Append the digest lines for one block
fn write_block(lines: &mut Vec<String>, block: &Block) {
    match block {
        Block::Text(text) => match text.variant {
            TextVariant::Heading | TextVariant::Subheading => {
                lines.push(format!("## {}", text.content));
            }
            TextVariant::Paragraph | TextVariant::Quote => lines.push(text.content.clone()),
        },

        Block::List(list) => {
            lines.extend(list.items.iter().map(|item| format!("- {}", item)));
        }

        Block::Callout(callout) => {
            if let Some(title) = callout.title.as_deref().filter(|t| !t.is_empty()) {
                lines.push(format!("**{}**", title));
            }
            lines.push(callout.content.clone());
        }

        Block::Code(code) => {
            lines.push(format!("```{}", code.language.as_deref().unwrap_or("")));
            lines.push(code.content.clone());
            lines.push("```".to_string());
        }

        Block::Hr(_) => lines.push("---".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_model::{parse, CalloutBlock, CalloutTone, ParseOptions};
    use tempfile::TempDir;

    #[test]
    fn test_llms_text_layout() {
        // Arrange
        let sections = parse(
            "# Intro\nHello.\n## Part\n- a\n- b\n# Code\n```rust\nfn x() {}\n```\n---\n",
            &ParseOptions::default(),
        );

        // Act
        let text = to_llms_text(&sections, "Guide", DEFAULT_DESCRIPTION);

        // Assert
        let expected = [
            "# Guide",
            "",
            DEFAULT_DESCRIPTION,
            "",
            "## Contents",
            "- Intro",
            "- Code",
            "",
            "## Content",
            "# Intro",
            "Hello.",
            "## Part",
            "- a",
            "- b",
            "",
            "# Code",
            "```rust",
            "fn x() {}",
            "```",
            "---",
            "",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_callout_title_is_bold_when_present() {
        let mut lines = Vec::new();
        let untitled = Block::Callout(CalloutBlock {
            id: "c-1".to_string(),
            tone: CalloutTone::Note,
            title: None,
            content: "Body".to_string(),
        });
        let titled = Block::Callout(CalloutBlock {
            id: "c-2".to_string(),
            tone: CalloutTone::Tip,
            title: Some("Tip".to_string()),
            content: "Read first.".to_string(),
        });

        write_block(&mut lines, &untitled);
        write_block(&mut lines, &titled);

        assert_eq!(lines, vec!["Body", "**Tip**", "Read first."]);
    }

    #[test]
    fn test_to_llms_file_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out/guide.llms.txt");
        let sections = parse("body", &ParseOptions::default());

        to_llms_file(&sections, "Guide", "Desc", &output).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("# Guide\n\nDesc\n"));
        assert!(written.contains("# Imported Guide\nbody\n"));
    }

    #[test]
    fn test_to_json_file_writes_block_tags() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("model.json");
        let sections = parse("# A\ntext\n", &ParseOptions::default());

        to_json_file(&sections, &output).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"type\": \"text\""));
        assert!(written.contains("\"variant\": \"paragraph\""));
    }
}
