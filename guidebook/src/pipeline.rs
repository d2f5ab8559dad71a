//! Source loading pipeline
//!
//! This module turns an input path into a [`GuideDocument`]:
//! 1. **Discovery**: a single Markdown file, or every `.md` file under a
//!    directory in file-name order
//! 2. **Parsing**: each source is parsed on its own (in parallel with the
//!    `parallel` feature)
//! 3. **Assembly**: sections are concatenated, re-numbered and checked
//!    for colliding ids

use crate::document_config::DocumentConfig;
use crate::guide::GuideDocument;
use crate::source_model::{MarkdownParser, ParseOptions, ParsedGuide};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// File extensions treated as Markdown sources
const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Load and parse a guide from a file or directory
///
/// # Parameters
/// * `input` - A Markdown file or a directory of Markdown files
/// * `config` - Parse options and title settings
///
/// # Returns
/// * `Ok(GuideDocument)` - The assembled guide
/// * `Err(ParseError)` - Error reading sources or no sources found
pub fn load_guide(input: &Path, config: &DocumentConfig) -> Result<GuideDocument, ParseError> {
    let paths = discover_sources(input)?;
    log::info!("Parsing {} source file(s) from {}", paths.len(), input.display());

    let options = config.to_parse_options();

    #[cfg(feature = "parallel")]
    let parsed: Result<Vec<ParsedGuide>, ParseError> = paths
        .par_iter()
        .map(|path| parse_markdown_file(path, &options))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let parsed: Result<Vec<ParsedGuide>, ParseError> = paths
        .iter()
        .map(|path| parse_markdown_file(path, &options))
        .collect();

    let parsed = parsed?;
    let detected = parsed.iter().find_map(|guide| guide.title.as_deref());
    let title = config.resolve_title(detected);

    let sections = parsed.into_iter().flat_map(|guide| guide.sections).collect();
    let mut document = GuideDocument::new(title, sections);
    document.normalize_order();

    if config.unique_ids && paths.len() > 1 {
        document.make_section_ids_unique();
    }

    let duplicates = document.duplicate_section_ids();
    if !duplicates.is_empty() {
        log::warn!(
            "Duplicate section ids (links to these resolve to the first match): {}",
            duplicates.join(", ")
        );
    }

    log::info!(
        "Loaded '{}': {} sections, {} blocks",
        document.title,
        document.sections.len(),
        document.block_count()
    );

    Ok(document)
}

/// Load a guide using the configuration found next to `input`
pub fn load_guide_with_discovered_config(input: &Path) -> Result<GuideDocument, ParseError> {
    let config = discover_config(input)?;
    load_guide(input, &config)
}

/// Find the guidebook.toml belonging to `input`, or defaults
pub fn discover_config(input: &Path) -> Result<DocumentConfig, ParseError> {
    DocumentConfig::discover(input)
        .map_err(|e| ParseError::ConfigError(DocumentConfig::config_path_for(input), Box::new(e)))
}

/// List the Markdown sources for an input path
///
/// A file is returned as-is whatever its extension. A directory is walked
/// recursively; sources come back sorted by file name.
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - At least one source path
/// * `Err(ParseError)` - Input missing, unreadable, or has no Markdown files
pub fn discover_sources(input: &Path) -> Result<Vec<PathBuf>, ParseError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(ParseError::InputNotFound(input.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(input)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    if paths.is_empty() {
        return Err(ParseError::NoMarkdownFiles(input.to_path_buf()));
    }
    Ok(paths)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Parse a single markdown file
///
/// # Parameters
/// * `path` - Path to the markdown file to parse
/// * `options` - Parser options shared by every source
///
/// # Returns
/// * `Ok(ParsedGuide)` - Sections and detected title of this file
/// * `Err(ParseError)` - Error reading the file
fn parse_markdown_file(path: &Path, options: &ParseOptions) -> Result<ParsedGuide, ParseError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ParseError::IoError(path.to_path_buf(), e))?;

    let parsed = MarkdownParser::parse_document(&content, options);
    log::debug!(
        "Parsed {}: {} sections",
        path.display(),
        parsed.sections.len()
    );

    Ok(parsed)
}

/// Parsing errors
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, #[source] std::io::Error),

    #[error("Input not found: {path}", path = .0.display())]
    InputNotFound(PathBuf),

    #[error("No Markdown files found in {path}", path = .0.display())]
    NoMarkdownFiles(PathBuf),

    #[error("Config error loading {path}: {source}", path = .0.display(), source = .1)]
    ConfigError(
        PathBuf,
        #[source] Box<crate::document_config::DocumentConfigError>,
    ),
}
