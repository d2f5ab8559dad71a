//! guidebook - Markdown guides for readers
//!
//! A CLI tool for turning Markdown guides into a search index, reading
//! statistics, and llms.txt, HTML and EPUB exports.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat, SourceArgs};
use guidebook::document_config::CONFIG_FILE_NAME;
use guidebook::epub_exporter::{self, EpubOptions};
use guidebook::highlights::{highlights_to_markdown, Highlight};
use guidebook::search_index::{build_search_index, search};
use guidebook::toc::toc_items;
use guidebook::{html_exporter, markdown_exporter, pipeline, reading_stats};
use guidebook::{DocumentConfig, GuideDocument};
use std::path::{Path, PathBuf};

/// Starter guide written by `guidebook init`
const STARTER_GUIDE: &str = r#"# {{TITLE}}

## Getting Started

Welcome! Each second-level heading in this file starts a new section.

- Write plain paragraphs and lists
- Use `inline code` for commands

### Running the tools

```sh
guidebook stats
guidebook build -o guide.epub
```

---

## Next Steps

1. Rename the sections
2. Add your own content
"#;

/// Main entry point for the guidebook CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging if verbose
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    match cli.command {
        Commands::Init { path, force, title } => {
            handle_init_command(path, force, title)?;
        }

        Commands::Parse { source, output } => {
            handle_parse_command(&source, output)?;
        }

        Commands::Index { source, output } => {
            handle_index_command(&source, output)?;
        }

        Commands::Search { query, source } => {
            handle_search_command(&query, &source)?;
        }

        Commands::Build {
            source,
            output,
            format,
        } => {
            handle_build_command(&source, output, format)?;
        }

        Commands::Stats { source } => {
            handle_stats_command(&source)?;
        }

        Commands::Toc {
            source,
            section,
            min_level,
        } => {
            handle_toc_command(&source, section, min_level)?;
        }

        Commands::Highlights {
            from,
            source,
            output,
        } => {
            handle_highlights_command(&from, &source, output)?;
        }
    }

    Ok(())
}

/// Load the configuration for a source, with command-line overrides
fn load_config(source: &SourceArgs) -> Result<DocumentConfig> {
    let mut config = match source.config {
        Some(ref path) => DocumentConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => pipeline::discover_config(&source.input)
            .with_context(|| format!("Failed to load config for {}", source.input.display()))?,
    };
    source.apply_overrides(&mut config);
    Ok(config)
}

/// Load and parse the guide named by the source arguments
fn load_guide(source: &SourceArgs) -> Result<(GuideDocument, DocumentConfig)> {
    let config = load_config(source)?;
    let document = pipeline::load_guide(&source.input, &config)
        .with_context(|| format!("Failed to parse sources from {}", source.input.display()))?;
    Ok((document, config))
}

/// Print text, or write it to `output` when given
fn emit(text: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            markdown_exporter::write_output(&path, text.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Successfully wrote: {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

/// Handle the init command
fn handle_init_command(path: Option<PathBuf>, force: bool, title: Option<String>) -> Result<()> {
    let target_path = path.unwrap_or_else(|| PathBuf::from("."));
    let config_path = target_path.join(CONFIG_FILE_NAME);
    let guide_path = target_path.join("guide.md");

    if !force {
        for existing in [&config_path, &guide_path] {
            if existing.exists() {
                anyhow::bail!(
                    "{} already exists. Use --force to overwrite existing files",
                    existing.display()
                );
            }
        }
    }

    std::fs::create_dir_all(&target_path)
        .with_context(|| format!("Failed to create directory {}", target_path.display()))?;

    let config = DocumentConfig {
        title: title.clone(),
        ..DocumentConfig::default()
    };
    config
        .save(&config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let heading = title.as_deref().unwrap_or("My Guide");
    std::fs::write(&guide_path, STARTER_GUIDE.replace("{{TITLE}}", heading))
        .with_context(|| format!("Failed to write file {}", guide_path.display()))?;

    println!("✓ Created {}", config_path.display());
    println!("✓ Created {}", guide_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to configure your guide", CONFIG_FILE_NAME);
    println!("  2. Write your content in guide.md");
    println!("  3. Run 'guidebook build -o guide.epub' to export it");

    Ok(())
}

/// Handle the parse command
fn handle_parse_command(source: &SourceArgs, output: Option<PathBuf>) -> Result<()> {
    let (document, _) = load_guide(source)?;
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize document")?;
    emit(&json, output)
}

/// Handle the index command
fn handle_index_command(source: &SourceArgs, output: Option<PathBuf>) -> Result<()> {
    let (document, _) = load_guide(source)?;
    let index = build_search_index(&document.sections);
    let json = serde_json::to_string_pretty(&index).context("Failed to serialize search index")?;
    emit(&json, output)
}

/// Handle the search command
fn handle_search_command(query: &str, source: &SourceArgs) -> Result<()> {
    let (document, _) = load_guide(source)?;
    let index = build_search_index(&document.sections);
    let results = search(&index, query);

    if results.is_empty() {
        println!("No results for '{}'", query.trim());
        return Ok(());
    }

    println!("{} result(s) for '{}':", results.len(), query.trim());
    for entry in results {
        println!("  {} ({})", entry.title, entry.id);
        if !entry.excerpt.trim().is_empty() {
            println!("    {}", entry.excerpt.trim());
        }
    }

    Ok(())
}

/// Decide the output format and path for a build
fn resolve_output(
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    title: &str,
) -> Result<(PathBuf, OutputFormat)> {
    let stem = guidebook::source_model::slugify(title);
    let stem = if stem.is_empty() { "guide".to_string() } else { stem };

    match (output, format) {
        (Some(mut output), Some(format)) => {
            // Format explicitly specified, add appropriate extension if missing
            if output.extension().is_none() {
                output.set_extension(format.extension());
            }
            Ok((output, format))
        }
        (Some(output), None) => match output.extension().and_then(|s| s.to_str()) {
            Some(ext) => match OutputFormat::from_extension(ext) {
                Some(format) => Ok((output, format)),
                None => anyhow::bail!(
                    "Unknown output format for extension '.{}'. Supported: .txt, .epub, .html, .json\nUse --format to specify explicitly.",
                    ext
                ),
            },
            None => {
                let mut output = output;
                output.set_extension(OutputFormat::Epub.extension());
                Ok((output, OutputFormat::Epub))
            }
        },
        (None, Some(format)) => Ok((
            PathBuf::from(format!("{}.{}", stem, format.extension())),
            format,
        )),
        (None, None) => Ok((
            PathBuf::from(epub_exporter::default_file_name(title)),
            OutputFormat::Epub,
        )),
    }
}

/// Handle the build command
fn handle_build_command(
    source: &SourceArgs,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    println!("Building guide...");
    println!("Input: {}", source.input.display());

    let (document, config) = load_guide(source)?;
    let (output, format) = resolve_output(output, format, &document.title)?;
    println!("Output: {}", output.display());
    println!(
        "✓ Parsed {} sections ({} words)",
        document.sections.len(),
        document.word_count()
    );

    match format {
        OutputFormat::Llms => {
            markdown_exporter::to_llms_file(
                &document.sections,
                &document.title,
                config.description(),
                &output,
            )
            .with_context(|| format!("Failed to export llms.txt to {}", output.display()))?;
        }
        OutputFormat::Epub => {
            let options = EpubOptions::new(&document.title).with_language(&config.language);
            epub_exporter::to_epub(&document.sections, &options, &output)
                .with_context(|| format!("Failed to export EPUB to {}", output.display()))?;
        }
        OutputFormat::Html => {
            html_exporter::to_html(&document, config.toc_min_level, &output)
                .with_context(|| format!("Failed to export HTML to {}", output.display()))?;
        }
        OutputFormat::Json => {
            markdown_exporter::to_json_file(&document, &output)
                .with_context(|| format!("Failed to export JSON to {}", output.display()))?;
        }
    }

    println!("✓ Successfully wrote: {}", output.display());
    Ok(())
}

/// Handle the stats command
fn handle_stats_command(source: &SourceArgs) -> Result<()> {
    let (document, _) = load_guide(source)?;

    println!("{}", document.title);
    println!(
        "{} sections, {} blocks, {} words, ~{} min read\n",
        document.sections.len(),
        document.block_count(),
        document.word_count(),
        document.reading_time_minutes()
    );

    for section in &document.sections {
        let words = reading_stats::section_word_count(section);
        println!(
            "  {:>3}. {} ({} blocks, {} words, ~{} min)",
            section.order,
            section.title,
            section.blocks.len(),
            words,
            reading_stats::reading_time_minutes(words)
        );
    }

    Ok(())
}

/// Handle the toc command
fn handle_toc_command(
    source: &SourceArgs,
    section_id: Option<String>,
    min_level: Option<u8>,
) -> Result<()> {
    let (document, config) = load_guide(source)?;
    let min_level = min_level.unwrap_or(config.toc_min_level);

    let sections: Vec<_> = match section_id {
        Some(ref id) => vec![document
            .find_section(id)
            .with_context(|| format!("Section '{}' not found", id))?],
        None => document.sections.iter().collect(),
    };

    for section in sections {
        println!("{} ({})", section.title, section.id);
        for item in toc_items(section, min_level) {
            let indent = "  ".repeat(usize::from(item.level.saturating_sub(min_level)) + 1);
            println!("{}- {} (#{})", indent, item.text, item.id);
        }
    }

    Ok(())
}

/// Handle the highlights command
fn handle_highlights_command(
    from: &Path,
    source: &SourceArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let content = std::fs::read_to_string(from)
        .with_context(|| format!("Failed to read highlights {}", from.display()))?;
    let highlights: Vec<Highlight> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse highlights {}", from.display()))?;

    let (document, _) = load_guide(source)?;
    let digest = highlights_to_markdown(&highlights, &document.sections);
    emit(&digest, output)
}
