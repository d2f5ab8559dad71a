//! Command-line interface definitions for guidebook

use clap::{Args, Parser, Subcommand, ValueEnum};
use guidebook::{DocumentConfig, SectionHeadingLevel};
use std::path::PathBuf;

/// Output format for the build command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// llms.txt Markdown digest
    Llms,
    /// EPUB 2 package
    Epub,
    /// Standalone HTML reader page
    Html,
    /// Document model as JSON
    Json,
}

impl OutputFormat {
    /// Infer the format from an output file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(OutputFormat::Llms),
            "epub" => Some(OutputFormat::Epub),
            "html" | "htm" => Some(OutputFormat::Html),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Extension used when the output path has none
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Llms => "llms.txt",
            OutputFormat::Epub => "epub",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

/// CLI structure for the guidebook application
#[derive(Parser)]
#[command(name = "guidebook")]
#[command(version)]
#[command(about = "Turn Markdown guides into searchable reader outputs", long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read the guide from and how to parse it
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Markdown file or directory of Markdown files
    #[arg(value_name = "PATH", default_value = ".")]
    pub input: PathBuf,

    /// Configuration file (defaults to guidebook.toml next to the input)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Section heading level: auto or 1-6
    #[arg(long)]
    pub level: Option<SectionHeadingLevel>,

    /// Title for content that appears before any heading
    #[arg(long)]
    pub fallback_title: Option<String>,

    /// Document title
    #[arg(long)]
    pub title: Option<String>,

    /// Suffix repeated section and heading ids with -2, -3, ...
    #[arg(long)]
    pub unique_ids: bool,
}

impl SourceArgs {
    /// Apply command-line overrides on top of file configuration
    pub fn apply_overrides(&self, config: &mut DocumentConfig) {
        if let Some(level) = self.level {
            config.section_heading_level = level;
        }
        if let Some(ref fallback_title) = self.fallback_title {
            config.fallback_title = fallback_title.clone();
        }
        if let Some(ref title) = self.title {
            config.title = Some(title.clone());
        }
        if self.unique_ids {
            config.unique_ids = true;
        }
    }
}

/// Available subcommands for guidebook
#[derive(Subcommand)]
pub enum Commands {
    /// Create guidebook.toml and a starter guide
    Init {
        /// Directory to initialize (defaults to current directory)
        path: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Document title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Print the parsed document model as JSON
    Parse {
        #[command(flatten)]
        source: SourceArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the search index as JSON
    Index {
        #[command(flatten)]
        source: SourceArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Search section titles and text
    Search {
        /// Text to look for (case-insensitive)
        query: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Export the guide to llms.txt, EPUB, HTML or JSON
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file path (defaults to the slugged title)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (inferred from the output extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show word counts and reading time
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show the table of contents
    Toc {
        #[command(flatten)]
        source: SourceArgs,

        /// Only this section
        #[arg(long)]
        section: Option<String>,

        /// Shallowest heading level to list
        #[arg(long)]
        min_level: Option<u8>,
    },

    /// Render saved highlights as Markdown
    Highlights {
        /// JSON file with the saved highlights
        #[arg(long, value_name = "FILE")]
        from: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
