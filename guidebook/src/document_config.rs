//! Guide configuration from guidebook.toml

use crate::markdown_exporter::DEFAULT_DESCRIPTION;
use crate::source_model::{ParseOptions, SectionHeadingLevel, DEFAULT_FALLBACK_TITLE};
use crate::toc::DEFAULT_TOC_MIN_LEVEL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up next to the input
pub const CONFIG_FILE_NAME: &str = "guidebook.toml";

/// Guide configuration from guidebook.toml
///
/// Every key is optional; missing keys take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Display title; overrides the first H1 of the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Summary line for the llms.txt digest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Title for content that appears before any heading
    pub fallback_title: String,

    /// `"auto"` or a heading depth from 1 to 6
    pub section_heading_level: SectionHeadingLevel,

    /// Shallowest heading level listed in tables of contents
    pub toc_min_level: u8,

    /// Suffix repeated ids with `-2`, `-3`, ...
    pub unique_ids: bool,

    /// Language tag written into EPUB metadata
    pub language: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            section_heading_level: SectionHeadingLevel::Auto,
            toc_min_level: DEFAULT_TOC_MIN_LEVEL,
            unique_ids: false,
            language: "en".to_string(),
        }
    }
}

impl DocumentConfig {
    /// Load configuration from a guidebook.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the guidebook.toml configuration file
    ///
    /// # Returns
    /// * `Ok(DocumentConfig)` - Successfully loaded configuration
    /// * `Err(DocumentConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DocumentConfigError> {
        let content = fs::read_to_string(&path).map_err(DocumentConfigError::IoError)?;

        let config: DocumentConfig =
            toml::from_str(&content).map_err(DocumentConfigError::ParseError)?;

        Ok(config)
    }

    /// Save configuration to a guidebook.toml file
    ///
    /// # Parameters
    /// * `path` - Path where the guidebook.toml file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(DocumentConfigError)` - Error serializing or writing the configuration file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DocumentConfigError> {
        let content = toml::to_string_pretty(self).map_err(DocumentConfigError::SerializeError)?;

        fs::write(&path, content).map_err(DocumentConfigError::IoError)?;

        Ok(())
    }

    /// Location of the config file that belongs to an input path
    ///
    /// A directory input looks inside itself; a file input looks in its
    /// parent directory.
    pub fn config_path_for(input: &Path) -> PathBuf {
        let dir = if input.is_dir() {
            input
        } else {
            input.parent().unwrap_or_else(|| Path::new("."))
        };
        dir.join(CONFIG_FILE_NAME)
    }

    /// Load the config next to `input`, or defaults when there is none
    pub fn discover(input: &Path) -> Result<Self, DocumentConfigError> {
        let path = Self::config_path_for(input);
        if path.is_file() {
            log::info!("Using configuration {}", path.display());
            Self::load(&path)
        } else {
            log::debug!("No {} next to {}, using defaults", CONFIG_FILE_NAME, input.display());
            Ok(Self::default())
        }
    }

    /// Parser options carried by this configuration
    pub fn to_parse_options(&self) -> ParseOptions {
        ParseOptions {
            section_heading_level: self.section_heading_level,
            fallback_title: self.fallback_title.clone(),
            unique_ids: self.unique_ids,
        }
    }

    /// Display title: configured, else detected from the source, else fallback
    pub fn resolve_title(&self, detected: Option<&str>) -> String {
        self.title
            .as_deref()
            .or(detected)
            .unwrap_or(&self.fallback_title)
            .to_string()
    }

    /// Configured description, or the stock one
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }
}

/// Errors that can occur when loading or saving document configuration
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum DocumentConfigError {
    /// IO error when reading or writing file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    SerializeError(toml::ser::Error),
}

impl std::fmt::Display for DocumentConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentConfigError::IoError(e) => write!(f, "IO error: {}", e),
            DocumentConfigError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            DocumentConfigError::SerializeError(e) => write!(f, "TOML serialize error: {}", e),
        }
    }
}

impl std::error::Error for DocumentConfigError {}
