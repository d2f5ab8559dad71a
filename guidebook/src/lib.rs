//! guidebook - Markdown guides for readers
//!
//! Parses Markdown guides into sections of typed blocks and derives the
//! reader outputs from that one model: a search index, tables of
//! contents, reading statistics, a highlights digest, and llms.txt,
//! HTML and EPUB exports.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::enum_variant_names)]

pub mod document_config;
pub mod guide;
pub mod pipeline;
pub mod source_model;

// Derived views
pub mod highlights;
pub mod reading_stats;
pub mod search_index;
pub mod toc;

// Exporters
pub mod epub_exporter;
pub mod html_exporter;
pub mod markdown_exporter;

pub use document_config::{DocumentConfig, DocumentConfigError};
pub use guide::GuideDocument;
pub use pipeline::{load_guide, ParseError};
pub use source_model::{parse, Block, ParseOptions, Section, SectionHeadingLevel};
