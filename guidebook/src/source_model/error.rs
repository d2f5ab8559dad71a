//! Error types for source model options

use thiserror::Error;

/// Errors that can occur while interpreting parser options
///
/// Parsing itself never fails; only option values supplied as text
/// (command line, configuration) can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceModelError {
    /// Heading level text was neither "auto" nor a depth from 1 to 6
    #[error("Invalid section heading level '{value}': expected \"auto\" or a number from 1 to 6")]
    InvalidHeadingLevel {
        /// The rejected value
        value: String,
    },
}
