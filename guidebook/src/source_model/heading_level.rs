//! Section heading level selection
//!
//! A guide is split into sections on one Markdown heading depth. That
//! depth is either configured explicitly or inferred from how often each
//! heading depth occurs in the document.

use super::error::SourceModelError;
use super::line::heading_depth;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Deepest Markdown heading level
pub const MAX_HEADING_DEPTH: u8 = 6;

/// Requested section heading level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionHeadingLevel {
    /// Infer the level from heading statistics
    #[default]
    Auto,
    /// Split on this depth (1..=6)
    Depth(u8),
}

impl SectionHeadingLevel {
    /// Resolve the level for a document
    ///
    /// An explicit depth is clamped to 1..=6. For `Auto` the rules are,
    /// in order:
    /// 1. More than one depth-1 heading: split on depth 1
    /// 2. Any depth-2 heading: split on depth 2 (a lone H1 is the title)
    /// 3. Otherwise depth 1
    ///
    /// # Parameters
    /// * `lines` - All lines of the document
    ///
    /// # Returns
    /// * `u8` - The heading depth that starts a new section
    pub fn resolve<'a, I>(self, lines: I) -> u8
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            SectionHeadingLevel::Depth(depth) => depth.clamp(1, MAX_HEADING_DEPTH),
            SectionHeadingLevel::Auto => {
                let counts = count_headings(lines);
                if counts[0] > 1 {
                    1
                } else if counts[1] > 0 {
                    2
                } else {
                    1
                }
            }
        }
    }
}

/// Count headings per depth; index 0 holds depth 1
pub fn count_headings<'a, I>(lines: I) -> [usize; MAX_HEADING_DEPTH as usize]
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = [0; MAX_HEADING_DEPTH as usize];
    for line in lines {
        if let Some(depth) = heading_depth(line.trim()) {
            counts[usize::from(depth) - 1] += 1;
        }
    }
    counts
}

impl FromStr for SectionHeadingLevel {
    type Err = SourceModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("auto") {
            return Ok(SectionHeadingLevel::Auto);
        }

        match value.parse::<u8>() {
            Ok(depth) => Self::try_from(depth),
            Err(_) => Err(SourceModelError::InvalidHeadingLevel {
                value: value.to_string(),
            }),
        }
    }
}

impl TryFrom<u8> for SectionHeadingLevel {
    type Error = SourceModelError;

    fn try_from(depth: u8) -> Result<Self, Self::Error> {
        if (1..=MAX_HEADING_DEPTH).contains(&depth) {
            Ok(SectionHeadingLevel::Depth(depth))
        } else {
            Err(SourceModelError::InvalidHeadingLevel {
                value: depth.to_string(),
            })
        }
    }
}

impl fmt::Display for SectionHeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionHeadingLevel::Auto => write!(f, "auto"),
            SectionHeadingLevel::Depth(depth) => write!(f, "{}", depth),
        }
    }
}

/// Accepts either `"auto"` or an integer in configuration files
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Depth(u8),
    Name(String),
}

impl<'de> Deserialize<'de> for SectionHeadingLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match LevelRepr::deserialize(deserializer)? {
            LevelRepr::Depth(depth) => Self::try_from(depth),
            LevelRepr::Name(name) => name.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

impl Serialize for SectionHeadingLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SectionHeadingLevel::Auto => serializer.serialize_str("auto"),
            SectionHeadingLevel::Depth(depth) => serializer.serialize_u8(*depth),
        }
    }
}
