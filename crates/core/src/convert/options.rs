//! Conversion options for the Kramdown converter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How hashtag-style tokens (`#label`) are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMode {
    /// Escape tags that collide with a heading marker at line start.
    #[default]
    Escape,
    /// Move tags out of the body into the frontmatter `tags` list.
    #[serde(alias = "yaml")]
    Extract,
    /// Delete every tag token.
    Remove,
    /// Leave tags untouched.
    Keep,
}

/// How block references `((id))` are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefMode {
    #[default]
    Keep,
    /// Replace with a Markdown link to the block.
    Link,
}

/// How block embeds `!((id))` are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedMode {
    #[default]
    Keep,
    Remove,
}

/// Immutable set of independent conversion choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConvertOptions {
    pub tag_mode: TagMode,
    pub ref_mode: RefMode,
    pub embed_mode: EmbedMode,
    /// Keep the leading frontmatter block instead of stripping it.
    pub retain_frontmatter: bool,
    /// Remove pictographic characters.
    pub strip_emoji: bool,
}

/// Error for option strings that name no known mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ModeParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl FromStr for TagMode {
    type Err = ModeParseError;

    /// Unrecognized values fall back to [`TagMode::Keep`], mirroring the
    /// pass-through behavior of the tag stage.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "escape" => Self::Escape,
            "yaml" | "extract" => Self::Extract,
            "remove" => Self::Remove,
            _ => Self::Keep,
        })
    }
}

impl FromStr for RefMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "link" => Ok(Self::Link),
            _ => Err(ModeParseError {
                kind: "ref mode",
                value: s.to_string(),
                expected: "keep, link",
            }),
        }
    }
}

impl FromStr for EmbedMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "remove" => Ok(Self::Remove),
            _ => Err(ModeParseError {
                kind: "embed mode",
                value: s.to_string(),
                expected: "keep, remove",
            }),
        }
    }
}

impl fmt::Display for TagMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Escape => "escape",
            Self::Extract => "extract",
            Self::Remove => "remove",
            Self::Keep => "keep",
        };
        f.write_str(s)
    }
}

impl fmt::Display for RefMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keep => "keep",
            Self::Link => "link",
        })
    }
}

impl fmt::Display for EmbedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keep => "keep",
            Self::Remove => "remove",
        })
    }
}
