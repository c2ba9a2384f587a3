// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Output format and aspect ratio vocabularies accepted by the model

use serde::{Deserialize, Serialize};

/// Encoding of the generated image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpg,
    Png,
    Webp,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Jpg, OutputFormat::Png, OutputFormat::Webp];

    /// Parse an exact wire value; anything else is rejected
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "jpg" => Some(OutputFormat::Jpg),
            "png" => Some(OutputFormat::Png),
            "webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }

    /// Resolve a caller-supplied value, falling back to `jpg`
    pub fn resolve(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Jpg => "JPG",
            OutputFormat::Png => "PNG",
            OutputFormat::Webp => "WebP",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Jpg => "Best for photos, smaller file size",
            OutputFormat::Png => "Best for graphics, supports transparency",
            OutputFormat::Webp => "Modern format, excellent compression",
        }
    }
}

/// Shape of the generated image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape16x9,
    #[serde(rename = "21:9")]
    Ultrawide21x9,
    #[serde(rename = "3:2")]
    Photo3x2,
    #[serde(rename = "4:3")]
    Standard4x3,
    #[serde(rename = "9:16")]
    Portrait9x16,
    #[serde(rename = "2:3")]
    Portrait2x3,
    #[serde(rename = "match_input_image")]
    MatchInputImage,
}

impl AspectRatio {
    /// Display order used by the demo widget
    pub const ALL: [AspectRatio; 8] = [
        AspectRatio::MatchInputImage,
        AspectRatio::Square,
        AspectRatio::Landscape16x9,
        AspectRatio::Standard4x3,
        AspectRatio::Photo3x2,
        AspectRatio::Portrait9x16,
        AspectRatio::Portrait2x3,
        AspectRatio::Ultrawide21x9,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ratio| ratio.as_str() == value)
    }

    /// Resolve a caller-supplied value.
    ///
    /// Unknown or absent values become `match_input_image` when an input
    /// image accompanies the prompt and `1:1` otherwise.
    pub fn resolve(value: Option<&str>, has_input_image: bool) -> Self {
        value.and_then(Self::parse).unwrap_or(if has_input_image {
            AspectRatio::MatchInputImage
        } else {
            AspectRatio::Square
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape16x9 => "16:9",
            AspectRatio::Ultrawide21x9 => "21:9",
            AspectRatio::Photo3x2 => "3:2",
            AspectRatio::Standard4x3 => "4:3",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Portrait2x3 => "2:3",
            AspectRatio::MatchInputImage => "match_input_image",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Square => "Square (1:1)",
            AspectRatio::Landscape16x9 => "Landscape (16:9)",
            AspectRatio::Ultrawide21x9 => "Ultrawide (21:9)",
            AspectRatio::Photo3x2 => "Photo (3:2)",
            AspectRatio::Standard4x3 => "Standard (4:3)",
            AspectRatio::Portrait9x16 => "Portrait (9:16)",
            AspectRatio::Portrait2x3 => "Portrait (2:3)",
            AspectRatio::MatchInputImage => "Match Input",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AspectRatio::Square => "Perfect for social media",
            AspectRatio::Landscape16x9 => "Widescreen format",
            AspectRatio::Ultrawide21x9 => "Cinematic format",
            AspectRatio::Photo3x2 => "Classic camera ratio",
            AspectRatio::Standard4x3 => "Traditional photo format",
            AspectRatio::Portrait9x16 => "Mobile/story format",
            AspectRatio::Portrait2x3 => "Tall portrait format",
            AspectRatio::MatchInputImage => "Same as uploaded image",
        }
    }
}
