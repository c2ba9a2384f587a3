// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation request types and validation

use serde::{Deserialize, Deserializer, Serialize};

use crate::api::ApiError;
use crate::diffusion::GenerationRequest;

/// Request for image generation via POST /api/generate-image
///
/// Fields of the wrong JSON type are read as absent rather than rejecting
/// the whole body, so an odd `output_format` still falls back to `jpg`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateImageRequest {
    /// Text prompt describing the desired image or edit
    #[serde(default, deserialize_with = "lenient_string")]
    pub prompt: Option<String>,

    /// Public URL of a previously uploaded input image
    #[serde(default, deserialize_with = "lenient_string")]
    pub input_image: Option<String>,

    /// jpg, png or webp
    #[serde(default, deserialize_with = "lenient_string")]
    pub output_format: Option<String>,

    /// One of the supported ratios or `match_input_image`
    #[serde(default, deserialize_with = "lenient_string")]
    pub aspect_ratio: Option<String>,
}

impl GenerateImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    /// Validate and normalize into a [`GenerationRequest`]
    pub fn validate(&self) -> Result<GenerationRequest, ApiError> {
        GenerationRequest::from_raw(
            self.prompt.as_deref(),
            self.input_image.as_deref(),
            self.output_format.as_deref(),
            self.aspect_ratio.as_deref(),
        )
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}
