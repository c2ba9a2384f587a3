// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation response types

use serde::{Deserialize, Serialize};

use crate::diffusion::{GenerationResult, GenerationStatus};

/// Response from image generation.
///
/// Always sent with HTTP 200; `status` tells success, failure and
/// "still working" apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateImageResponse {
    /// Prediction id assigned by the model collaborator
    pub id: String,
    pub status: GenerationStatus,
    /// URL of the generated image (succeeded only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Failure reason or retry hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl From<GenerationResult> for GenerateImageResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            id: result.id,
            status: result.status,
            output: result.output,
            error: result.error,
            completed_at: result.completed_at,
        }
    }
}
