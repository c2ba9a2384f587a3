// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation adapter: validation, payload construction, status mapping

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::client::{PredictionBackend, PredictionError, PredictionInput, SAFETY_TOLERANCE};
use super::options::{AspectRatio, OutputFormat};
use super::status::{normalize, GenerationResult};
use crate::api::ApiError;

/// Validated, normalized generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub input_image: Option<String>,
    pub output_format: OutputFormat,
    pub aspect_ratio: AspectRatio,
}

impl GenerationRequest {
    /// Validate raw caller values.
    ///
    /// The prompt must be non-blank; formats and ratios never fail and
    /// fall back to their defaults instead.
    pub fn from_raw(
        prompt: Option<&str>,
        input_image: Option<&str>,
        output_format: Option<&str>,
        aspect_ratio: Option<&str>,
    ) -> Result<Self, ApiError> {
        let prompt = prompt
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApiError::invalid_input("Prompt is required"))?;

        let input_image = input_image
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(Self {
            prompt: prompt.to_string(),
            output_format: OutputFormat::resolve(output_format),
            aspect_ratio: AspectRatio::resolve(aspect_ratio, input_image.is_some()),
            input_image,
        })
    }

    /// Model input with the fixed moderation settings applied
    pub fn to_input(&self) -> PredictionInput {
        PredictionInput {
            prompt: self.prompt.clone(),
            aspect_ratio: self.aspect_ratio,
            output_format: self.output_format,
            safety_tolerance: SAFETY_TOLERANCE,
            prompt_upsampling: false,
            input_image: self.input_image.clone(),
        }
    }
}

/// Stateless generation adapter.
///
/// The credential is injected at construction; a missing credential fails
/// every call before the backend is touched.
pub struct GenerationService {
    backend: Arc<dyn PredictionBackend>,
    api_token: Option<String>,
}

impl GenerationService {
    pub fn new(backend: Arc<dyn PredictionBackend>, api_token: Option<String>) -> Self {
        Self {
            backend,
            api_token: api_token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }

    /// Run one generation and normalize its outcome
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, ApiError> {
        let api_token = self.api_token.as_deref().ok_or_else(|| {
            error!("Model API token is not configured");
            ApiError::missing_configuration()
        })?;

        let input = request.to_input();
        info!(
            "Sending prediction: model={}, prompt_len={}, has_input_image={}, aspect_ratio={}, output_format={}",
            self.backend.model_name(),
            input.prompt.len(),
            input.input_image.is_some(),
            input.aspect_ratio.as_str(),
            input.output_format.as_str()
        );

        let prediction = self
            .backend
            .create_prediction(api_token, &input)
            .await
            .map_err(|e| {
                warn!("Prediction failed: {}", e);
                match e {
                    PredictionError::Status { status, message } => {
                        ApiError::Upstream { status, message }
                    }
                    other => ApiError::Internal(other.to_string()),
                }
            })?;

        debug!(
            "Prediction response: id={}, status={:?}, has_output={}",
            prediction.id,
            prediction.status,
            prediction.output_url().is_some()
        );

        let result = normalize(prediction);
        if result.is_advisory() {
            info!("Prediction {} still in progress", result.id);
        }
        Ok(result)
    }
}
