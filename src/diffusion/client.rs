// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client for the hosted Flux Kontext model via the Replicate predictions API

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::options::{AspectRatio, OutputFormat};
use super::status::Prediction;
use crate::config::GenerationConfig;

/// Fixed moderation level sent with every prediction
pub const SAFETY_TOLERANCE: u8 = 2;

/// Fallback message when an upstream error body carries nothing readable
pub const DEFAULT_UPSTREAM_ERROR: &str = "Failed to generate image";

/// Model input, serialized as the `input` object of a prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub output_format: OutputFormat,
    pub safety_tolerance: u8,
    pub prompt_upsampling: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_image: Option<String>,
}

#[derive(Serialize)]
struct PredictionRequestBody<'a> {
    input: &'a PredictionInput,
}

#[derive(Debug, Error)]
pub enum PredictionError {
    /// Non-2xx answer; `message` is already human-readable
    #[error("model endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request to model endpoint failed: {0}")]
    Transport(String),

    #[error("invalid prediction response: {0}")]
    Decode(String),
}

/// Something that can run a prediction to completion
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    /// Create a prediction and wait for the collaborator's answer
    async fn create_prediction(
        &self,
        api_token: &str,
        input: &PredictionInput,
    ) -> Result<Prediction, PredictionError>;

    /// Model identifier for logging
    fn model_name(&self) -> &str;
}

/// Replicate predictions client.
///
/// Issues a single `POST /models/{owner}/{name}/predictions` with
/// `Prefer: wait` so the answer arrives in the same response. No retries.
pub struct ReplicateClient {
    client: Client,
    api_base: String,
    model: String,
}

impl ReplicateClient {
    pub fn new(config: &GenerationConfig) -> Result<Self, PredictionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PredictionError::Transport(e.to_string()))?;

        let api_base = config.api_base.trim_end_matches('/').to_string();
        info!(
            "Prediction client configured: api_base={}, model={}",
            api_base, config.model
        );

        Ok(Self {
            client,
            api_base,
            model: config.model.clone(),
        })
    }

    pub fn predictions_url(&self) -> String {
        format!("{}/models/{}/predictions", self.api_base, self.model)
    }
}

#[async_trait]
impl PredictionBackend for ReplicateClient {
    async fn create_prediction(
        &self,
        api_token: &str,
        input: &PredictionInput,
    ) -> Result<Prediction, PredictionError> {
        let url = self.predictions_url();
        debug!("Prediction POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "wait")
            .json(&PredictionRequestBody { input })
            .send()
            .await
            .map_err(|e| PredictionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("Model endpoint error: {} {}", status, text);
            return Err(PredictionError::Status {
                status: status.as_u16(),
                message: upstream_error_message(&text),
            });
        }

        response
            .json::<Prediction>()
            .await
            .map_err(|e| PredictionError::Decode(e.to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Extract a readable message from an upstream error body.
///
/// Prefers `detail`, then `error`. Structured values such as validation
/// error lists are rendered as JSON; unparseable bodies yield the default.
pub fn upstream_error_message(body: &str) -> String {
    let non_empty_text = |value: Option<serde_json::Value>| match value? {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    };

    serde_json::from_str::<UpstreamErrorBody>(body)
        .ok()
        .and_then(|parsed| non_empty_text(parsed.detail).or_else(|| non_empty_text(parsed.error)))
        .unwrap_or_else(|| DEFAULT_UPSTREAM_ERROR.to_string())
}
