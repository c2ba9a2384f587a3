// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::http_server::AppState;
use crate::diffusion::{AspectRatio, OutputFormat};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether the model credential is present
    pub generation_configured: bool,
}

/// One selectable option in the demo widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionInfo {
    pub value: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptionsResponse {
    pub output_formats: Vec<OptionInfo>,
    pub aspect_ratios: Vec<OptionInfo>,
}

impl GenerationOptionsResponse {
    pub fn current() -> Self {
        Self {
            output_formats: OutputFormat::ALL
                .iter()
                .map(|f| OptionInfo {
                    value: f.as_str().to_string(),
                    label: f.label().to_string(),
                    description: f.description().to_string(),
                })
                .collect(),
            aspect_ratios: AspectRatio::ALL
                .iter()
                .map(|r| OptionInfo {
                    value: r.as_str().to_string(),
                    label: r.label().to_string(),
                    description: r.description().to_string(),
                })
                .collect(),
        }
    }
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::version::VERSION_NUMBER.to_string(),
        generation_configured: state.generation.is_configured(),
    })
}

/// GET /version
pub async fn version_handler() -> Json<serde_json::Value> {
    Json(crate::version::get_version_info())
}

/// GET /api/generation-options
pub async fn generation_options_handler() -> Json<GenerationOptionsResponse> {
    Json(GenerationOptionsResponse::current())
}
