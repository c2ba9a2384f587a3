// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation endpoint handler

use axum::{body::Bytes, extract::State, Json};
use tracing::{debug, info, warn};

use super::request::GenerateImageRequest;
use super::response::GenerateImageResponse;
use crate::api::http_server::AppState;
use crate::api::ApiError;

/// POST /api/generate-image - Generate or edit an image from a prompt
///
/// Pipeline:
/// 1. Parse the body as JSON whatever its content type (400 on malformed body)
/// 2. Validate prompt, resolve format and ratio defaults (400 on blank prompt)
/// 3. Run the prediction (500 when no credential is configured)
/// 4. Return the normalized result with HTTP 200
pub async fn generate_image_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let request: GenerateImageRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Malformed generation request: {}", e);
        ApiError::invalid_input("Invalid request body")
    })?;

    debug!(
        "Image generation request received: prompt_len={}, has_input_image={}",
        request.prompt.as_deref().map(str::len).unwrap_or(0),
        request.input_image.is_some()
    );

    let generation_request = request.validate().map_err(|e| {
        warn!("Image generation validation failed: {}", e);
        e
    })?;

    let result = state.generation.generate(&generation_request).await?;

    info!("Image generation finished: id={}, status={:?}", result.id, result.status);

    Ok(Json(result.into()))
}
