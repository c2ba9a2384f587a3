// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image upload endpoint handler

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::multipart::{MultipartError, MultipartRejection};
use axum_extra::extract::Multipart;
use tracing::{debug, info, warn};

use super::response::UploadImageResponse;
use crate::api::http_server::AppState;
use crate::api::ApiError;
use crate::auth::access_token_from_headers;
use crate::storage::{IncomingFile, MetadataOutcome};

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// POST /api/upload-image - Store an image for the signed-in user
///
/// Pipeline:
/// 1. Resolve the caller from the access token (401 if absent or invalid)
/// 2. Read the `image` field from the multipart form
/// 3. Validate type and size (400), store (500 on failure)
/// 4. Record metadata best-effort and return the public URL
pub async fn upload_image_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadImageResponse>, ApiError> {
    let token = access_token_from_headers(&headers).ok_or_else(|| {
        debug!("Upload rejected: no access token");
        ApiError::authentication_required()
    })?;

    let user = state.identity.authenticate(&token).await.map_err(|e| {
        warn!("Upload rejected: {}", e);
        ApiError::authentication_required()
    })?;

    let mut multipart = multipart.map_err(|rejection| {
        warn!("Upload rejected: {}", rejection);
        ApiError::invalid_input("Invalid form data")
    })?;

    let file = read_image_field(&mut multipart, state.uploads.max_upload_bytes()).await?;
    let outcome = state.uploads.upload(&user, file).await?;

    if let Ok(MetadataOutcome::Skipped) = outcome.metadata {
        debug!("No customer account for {}; upload metadata skipped", user.id);
    }
    info!("Image uploaded: user={}, path={}", user.id, outcome.asset.path);

    Ok(Json(outcome.asset.into()))
}

/// Read the first `image` field; other fields are skipped
async fn read_image_field(
    multipart: &mut Multipart,
    max_upload_bytes: u64,
) -> Result<Option<IncomingFile>, ApiError> {
    let to_api_error = |e: MultipartError| {
        warn!("Multipart read failed: {}", e);
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::invalid_input(format!(
                "File size must be less than {}MB",
                max_upload_bytes / (1024 * 1024)
            ))
        } else {
            ApiError::invalid_input("Invalid form data")
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(to_api_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(to_api_error)?;
        return Ok(Some(IncomingFile {
            file_name,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}
