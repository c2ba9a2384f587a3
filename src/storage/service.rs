// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload adapter: validate, store under the user's prefix, record metadata

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::key::StorageKey;
use super::metadata::{MetadataError, MetadataOutcome, UploadRecord, UploadRecorder};
use super::object_store::{ObjectStorage, PutObject};
use crate::api::ApiError;
use crate::auth::AuthenticatedUser;
use crate::config::SupabaseConfig;

/// File as received from the multipart form
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl IncomingFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Public reference to a stored upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub url: String,
    pub path: String,
    pub filename: String,
    pub size: u64,
    pub mime_type: String,
}

/// Result of a successful upload.
///
/// `metadata` is informational only; its failure does not undo the upload.
#[derive(Debug)]
pub struct UploadOutcome {
    pub asset: UploadedAsset,
    pub metadata: Result<MetadataOutcome, MetadataError>,
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub max_upload_bytes: u64,
    pub cache_control: String,
    pub upload_source: String,
}

impl From<&SupabaseConfig> for UploadSettings {
    fn from(config: &SupabaseConfig) -> Self {
        Self {
            max_upload_bytes: config.max_upload_bytes,
            cache_control: config.cache_control.clone(),
            upload_source: config.upload_source.clone(),
        }
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self::from(&SupabaseConfig::default())
    }
}

/// A file that passed presence, MIME type and size checks
#[derive(Debug, Clone)]
pub struct ValidatedFile {
    pub file: IncomingFile,
    pub mime_type: String,
}

/// Check presence, MIME type and size (the limit is inclusive)
pub fn validate_file(
    file: Option<IncomingFile>,
    max_upload_bytes: u64,
) -> Result<ValidatedFile, ApiError> {
    let file = file.ok_or_else(|| ApiError::invalid_input("No image file provided"))?;

    let mime_type = file
        .content_type
        .clone()
        .filter(|ct| ct.starts_with("image/"))
        .ok_or_else(|| ApiError::invalid_input("File must be an image"))?;

    if file.size() > max_upload_bytes {
        return Err(ApiError::invalid_input(format!(
            "File size must be less than {}MB",
            max_upload_bytes / (1024 * 1024)
        )));
    }

    Ok(ValidatedFile { file, mime_type })
}

pub struct UploadService {
    storage: Arc<dyn ObjectStorage>,
    recorder: Arc<dyn UploadRecorder>,
    settings: UploadSettings,
}

impl UploadService {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        recorder: Arc<dyn UploadRecorder>,
        settings: UploadSettings,
    ) -> Self {
        Self {
            storage,
            recorder,
            settings,
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.settings.max_upload_bytes
    }

    /// Store one image for an authenticated user
    pub async fn upload(
        &self,
        user: &AuthenticatedUser,
        file: Option<IncomingFile>,
    ) -> Result<UploadOutcome, ApiError> {
        let ValidatedFile { file, mime_type } =
            validate_file(file, self.settings.max_upload_bytes)?;
        let size = file.size();

        let key = StorageKey::generate(&user.id, file.file_name.as_deref());

        self.storage
            .put_object(PutObject {
                key: &key.path,
                bytes: file.bytes,
                content_type: &mime_type,
                cache_control: &self.settings.cache_control,
                upsert: false,
            })
            .await
            .map_err(|e| {
                error!("Storage upload failed for {}: {}", key.path, e);
                ApiError::Storage("Failed to upload image to storage".to_string())
            })?;

        let url = self.storage.public_url(&key.path);
        info!("Stored upload {} ({} bytes, {})", key.path, size, mime_type);

        let record = UploadRecord {
            filename: file.file_name.unwrap_or_else(|| key.file_name.clone()),
            file_path: key.path.clone(),
            file_url: url.clone(),
            file_size: size,
            mime_type: mime_type.clone(),
            upload_source: self.settings.upload_source.clone(),
        };
        let metadata = self.recorder.record(user, &record).await;
        if let Err(e) = &metadata {
            warn!("Upload metadata not recorded for {}: {}", key.path, e);
        }

        Ok(UploadOutcome {
            asset: UploadedAsset {
                url,
                path: key.path,
                filename: key.file_name,
                size,
                mime_type,
            },
            metadata,
        })
    }
}
