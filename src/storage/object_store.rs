// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Object storage collaborator

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header;
use thiserror::Error;
use tracing::{debug, warn};

use crate::supabase::SupabaseProject;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Object already exists: {0}")]
    AlreadyExists(String),
    #[error("Storage rejected write ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Network error: {0}")]
    NetworkError(String),
}

/// A single object write
#[derive(Debug, Clone)]
pub struct PutObject<'a> {
    pub key: &'a str,
    pub bytes: Bytes,
    pub content_type: &'a str,
    /// Cache max-age in seconds
    pub cache_control: &'a str,
    /// Overwrite an existing object at `key`
    pub upsert: bool,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put_object(&self, object: PutObject<'_>) -> Result<(), StorageError>;

    /// Public URL at which a stored key is served
    fn public_url(&self, key: &str) -> String;
}

/// Supabase Storage bucket
pub struct SupabaseStorage {
    project: SupabaseProject,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(project: SupabaseProject, bucket: &str) -> Self {
        Self {
            project,
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn put_object(&self, object: PutObject<'_>) -> Result<(), StorageError> {
        let path = format!("storage/v1/object/{}/{}", self.bucket, object.key);
        debug!("Storage PUT {} ({} bytes)", path, object.bytes.len());

        let response = self
            .project
            .service_post(&path)
            .header(header::CONTENT_TYPE, object.content_type)
            .header(header::CACHE_CONTROL, format!("max-age={}", object.cache_control))
            .header("x-upsert", if object.upsert { "true" } else { "false" })
            .body(object.bytes)
            .send()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        warn!("Storage write for {} failed: {} {}", object.key, status, message);
        if status == reqwest::StatusCode::CONFLICT || message.contains("Duplicate") {
            return Err(StorageError::AlreadyExists(object.key.to_string()));
        }
        Err(StorageError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    fn public_url(&self, key: &str) -> String {
        self.project
            .url(&format!("storage/v1/object/public/{}/{}", self.bucket, key))
    }
}
