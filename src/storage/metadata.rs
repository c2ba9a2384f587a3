// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload metadata recording
//!
//! Recording is a best-effort post-action: the upload service keeps the
//! outcome as a value and never turns it into a request failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::auth::AuthenticatedUser;
use crate::supabase::SupabaseProject;

/// Row describing one stored upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub filename: String,
    pub file_path: String,
    pub file_url: String,
    pub file_size: u64,
    pub mime_type: String,
    pub upload_source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataOutcome {
    Recorded,
    /// The user has no customer account to attach the record to
    Skipped,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MetadataError {
    #[error("Customer lookup failed: {0}")]
    Lookup(String),
    #[error("Insert failed: {0}")]
    Insert(String),
}

#[async_trait]
pub trait UploadRecorder: Send + Sync {
    async fn record(
        &self,
        user: &AuthenticatedUser,
        record: &UploadRecord,
    ) -> Result<MetadataOutcome, MetadataError>;
}

#[derive(Debug, Deserialize)]
struct CustomerRow {
    id: serde_json::Value,
}

#[derive(Serialize)]
struct UserUploadRow<'a> {
    customer_id: &'a serde_json::Value,
    #[serde(flatten)]
    record: &'a UploadRecord,
}

/// Writes `user_uploads` rows through the PostgREST API
pub struct SupabaseUploadRecorder {
    project: SupabaseProject,
}

impl SupabaseUploadRecorder {
    pub fn new(project: SupabaseProject) -> Self {
        Self { project }
    }

    async fn customer_id(&self, user_id: &str) -> Result<Option<serde_json::Value>, MetadataError> {
        let response = self
            .project
            .service_get("rest/v1/customers")
            .query(&[("user_id", format!("eq.{}", user_id)), ("select", "id".to_string())])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| MetadataError::Lookup(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MetadataError::Lookup(format!(
                "customers query returned {}",
                response.status()
            )));
        }

        let rows: Vec<CustomerRow> = response
            .json()
            .await
            .map_err(|e| MetadataError::Lookup(e.to_string()))?;

        // Exactly one customer row, otherwise the record is not attached
        match rows.as_slice() {
            [only] => Ok(Some(only.id.clone())),
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl UploadRecorder for SupabaseUploadRecorder {
    async fn record(
        &self,
        user: &AuthenticatedUser,
        record: &UploadRecord,
    ) -> Result<MetadataOutcome, MetadataError> {
        let Some(customer_id) = self.customer_id(&user.id).await? else {
            debug!("No customer for user {}; upload not recorded", user.id);
            return Ok(MetadataOutcome::Skipped);
        };

        let response = self
            .project
            .service_post("rest/v1/user_uploads")
            .header("Prefer", "return=minimal")
            .json(&UserUploadRow {
                customer_id: &customer_id,
                record,
            })
            .send()
            .await
            .map_err(|e| MetadataError::Insert(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(MetadataError::Insert(format!("{}: {}", status, text)));
        }

        Ok(MetadataOutcome::Recorded)
    }
}
