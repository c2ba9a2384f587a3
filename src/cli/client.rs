// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for a running gateway

use anyhow::{anyhow, bail, Context, Result};
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

use crate::api::{
    ErrorResponse, GenerateImageRequest, GenerateImageResponse, GenerationOptionsResponse,
    UploadImageResponse,
};
use crate::api::upload_image::IMAGE_FIELD;

pub struct StudioClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl StudioClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a local image file
    pub async fn upload(&self, path: &Path) -> Result<UploadImageResponse> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| anyhow!("an access token is required to upload (--token)"))?;

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for_path(path))?;
        let form = multipart::Form::new().part(IMAGE_FIELD, part);

        debug!("Uploading {}", path.display());
        let response = self
            .client
            .post(self.url("/api/upload-image"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .context("upload request failed")?;
        read_json(response).await
    }

    pub async fn generate(&self, request: &GenerateImageRequest) -> Result<GenerateImageResponse> {
        let response = self
            .client
            .post(self.url("/api/generate-image"))
            .json(request)
            .send()
            .await
            .context("generation request failed")?;
        read_json(response).await
    }

    pub async fn options(&self) -> Result<GenerationOptionsResponse> {
        let response = self
            .client
            .get(self.url("/api/generation-options"))
            .send()
            .await
            .context("options request failed")?;
        read_json(response).await
    }

    /// Fetch a generated image and write it to `dest`
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to fetch {}", url))?;
        if !response.status().is_success() {
            bail!("image download failed with {}", response.status());
        }
        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes)
            .await
            .with_context(|| format!("failed to write {}", dest.display()))?;
        Ok(bytes.len() as u64)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error)
        .unwrap_or(text);
    Err(anyhow!("server returned {}: {}", status, message))
}

/// MIME type from the file extension; unknown types are sent as binary
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}
