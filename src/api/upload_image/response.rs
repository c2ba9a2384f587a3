// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload response types

use serde::{Deserialize, Serialize};

use crate::storage::UploadedAsset;

/// Response from POST /api/upload-image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadImageResponse {
    /// Public URL of the stored image
    pub url: String,
    /// Generated storage file name
    pub filename: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type as sent by the client
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Storage key, prefixed by the user id
    pub path: String,
}

impl From<UploadedAsset> for UploadImageResponse {
    fn from(asset: UploadedAsset) -> Self {
        Self {
            url: asset.url,
            filename: asset.filename,
            size: asset.size,
            mime_type: asset.mime_type,
            path: asset.path,
        }
    }
}
