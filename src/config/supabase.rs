// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the Supabase project (auth, storage, metadata tables)

/// Maximum accepted upload size: 10 MiB
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const DEFAULT_BUCKET: &str = "ai-images";
pub const DEFAULT_CACHE_CONTROL: &str = "3600";
pub const DEFAULT_UPLOAD_SOURCE: &str = "web_upload";

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://<ref>.supabase.co`
    pub project_url: Option<String>,
    /// Service-role key used as `apikey` and bearer for server-side calls
    pub service_key: Option<String>,
    /// Storage bucket holding uploaded images
    pub bucket: String,
    /// Cache-Control max-age (seconds) attached to stored objects
    pub cache_control: String,
    /// Upper bound on accepted upload size in bytes
    pub max_upload_bytes: u64,
    /// Source tag written with each upload record
    pub upload_source: String,
}

impl SupabaseConfig {
    pub(crate) fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            project_url: lookup("SUPABASE_URL")
                .or_else(|| lookup("NEXT_PUBLIC_SUPABASE_URL"))
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),
            service_key: lookup("SUPABASE_SERVICE_ROLE_KEY").filter(|v| !v.trim().is_empty()),
            bucket: lookup("STORAGE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.project_url.is_none() {
            return Err("SUPABASE_URL is required".to_string());
        }
        if self.service_key.is_none() {
            return Err("SUPABASE_SERVICE_ROLE_KEY is required".to_string());
        }
        if self.bucket.trim().is_empty() {
            return Err("Storage bucket must not be empty".to_string());
        }
        if self.max_upload_bytes == 0 {
            return Err("Upload limit must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            project_url: None,
            service_key: None,
            bucket: DEFAULT_BUCKET.to_string(),
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            upload_source: DEFAULT_UPLOAD_SOURCE.to_string(),
        }
    }
}
