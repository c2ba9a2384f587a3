// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared HTTP handle for the Supabase project

use reqwest::{Client, RequestBuilder};

use crate::config::SupabaseConfig;

/// Base URL, service key and HTTP client shared by the auth, storage and
/// metadata collaborators. Cloning is cheap.
#[derive(Clone)]
pub struct SupabaseProject {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseProject {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    /// Build from validated configuration
    pub fn from_config(config: &SupabaseConfig) -> Result<Self, String> {
        let base_url = config
            .project_url
            .as_deref()
            .ok_or_else(|| "SUPABASE_URL is required".to_string())?;
        let service_key = config
            .service_key
            .as_deref()
            .ok_or_else(|| "SUPABASE_SERVICE_ROLE_KEY is required".to_string())?;
        url::Url::parse(base_url).map_err(|e| format!("invalid SUPABASE_URL '{}': {}", base_url, e))?;
        Ok(Self::new(base_url, service_key))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path)).header("apikey", &self.service_key)
    }

    /// Request authorized as the service role
    pub fn service_get(&self, path: &str) -> RequestBuilder {
        self.get(path).bearer_auth(&self.service_key)
    }

    pub fn service_post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}
