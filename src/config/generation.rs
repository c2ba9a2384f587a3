// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the hosted image-generation model

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.replicate.com/v1";
pub const DEFAULT_MODEL: &str = "black-forest-labs/flux-kontext-pro";

/// Settings for the model-inference collaborator
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Bearer credential; the generation endpoint refuses to run without it
    pub api_token: Option<String>,
    /// Base URL of the predictions API
    pub api_base: String,
    /// Model path in `owner/name` form
    pub model: String,
    /// Transport timeout in seconds (unset means wait indefinitely)
    pub request_timeout_secs: Option<u64>,
}

impl GenerationConfig {
    pub(crate) fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_token: lookup("REPLICATE_API_TOKEN").filter(|v| !v.trim().is_empty()),
            api_base: lookup("REPLICATE_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: lookup("REPLICATE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout_secs: lookup("REPLICATE_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_base.trim().is_empty() {
            return Err("REPLICATE_API_BASE must not be empty".to_string());
        }
        if self.model.split('/').filter(|p| !p.is_empty()).count() != 2 {
            return Err(format!(
                "REPLICATE_MODEL must look like owner/name, got '{}'",
                self.model
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Whether a credential is present
    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: None,
        }
    }
}
