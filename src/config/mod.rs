// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gateway configuration
//!
//! All settings are read once at startup and injected into the services.
//! Nothing below the binary entry point reads the process environment.

pub mod generation;
pub mod supabase;

use std::env;

pub use generation::GenerationConfig;
pub use supabase::SupabaseConfig;

/// Top-level configuration for the gateway server
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address the HTTP server binds to
    pub listen_addr: String,
    /// Allowed CORS origins ("*" allows any origin)
    pub cors_allowed_origins: Vec<String>,
    /// Model collaborator settings
    pub generation: GenerationConfig,
    /// Identity, storage and metadata collaborator settings
    pub supabase: SupabaseConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("API_PORT").unwrap_or_else(|| "8080".to_string());
        Self {
            listen_addr: lookup("LISTEN_ADDR").unwrap_or_else(|| format!("0.0.0.0:{}", port)),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_else(|| vec!["*".to_string()]),
            generation: GenerationConfig::from_lookup(&lookup),
            supabase: SupabaseConfig::from_lookup(&lookup),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.trim().is_empty() {
            return Err("Listen address must not be empty".to_string());
        }
        self.generation.validate()?;
        self.supabase.validate()?;
        Ok(())
    }

    /// Whether every origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            generation: GenerationConfig::default(),
            supabase: SupabaseConfig::default(),
        }
    }
}
