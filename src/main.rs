// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use flux_studio::{
    api::{start_server, AppState},
    config::GatewayConfig,
    version,
};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads configuration
    let dotenv_loaded = dotenv::dotenv().is_ok();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting {}", version::get_version_string());
    if !dotenv_loaded {
        tracing::debug!("No .env file found, using process environment");
    }

    let config = GatewayConfig::from_env();
    config.validate().map_err(|e| anyhow!("invalid configuration: {}", e))?;

    if !config.generation.is_configured() {
        tracing::warn!(
            "REPLICATE_API_TOKEN is not set; /api/generate-image will answer with a configuration error"
        );
    }

    let state = AppState::from_config(&config)?;
    start_server(&config, state).await
}
