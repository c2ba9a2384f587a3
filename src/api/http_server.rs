// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::generate_image::generate_image_handler;
use super::handlers::{generation_options_handler, health_handler, version_handler};
use super::upload_image::upload_image_handler;
use crate::auth::{IdentityProvider, SupabaseIdentity};
use crate::config::GatewayConfig;
use crate::diffusion::{GenerationService, ReplicateClient};
use crate::storage::{SupabaseStorage, SupabaseUploadRecorder, UploadService, UploadSettings};
use crate::supabase::SupabaseProject;

/// Headroom for multipart boundaries and headers on top of the file limit
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Services shared by all handlers. Each is stateless; the `Arc`s only
/// avoid rebuilding HTTP clients per request.
#[derive(Clone)]
pub struct AppState {
    pub generation: Arc<GenerationService>,
    pub uploads: Arc<UploadService>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Wire the production collaborators from configuration
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let backend = ReplicateClient::new(&config.generation)?;
        let generation =
            GenerationService::new(Arc::new(backend), config.generation.api_token.clone());

        let project = SupabaseProject::from_config(&config.supabase).map_err(|e| anyhow!(e))?;
        let uploads = UploadService::new(
            Arc::new(SupabaseStorage::new(project.clone(), &config.supabase.bucket)),
            Arc::new(SupabaseUploadRecorder::new(project.clone())),
            UploadSettings::from(&config.supabase),
        );

        Ok(Self {
            generation: Arc::new(generation),
            uploads: Arc::new(uploads),
            identity: Arc::new(SupabaseIdentity::new(project)),
        })
    }
}

/// Build the router without CORS (tests drive it directly)
pub fn create_app(state: AppState) -> Router {
    let upload_limit = state
        .uploads
        .max_upload_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .route("/api/generation-options", get(generation_options_handler))
        .route("/api/generate-image", post(generate_image_handler))
        .route(
            "/api/upload-image",
            post(upload_image_handler)
                .layer(DefaultBodyLimit::max(usize::try_from(upload_limit).unwrap_or(usize::MAX))),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn cors_layer(config: &GatewayConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub async fn start_server(config: &GatewayConfig, state: AppState) -> Result<()> {
    let app = create_app(state).layer(cors_layer(config));

    let addr = config.listen_addr.parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
