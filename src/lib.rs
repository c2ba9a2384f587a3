// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod diffusion;
pub mod storage;
pub mod supabase;
pub mod version;

pub use api::{ApiError, AppState};
pub use config::GatewayConfig;
pub use diffusion::{GenerationResult, GenerationService, GenerationStatus};
pub use storage::{UploadService, UploadedAsset};
