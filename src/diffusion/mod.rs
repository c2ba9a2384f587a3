// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation via the hosted Flux Kontext model

pub mod client;
pub mod options;
pub mod service;
pub mod status;

pub use client::{PredictionBackend, PredictionError, PredictionInput, ReplicateClient};
pub use options::{AspectRatio, OutputFormat};
pub use service::{GenerationRequest, GenerationService};
pub use status::{normalize, GenerationResult, GenerationStatus, Prediction};
