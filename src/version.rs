// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Flux Studio gateway

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-kontext-gateway-2026-10-15";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2026-10-15";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "image-upload",
    "per-user-storage-keys",
    "upload-metadata",
    "flux-kontext-generation",
    "synchronous-predictions",
    "status-normalization",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Flux Studio gateway {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Full version info served by GET /version
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
