// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod generate_image;
pub mod handlers;
pub mod http_server;
pub mod upload_image;

pub use errors::{ApiError, ErrorResponse};
pub use generate_image::{generate_image_handler, GenerateImageRequest, GenerateImageResponse};
pub use handlers::{GenerationOptionsResponse, HealthResponse, OptionInfo};
pub use http_server::{create_app, start_server, AppState};
pub use upload_image::{upload_image_handler, UploadImageResponse};
