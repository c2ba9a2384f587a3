// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image upload API endpoint module
//!
//! Provides POST /api/upload-image (multipart field `image`).

pub mod handler;
pub mod response;

pub use handler::{upload_image_handler, IMAGE_FIELD};
pub use response::UploadImageResponse;
