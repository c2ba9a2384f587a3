// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image upload storage: object store, metadata recorder and upload adapter

pub mod key;
pub mod metadata;
pub mod object_store;
pub mod service;

pub use key::StorageKey;
pub use metadata::{
    MetadataError, MetadataOutcome, SupabaseUploadRecorder, UploadRecord, UploadRecorder,
};
pub use object_store::{ObjectStorage, PutObject, StorageError, SupabaseStorage};
pub use service::{
    validate_file, IncomingFile, UploadOutcome, UploadService, UploadSettings, UploadedAsset,
    ValidatedFile,
};
