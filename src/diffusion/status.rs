// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction records and status normalization
//!
//! The hosted model reports a richer status vocabulary (`starting`,
//! `processing`, `succeeded`, `failed`, `canceled`, ...) than the demo
//! needs. [`normalize`] folds it into three outcomes:
//!
//! * output present and status `succeeded` or `processing` -> `succeeded`
//! * status `failed` or an error present -> `failed`
//! * anything else -> `processing`, with a retry hint

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_FAILURE_MESSAGE: &str = "Generation failed";
pub const RETRY_HINT: &str = "Generation is still in progress. Please try again.";

/// Prediction object as returned by the model collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    /// A URL string for single-image models, an array of URLs for others
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub logs: Option<String>,
}

impl Prediction {
    /// First usable output URL, if any
    pub fn output_url(&self) -> Option<String> {
        match self.output.as_ref()? {
            Value::String(url) if !url.is_empty() => Some(url.clone()),
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .find(|url| !url.is_empty())
                .map(str::to_string),
            _ => None,
        }
    }

    /// Upstream error rendered as text, if one was reported
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null => None,
            Value::String(message) if message.is_empty() => None,
            Value::String(message) => Some(message.clone()),
            Value::Bool(false) => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Succeeded,
    Failed,
    /// Advisory: the caller should retry later
    Processing,
}

/// Normalized generation outcome.
///
/// Built only through the constructors so that `succeeded` always carries an
/// output and `failed`/`processing` always carry a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub id: String,
    pub status: GenerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl GenerationResult {
    pub fn succeeded(id: String, output: String, completed_at: Option<String>) -> Self {
        Self {
            id,
            status: GenerationStatus::Succeeded,
            output: Some(output),
            error: None,
            completed_at,
        }
    }

    pub fn failed(id: String, error: Option<String>) -> Self {
        Self {
            id,
            status: GenerationStatus::Failed,
            output: None,
            error: Some(error.unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())),
            completed_at: None,
        }
    }

    pub fn processing(id: String) -> Self {
        Self {
            id,
            status: GenerationStatus::Processing,
            output: None,
            error: Some(RETRY_HINT.to_string()),
            completed_at: None,
        }
    }

    pub fn is_advisory(&self) -> bool {
        self.status == GenerationStatus::Processing
    }
}

/// Fold an upstream prediction into a [`GenerationResult`]
pub fn normalize(prediction: Prediction) -> GenerationResult {
    let status = prediction.status.as_deref().unwrap_or_default();
    let output = prediction.output_url();
    let error = prediction.error_message();

    match output {
        // Output presence wins over a lagging "processing" label
        Some(url) if matches!(status, "succeeded" | "processing") => {
            GenerationResult::succeeded(prediction.id, url, prediction.completed_at)
        }
        _ if status == "failed" || error.is_some() => GenerationResult::failed(prediction.id, error),
        _ => GenerationResult::processing(prediction.id),
    }
}
