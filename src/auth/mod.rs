// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caller identity for the upload endpoint

pub mod supabase;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use supabase::SupabaseIdentity;

/// Name of the cookie carrying the session access token
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Missing access token")]
    MissingToken,

    #[error("Invalid or expired access token")]
    InvalidToken,

    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),
}

/// External identity collaborator
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve an access token to the user it belongs to
    async fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Pull the caller's access token from `Authorization: Bearer` or, failing
/// that, the session cookie.
pub fn access_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            v.strip_prefix("Bearer ")
                .or_else(|| v.strip_prefix("bearer "))
        })
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == ACCESS_TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
