// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Supabase Auth identity provider

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::{AuthError, AuthenticatedUser, IdentityProvider};
use crate::supabase::SupabaseProject;

/// Resolves access tokens through `GET /auth/v1/user`
pub struct SupabaseIdentity {
    project: SupabaseProject,
}

impl SupabaseIdentity {
    pub fn new(project: SupabaseProject) -> Self {
        Self { project }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    async fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        if access_token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let response = self
            .project
            .get("auth/v1/user")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::ProviderUnavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let user: AuthenticatedUser = response
                    .json()
                    .await
                    .map_err(|e| AuthError::ProviderUnavailable(e.to_string()))?;
                debug!("Authenticated user {}", user.id);
                Ok(user)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidToken),
            status => {
                warn!("Identity provider returned {}", status);
                Err(AuthError::ProviderUnavailable(format!(
                    "identity provider returned {}",
                    status
                )))
            }
        }
    }
}
