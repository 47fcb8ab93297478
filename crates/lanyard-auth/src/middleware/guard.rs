//! Token-validating extractors.
//!
//! `RefreshGuard` protects the refresh-exchange endpoint: it reads the
//! refresh cookie, fully validates the JWT and rejects with 401 before the
//! handler runs. `AccessGuard` protects regular authenticated routes,
//! accepting the access token from the auth cookie first and the
//! `Authorization: Bearer` header second.
//!
//! Both extractors only prove the token decodes validly. Session binding
//! (is this exact token still stored on a live session?) is the
//! orchestrator's job.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::config::CookieConfig;
use crate::error::AuthError;
use crate::token::extract::{extract_access_token, extract_from_cookie};
use crate::token::jwt::{JwtService, TokenClaims};

/// State the guards need, provided to handlers via `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,

    /// Cookie names and attributes.
    pub cookie_config: CookieConfig,
}

impl AuthState {
    /// Creates guard state from a JWT service and cookie configuration.
    #[must_use]
    pub fn new(jwt_service: Arc<JwtService>, cookie_config: CookieConfig) -> Self {
        Self {
            jwt_service,
            cookie_config,
        }
    }
}

/// Extractor guarding the refresh-exchange endpoint.
///
/// Rejects with `Unauthorized` when the refresh cookie is missing,
/// malformed, expired or carries a bad signature. On success the handler
/// receives the validated claims together with the raw token string so the
/// orchestrator can check session binding against the exact cookie value.
#[derive(Debug)]
pub struct RefreshGuard {
    /// Validated claims from the refresh cookie.
    pub claims: TokenClaims,

    /// Raw token string as presented, for the session binding check.
    pub token: String,
}

impl<S> FromRequestParts<S> for RefreshGuard
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = extract_from_cookie(&parts.headers, &auth_state.cookie_config.refresh_cookie_name)
            .ok_or_else(|| AuthError::unauthorized("Missing refresh token cookie"))?;

        let claims = auth_state.jwt_service.decode(&token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh cookie failed validation");
            AuthError::unauthorized("Invalid refresh token")
        })?;

        Ok(RefreshGuard { claims, token })
    }
}

/// Extractor guarding regular authenticated routes.
///
/// Looks for the access token in the auth cookie first, then in the
/// `Authorization: Bearer` header.
#[derive(Debug)]
pub struct AccessGuard(pub TokenClaims);

impl<S> FromRequestParts<S> for AccessGuard
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = extract_access_token(&parts.headers, &auth_state.cookie_config)
            .ok_or_else(|| AuthError::unauthorized("Missing access token"))?;

        let claims = auth_state.jwt_service.decode(&token).map_err(|e| {
            tracing::debug!(error = %e, "Access token failed validation");
            AuthError::unauthorized("Invalid access token")
        })?;

        Ok(AccessGuard(claims))
    }
}
