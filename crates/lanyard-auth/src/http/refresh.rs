//! Refresh-exchange endpoint.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::error::AuthError;
use crate::middleware::RefreshGuard;

use super::{ApiState, cookies::build_refresh_cookie, signin::access_token_header};

/// Body of a successful refresh exchange.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Fresh access token, also carried in the `auth_token` header.
    pub access_token: String,
}

/// Handler for GET /auth/refresh_token.
///
/// The guard already proved the refresh cookie decodes validly; this handler
/// additionally checks the token is still bound to a live session. A
/// signature-valid token whose session was evicted or torn down gets 403.
/// When rotation is enabled the cookie is replaced with the new token.
pub async fn refresh_token_handler(
    State(state): State<ApiState>,
    jar: CookieJar,
    guard: RefreshGuard,
) -> Result<Response, AuthError> {
    let outcome = state
        .auth
        .refresh_token(guard.claims.id, &guard.token)
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound { .. } | AuthError::SessionNotFound { .. } => {
                AuthError::forbidden("Refresh token is not bound to a live session")
            }
            other => other,
        })?;

    let jar = match outcome.rotated_refresh_token {
        Some(refresh) => jar.add(build_refresh_cookie(
            &state.cookie_config,
            refresh,
            state.lifetimes.refresh_token_lifetime,
        )),
        None => jar,
    };

    let headers = access_token_header(&state, &outcome.access_token);

    Ok((
        headers,
        jar,
        Json(RefreshResponse {
            access_token: outcome.access_token,
        }),
    )
        .into_response())
}
