//! Sign-up endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::error::AuthError;
use crate::types::{CreateUser, PublicUser};

use super::ApiState;

/// Handler for POST /auth/signup.
///
/// Registers a new user and returns the sanitized payload with 201. A taken
/// email maps to 409 through the `EmailAlreadyRegistered` response.
pub async fn signup_handler(
    State(state): State<ApiState>,
    Json(dto): Json<CreateUser>,
) -> Result<(StatusCode, Json<PublicUser>), AuthError> {
    let user = state.auth.sign_up(dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
