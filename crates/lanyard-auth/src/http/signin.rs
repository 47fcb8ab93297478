//! Sign-in endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AuthError;
use crate::types::LoginUser;

use super::{ApiState, cookies::build_refresh_cookie};

/// Handler for POST /auth/signin.
///
/// On success returns the sanitized user in the body, the access token in
/// the `auth_token` response header and the refresh token in the httpOnly
/// cookie. Unknown email and wrong password both collapse into the same
/// generic 403 so the response does not reveal which one failed.
pub async fn signin_handler(
    State(state): State<ApiState>,
    jar: CookieJar,
    Json(dto): Json<LoginUser>,
) -> Result<Response, AuthError> {
    let outcome = state.auth.sign_in(dto).await.map_err(|e| match e {
        AuthError::UserNotFound { .. } | AuthError::PasswordMismatch => AuthError::SignInRejected,
        other => other,
    })?;

    let jar = jar.add(build_refresh_cookie(
        &state.cookie_config,
        outcome.refresh_token,
        state.lifetimes.refresh_token_lifetime,
    ));

    let headers = access_token_header(&state, &outcome.access_token);

    Ok((headers, jar, Json(outcome.user)).into_response())
}

/// Builds the response header carrying the access token.
pub(super) fn access_token_header(state: &ApiState, access_token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    match (
        HeaderName::from_bytes(state.cookie_config.access_token_name.as_bytes()),
        HeaderValue::from_str(access_token),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => {
            tracing::warn!(
                header = %state.cookie_config.access_token_name,
                "Access token header could not be constructed"
            );
        }
    }

    headers
}
