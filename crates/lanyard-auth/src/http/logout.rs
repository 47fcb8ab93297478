//! Logout endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::{ApiState, cookies::build_clear_refresh_cookie};

/// Body of the logout response.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Always true; logout never fails.
    pub success: bool,

    /// Human-readable message.
    pub message: String,
}

/// Handler for POST /auth/logout.
///
/// Idempotent and lenient: a missing, malformed or unbound refresh cookie
/// still gets 200 so the client-side credentials are always cleared. The
/// `auth_token` header is blanked and the refresh cookie replaced with an
/// expired one.
pub async fn logout_handler(State(state): State<ApiState>, jar: CookieJar) -> Response {
    let cookie = jar
        .get(&state.cookie_config.refresh_cookie_name)
        .map(|c| c.value().to_string());

    state.auth.logout(cookie.as_deref()).await;

    let jar = jar.add(build_clear_refresh_cookie(&state.cookie_config));

    let mut headers = HeaderMap::new();
    if let Ok(name) = HeaderName::from_bytes(state.cookie_config.access_token_name.as_bytes()) {
        headers.insert(name, HeaderValue::from_static(""));
    }

    (
        headers,
        jar,
        Json(LogoutResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    )
        .into_response()
}
