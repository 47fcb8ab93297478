//! Error response handling for the HTTP boundary.
//!
//! Implements `IntoResponse` for `AuthError` with a stable JSON error body
//! of the shape `{ "error": "<code>", "message": "<human readable>" }`.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = status_for(&self);

        if self.is_server_error() {
            tracing::error!(category = %self.category(), error = %self, "Request failed");
        }

        let body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        if status == StatusCode::UNAUTHORIZED {
            let www_auth = build_www_authenticate_header(self.code(), &self.to_string());
            if let Ok(value) = HeaderValue::from_str(&www_auth) {
                headers.insert(header::WWW_AUTHENTICATE, value);
            }
        }

        (status, headers, Json(body)).into_response()
    }
}

/// Maps an `AuthError` onto its HTTP status code.
fn status_for(error: &AuthError) -> StatusCode {
    match error {
        AuthError::EmailAlreadyRegistered => StatusCode::CONFLICT,
        AuthError::UserNotFound { .. }
        | AuthError::RoleNotFound { .. }
        | AuthError::SessionNotFound { .. }
        | AuthError::NoSessionToUpdate => StatusCode::NOT_FOUND,
        AuthError::PasswordMismatch
        | AuthError::SignInRejected
        | AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AuthError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AuthError::SessionNotCreated { .. }
        | AuthError::SessionNotDeleted { .. }
        | AuthError::Storage { .. }
        | AuthError::Configuration { .. }
        | AuthError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the WWW-Authenticate header value for 401 responses.
fn build_www_authenticate_header(error: &str, description: &str) -> String {
    let escaped_desc = description.replace('\"', "\\\"");
    format!(
        "Bearer realm=\"lanyard\", error=\"{}\", error_description=\"{}\"",
        error, escaped_desc
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_unauthorized_response() {
        let error = AuthError::unauthorized("Missing refresh token cookie");
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let headers = response.headers();
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/json");

        let www_auth = headers
            .get(header::WWW_AUTHENTICATE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(www_auth.contains("realm=\"lanyard\""));
        assert!(www_auth.contains("error=\"unauthorized\""));
    }

    #[tokio::test]
    async fn test_conflict_response() {
        let response = AuthError::EmailAlreadyRegistered.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(!response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[tokio::test]
    async fn test_sign_in_rejected_is_forbidden() {
        let response = AuthError::SignInRejected.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_not_found_responses() {
        assert_eq!(
            AuthError::user_not_found("missing").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AuthError::session_not_found("gone").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AuthError::NoSessionToUpdate.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_server_error_response() {
        let response = AuthError::storage("pool exhausted").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response = AuthError::EmailAlreadyRegistered.into_response();

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "email_already_registered");
        assert_eq!(json["message"], "Email already registered");
    }

    #[test]
    fn test_www_authenticate_header_escaping() {
        let header = build_www_authenticate_header("unauthorized", "token with \"quotes\"");
        assert!(header.contains("\\\"quotes\\\""));
    }
}
