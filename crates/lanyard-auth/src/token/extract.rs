//! Access token extraction from incoming requests.
//!
//! Lookup order: a same-origin cookie named after the configured access
//! token name (`auth_token` by default), then the bearer-scheme
//! `Authorization` header.

use axum::http::{HeaderMap, header::AUTHORIZATION, header::COOKIE};

use crate::config::CookieConfig;

/// Extracts the access token from request headers.
///
/// Checks, in order: the `auth_token` cookie, then `Authorization: Bearer`.
/// Returns `None` when neither carries a non-empty token.
#[must_use]
pub fn extract_access_token(headers: &HeaderMap, cookies: &CookieConfig) -> Option<String> {
    extract_from_cookie(headers, &cookies.access_token_name)
        .or_else(|| extract_bearer(headers))
}

/// Extracts a named cookie value from the `Cookie` header.
#[must_use]
pub fn extract_from_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get(COOKIE)?.to_str().ok()?;

    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if let Some((name, value)) = cookie.split_once('=')
            && name.trim() == cookie_name
        {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

/// Extracts a Bearer token from the `Authorization` header.
#[must_use]
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}
