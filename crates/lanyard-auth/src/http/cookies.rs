//! Refresh cookie construction.
//!
//! The refresh token travels only in an httpOnly SameSite=Strict cookie so
//! the browser carries it back on the refresh and logout endpoints without
//! exposing it to page scripts.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::CookieConfig;

/// Builds the refresh cookie carrying a freshly issued token.
#[must_use]
pub fn build_refresh_cookie(
    config: &CookieConfig,
    value: String,
    max_age: std::time::Duration,
) -> Cookie<'static> {
    Cookie::build((config.refresh_cookie_name.clone(), value))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.secure)
        .path(config.path.clone())
        .max_age(time::Duration::seconds(max_age.as_secs() as i64))
        .build()
}

/// Builds an expired refresh cookie that clears the client copy.
#[must_use]
pub fn build_clear_refresh_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((config.refresh_cookie_name.clone(), String::new()))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.secure)
        .path(config.path.clone())
        .max_age(time::Duration::ZERO)
        .build()
}
