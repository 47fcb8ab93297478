//! HTTP boundary: the `/auth` endpoint group.
//!
//! Exposes sign-up, sign-in, logout and refresh exchange as Axum handlers.
//! Tokens cross the boundary on two channels: the access token in the
//! `auth_token` response header (and optionally a cookie of the same name on
//! the way in), the refresh token only in an httpOnly SameSite=Strict
//! cookie.
//!
//! # Usage
//!
//! ```ignore
//! use lanyard_auth::http::{ApiState, router};
//!
//! let app = router(api_state);
//! axum::serve(listener, app).await?;
//! ```

pub mod cookies;
pub mod logout;
pub mod refresh;
pub mod signin;
pub mod signup;

use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};

use crate::config::{CookieConfig, TokenLifetimes};
use crate::middleware::AuthState;
use crate::service::AuthService;
use crate::token::JwtService;

pub use cookies::{build_clear_refresh_cookie, build_refresh_cookie};
pub use logout::{LogoutResponse, logout_handler};
pub use refresh::{RefreshResponse, refresh_token_handler};
pub use signin::signin_handler;
pub use signup::signup_handler;

/// Shared state for the `/auth` endpoint group.
#[derive(Clone)]
pub struct ApiState {
    /// Auth orchestrator.
    pub auth: Arc<AuthService>,

    /// JWT service, shared with the guards.
    pub jwt_service: Arc<JwtService>,

    /// Cookie names and attributes.
    pub cookie_config: CookieConfig,

    /// Token lifetimes, used for the refresh cookie max-age.
    pub lifetimes: TokenLifetimes,
}

impl ApiState {
    /// Creates the endpoint state.
    #[must_use]
    pub fn new(
        auth: Arc<AuthService>,
        jwt_service: Arc<JwtService>,
        cookie_config: CookieConfig,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            auth,
            jwt_service,
            cookie_config,
            lifetimes,
        }
    }
}

impl FromRef<ApiState> for AuthState {
    fn from_ref(state: &ApiState) -> Self {
        AuthState::new(state.jwt_service.clone(), state.cookie_config.clone())
    }
}

/// Builds the `/auth` router.
#[must_use]
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/signin", post(signin_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/refresh_token", get(refresh_token_handler))
        .with_state(state)
}
