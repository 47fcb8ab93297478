//! Auth orchestrator: sign-up, sign-in, refresh exchange and logout.
//!
//! Composes the user service, the session store and the token service.
//! Sign-in binds a fresh refresh token to a session row through the
//! cap-and-evict path; refresh validates that binding before reissuing an
//! access token; logout is best-effort and always succeeds.

use std::sync::Arc;

use uuid::Uuid;

use crate::AuthResult;
use crate::storage::SessionStorage;
use crate::token::TokenService;
use crate::types::{CreateUser, LoginUser, PublicUser};
use crate::user::UserService;

/// Successful sign-in payload.
///
/// The boundary layer transports `access_token` via the `auth_token`
/// response header, `refresh_token` via the httpOnly cookie, and serializes
/// only `user` into the body.
#[derive(Debug, Clone)]
pub struct SignInOutcome {
    /// Short-lived access token.
    pub access_token: String,

    /// Long-lived refresh token, bound to the created session.
    pub refresh_token: String,

    /// Sanitized user payload.
    pub user: PublicUser,
}

/// Successful refresh-exchange payload.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    /// Fresh access token with unchanged identity claims.
    pub access_token: String,

    /// New refresh token, present only when rotation is enabled.
    pub rotated_refresh_token: Option<String>,
}

/// Auth orchestrator.
pub struct AuthService {
    users: Arc<UserService>,
    sessions: Arc<dyn SessionStorage>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    /// Creates a new auth orchestrator.
    #[must_use]
    pub fn new(
        users: Arc<UserService>,
        sessions: Arc<dyn SessionStorage>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            sessions,
            tokens,
        }
    }

    /// Returns the user service backing this orchestrator.
    #[must_use]
    pub fn users(&self) -> &Arc<UserService> {
        &self.users
    }

    /// Returns the token service backing this orchestrator.
    #[must_use]
    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns `EmailAlreadyRegistered` if the email is taken.
    pub async fn sign_up(&self, dto: CreateUser) -> AuthResult<PublicUser> {
        self.users.create_user(dto).await
    }

    /// Authenticates a user and opens a session.
    ///
    /// On success a token pair is issued and the refresh token is bound to
    /// a session through the cap-and-evict path, so a user's fourth
    /// concurrent sign-in evicts their oldest session.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` or `PasswordMismatch`; the HTTP boundary maps
    /// both onto a generic `SignInRejected` forbidden response.
    pub async fn sign_in(&self, dto: LoginUser) -> AuthResult<SignInOutcome> {
        let user = self.users.find_by_login(&dto).await?;
        let pair = self.tokens.issue_pair(&user)?;

        self.sessions
            .create_session_and_override(user.id, &pair.refresh_token)
            .await?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInOutcome {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            user: user.to_public(),
        })
    }

    /// Exchanges a bound refresh token for a fresh access token.
    ///
    /// The presented token must decode validly (the guard enforced that
    /// before this runs) AND exactly equal the token stored on one of the
    /// subject's live sessions. A signature-valid token whose session was
    /// deleted or evicted does not pass.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the subject no longer resolves, or
    /// `SessionNotFound` if no live session holds the exact token string.
    pub async fn refresh_token(&self, user_id: Uuid, presented: &str) -> AuthResult<RefreshOutcome> {
        let (user, session) = self
            .sessions
            .find_session_by_user_and_token(user_id, presented)
            .await?;

        let access_token = self.tokens.issue_access(&user)?;

        let rotated_refresh_token = if self.tokens.rotates_refresh_tokens() {
            // Rotate the session that presented the token; the user's other
            // sessions keep their own bindings.
            let refresh = self.tokens.issue_refresh(&user)?;
            self.sessions.update_session(session.id, &refresh).await?;
            Some(refresh)
        } else {
            None
        };

        tracing::debug!(user_id = %user.id, rotated = rotated_refresh_token.is_some(), "Access token refreshed");

        Ok(RefreshOutcome {
            access_token,
            rotated_refresh_token,
        })
    }

    /// Tears down the session bound to the presented refresh cookie.
    ///
    /// Best-effort by design: an absent, malformed, expired or unbound
    /// cookie still results in `true`-shaped success so the boundary layer
    /// always clears client-side credentials. Returns whether a session was
    /// actually deleted.
    pub async fn logout(&self, refresh_cookie: Option<&str>) -> bool {
        let Some(cookie) = refresh_cookie.filter(|c| !c.is_empty()) else {
            tracing::debug!("Logout without refresh cookie - nothing to tear down");
            return false;
        };

        // Unverified decode: the cookie may be expired, and logout must
        // still find and delete the bound session.
        let claims = match self.tokens.jwt().decode_unverified(cookie) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Logout with undecodable refresh cookie");
                return false;
            }
        };

        let sessions = match self.sessions.find_sessions_by_user(claims.id).await {
            Ok(sessions) => sessions,
            Err(e) => {
                tracing::debug!(error = %e, user_id = %claims.id, "Logout session lookup failed");
                return false;
            }
        };

        let Some(session) = sessions.into_iter().find(|s| s.token == cookie) else {
            tracing::debug!(user_id = %claims.id, "Logout cookie not bound to any session");
            return false;
        };

        match self.sessions.delete_session(session.id).await {
            Ok(()) => {
                tracing::info!(user_id = %claims.id, session_id = %session.id, "User logged out");
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, session_id = %session.id, "Logout session delete failed");
                false
            }
        }
    }
}
