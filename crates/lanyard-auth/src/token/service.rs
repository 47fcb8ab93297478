//! Token pair issuance.
//!
//! The token service turns an authenticated user into an access/refresh
//! token pair and reissues access tokens during refresh exchanges. Session
//! binding of refresh tokens is the session store's concern; this service
//! only mints signed strings.

use std::sync::Arc;

use crate::AuthResult;
use crate::config::TokenLifetimes;
use crate::error::AuthError;
use crate::token::jwt::{JwtService, TokenClaims};
use crate::types::{TokenPair, User};

/// Issues access and refresh tokens for authenticated users.
pub struct TokenService {
    /// JWT service for encoding/decoding tokens.
    jwt: Arc<JwtService>,

    /// Configured token lifetimes.
    lifetimes: TokenLifetimes,
}

impl TokenService {
    /// Creates a new token service.
    #[must_use]
    pub fn new(jwt: Arc<JwtService>, lifetimes: TokenLifetimes) -> Self {
        Self { jwt, lifetimes }
    }

    /// Returns the underlying JWT service.
    #[must_use]
    pub fn jwt(&self) -> &Arc<JwtService> {
        &self.jwt
    }

    /// Returns `true` if refresh tokens should be rotated on refresh.
    #[must_use]
    pub fn rotates_refresh_tokens(&self) -> bool {
        self.lifetimes.rotate_refresh_tokens
    }

    /// Issues a fresh access/refresh token pair for `user`.
    ///
    /// Both tokens carry the same `{id, email}` identity claims; they differ
    /// only in lifetime. The caller is responsible for binding the refresh
    /// token to a session row.
    ///
    /// # Errors
    ///
    /// Returns an error if token encoding fails.
    pub fn issue_pair(&self, user: &User) -> AuthResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access(user)?,
            refresh_token: self.issue_refresh(user)?,
        })
    }

    /// Issues a fresh access token for `user` (refresh exchange path).
    ///
    /// # Errors
    ///
    /// Returns an error if token encoding fails.
    pub fn issue_access(&self, user: &User) -> AuthResult<String> {
        let claims = TokenClaims::new(
            self.jwt.issuer(),
            user.id,
            &user.email,
            self.lifetimes.access_token_lifetime.as_secs() as i64,
        );
        self.encode(&claims)
    }

    /// Issues a fresh refresh token for `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if token encoding fails.
    pub fn issue_refresh(&self, user: &User) -> AuthResult<String> {
        let claims = TokenClaims::new(
            self.jwt.issuer(),
            user.id,
            &user.email,
            self.lifetimes.refresh_token_lifetime.as_secs() as i64,
        );
        self.encode(&claims)
    }

    fn encode(&self, claims: &TokenClaims) -> AuthResult<String> {
        self.jwt
            .encode(claims)
            .map_err(|e| AuthError::internal(format!("token encoding failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            name: "Ada".to_string(),
            password_hash: "hash".to_string(),
            role_name: "PUBLIC".to_string(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    fn service() -> TokenService {
        let jwt = Arc::new(JwtService::new(b"test-secret", "https://auth.test"));
        TokenService::new(jwt, TokenLifetimes::default())
    }

    #[test]
    fn test_pair_carries_identity_claims() {
        let svc = service();
        let user = sample_user();
        let pair = svc.issue_pair(&user).unwrap();

        let access = svc.jwt().decode(&pair.access_token).unwrap();
        let refresh = svc.jwt().decode(&pair.refresh_token).unwrap();
        assert_eq!(access.id, user.id);
        assert_eq!(access.email, user.email);
        assert_eq!(refresh.id, user.id);
        assert_eq!(refresh.email, user.email);
    }

    #[test]
    fn test_refresh_outlives_access() {
        let svc = service();
        let user = sample_user();
        let pair = svc.issue_pair(&user).unwrap();

        let access = svc.jwt().decode(&pair.access_token).unwrap();
        let refresh = svc.jwt().decode(&pair.refresh_token).unwrap();
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_rotation_disabled_by_default() {
        assert!(!service().rotates_refresh_tokens());
    }
}
