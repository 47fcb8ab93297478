//! Session storage trait.
//!
//! This module defines the storage interface for the bounded, per-user
//! session collection.
//!
//! # Implementation Notes
//!
//! Implementations must:
//!
//! - Return a user's sessions in creation order ("oldest" = index 0)
//! - Serialize mutations of one user's (User, Sessions) aggregate, so two
//!   concurrent [`create_session_and_override`] calls for the same user
//!   cannot both observe "under the cap" and jointly exceed it
//! - Order eviction strictly before insert within that critical section
//!
//! # Security Considerations
//!
//! - Session tokens are credentials; never log them
//! - Deleting or overwriting a session row must immediately invalidate the
//!   refresh token it carried
//!
//! [`create_session_and_override`]: SessionStorage::create_session_and_override

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use crate::types::{Session, User};

/// Storage trait for per-user session records.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Inserts a session bound to `user_id`, without cap enforcement.
    ///
    /// Repeated calls create distinct sessions; only
    /// [`create_session_and_override`](Self::create_session_and_override)
    /// enforces the per-user cap.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not resolve, or
    /// `SessionNotCreated` if persistence fails.
    async fn create_session(&self, user_id: Uuid, token: &str) -> AuthResult<Session>;

    /// Inserts a session, evicting the user's oldest session first when the
    /// user is at the cap.
    ///
    /// The check-evict-insert sequence runs as one per-user critical
    /// section: load the user's ordered session list, delete the head when
    /// the existing count exceeds cap - 1, then insert.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not resolve, or
    /// `SessionNotCreated` if persistence fails.
    async fn create_session_and_override(&self, user_id: Uuid, token: &str)
    -> AuthResult<Session>;

    /// Overwrites the token on one session, addressed by primary key.
    ///
    /// Rotation rewrites the session that presented the old token, never a
    /// sibling session of the same user, so a user's other devices keep
    /// their own bindings.
    ///
    /// # Errors
    ///
    /// Returns `NoSessionToUpdate` if no session matched the id.
    async fn update_session(&self, session_id: Uuid, token: &str) -> AuthResult<Session>;

    /// Deletes a session by primary key.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if no row matched.
    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    /// Returns all sessions for a user, in creation order.
    ///
    /// An empty list is a valid result, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_sessions_by_user(&self, user_id: Uuid) -> AuthResult<Vec<Session>>;

    /// Confirms that `token` is currently bound to one of the user's
    /// sessions, returning the owning user and the bound session.
    ///
    /// The match is an exact string comparison against the stored token; a
    /// signature-valid token that no session holds (after logout or
    /// eviction) does not match. The returned session is the one that
    /// carries the token, so callers can rotate it by id.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not resolve, or
    /// `SessionNotFound` if no session holds the exact token string.
    async fn find_session_by_user_and_token(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> AuthResult<(User, Session)>;
}
