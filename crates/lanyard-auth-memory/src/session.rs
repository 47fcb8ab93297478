//! In-memory session table with per-user cap enforcement.
//!
//! The cap-and-evict path runs as a per-user critical section: count the
//! user's sessions, delete the head when the existing count exceeds
//! cap - 1, then insert. Eviction strictly precedes insert, so the table
//! never holds more than the cap for one user.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use lanyard_auth::AuthResult;
use lanyard_auth::error::AuthError;
use lanyard_auth::storage::SessionStorage;
use lanyard_auth::types::{Session, User};

use crate::Inner;

/// Session storage backed by a creation-ordered vector.
pub struct MemorySessionStorage {
    inner: Arc<Inner>,
}

impl MemorySessionStorage {
    pub(crate) fn new(inner: Arc<Inner>) -> Self {
        Self { inner }
    }

    async fn require_user(&self, user_id: Uuid) -> AuthResult<User> {
        let users = self.inner.users.read().await;
        users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| AuthError::user_not_found(format!("id {user_id}")))
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn create_session(&self, user_id: Uuid, token: &str) -> AuthResult<Session> {
        self.require_user(user_id).await?;

        let session = Session::new(user_id, token);
        let mut sessions = self.inner.sessions.write().await;
        sessions.push(session.clone());
        Ok(session)
    }

    async fn create_session_and_override(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> AuthResult<Session> {
        let lock = self.inner.user_lock(user_id).await;
        let _guard = lock.lock().await;

        self.require_user(user_id).await?;

        let mut sessions = self.inner.sessions.write().await;

        let count = sessions.iter().filter(|s| s.user_id == user_id).count();
        if count + 1 > self.inner.max_sessions_per_user {
            // Evict the oldest before inserting the new one.
            if let Some(index) = sessions.iter().position(|s| s.user_id == user_id) {
                let evicted = sessions.remove(index);
                tracing::debug!(
                    user_id = %user_id,
                    session_id = %evicted.id,
                    "Oldest session evicted at cap"
                );
            }
        }

        let session = Session::new(user_id, token);
        sessions.push(session.clone());
        Ok(session)
    }

    async fn update_session(&self, session_id: Uuid, token: &str) -> AuthResult<Session> {
        // Single find-and-mutate under the table lock; an evicted session
        // simply no longer matches.
        let mut sessions = self.inner.sessions.write().await;
        let session = sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or(AuthError::NoSessionToUpdate)?;

        session.token = token.to_string();
        session.updated_at = OffsetDateTime::now_utc();
        Ok(session.clone())
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        let mut sessions = self.inner.sessions.write().await;
        let index = sessions
            .iter()
            .position(|s| s.id == session_id)
            .ok_or_else(|| AuthError::session_not_found(format!("id {session_id}")))?;

        sessions.remove(index);
        Ok(())
    }

    async fn find_sessions_by_user(&self, user_id: Uuid) -> AuthResult<Vec<Session>> {
        let sessions = self.inner.sessions.read().await;
        Ok(sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_session_by_user_and_token(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> AuthResult<(User, Session)> {
        let user = self.require_user(user_id).await?;

        let sessions = self.inner.sessions.read().await;
        let session = sessions
            .iter()
            .find(|s| s.user_id == user_id && s.token == token)
            .cloned()
            .ok_or_else(|| AuthError::session_not_found("token not bound to a live session"))?;

        Ok((user, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryAuthStorage;
    use lanyard_auth::storage::NewUser;

    async fn seeded_user(storage: &MemoryAuthStorage) -> User {
        storage
            .users()
            .create(NewUser {
                email: "a@example.com".to_string(),
                name: "Test User".to_string(),
                password_hash: "$argon2id$fake".to_string(),
                role_name: "PUBLIC".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_cap_evicts_oldest_first() {
        let storage = MemoryAuthStorage::new(3);
        let user = seeded_user(&storage).await;
        let sessions = storage.sessions();

        for token in ["t1", "t2", "t3", "t4"] {
            sessions
                .create_session_and_override(user.id, token)
                .await
                .unwrap();
        }

        let live = sessions.find_sessions_by_user(user.id).await.unwrap();
        let tokens: Vec<&str> = live.iter().map(|s| s.token.as_str()).collect();
        assert_eq!(tokens, ["t2", "t3", "t4"]);
    }

    #[tokio::test]
    async fn test_cap_not_enforced_by_plain_create() {
        let storage = MemoryAuthStorage::new(3);
        let user = seeded_user(&storage).await;
        let sessions = storage.sessions();

        for token in ["t1", "t2", "t3", "t4"] {
            sessions.create_session(user.id, token).await.unwrap();
        }

        let live = sessions.find_sessions_by_user(user.id).await.unwrap();
        assert_eq!(live.len(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_sign_ins_respect_cap() {
        let storage = MemoryAuthStorage::new(3);
        let user = seeded_user(&storage).await;
        let sessions = storage.sessions();

        let mut handles = Vec::new();
        for i in 0..8 {
            let sessions = storage.sessions();
            let user_id = user.id;
            handles.push(tokio::spawn(async move {
                sessions
                    .create_session_and_override(user_id, &format!("t{i}"))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let live = sessions.find_sessions_by_user(user.id).await.unwrap();
        assert_eq!(live.len(), 3);
    }

    #[tokio::test]
    async fn test_update_session_rewrites_only_addressed_session() {
        let storage = MemoryAuthStorage::new(3);
        let user = seeded_user(&storage).await;
        let sessions = storage.sessions();

        sessions.create_session(user.id, "t1").await.unwrap();
        let second = sessions.create_session(user.id, "t2").await.unwrap();

        sessions.update_session(second.id, "rotated").await.unwrap();

        let live = sessions.find_sessions_by_user(user.id).await.unwrap();
        assert_eq!(live[0].token, "t1");
        assert_eq!(live[1].token, "rotated");
    }

    #[tokio::test]
    async fn test_update_session_unknown_id() {
        let storage = MemoryAuthStorage::new(3);
        let user = seeded_user(&storage).await;
        storage
            .sessions()
            .create_session(user.id, "t1")
            .await
            .unwrap();

        let err = storage
            .sessions()
            .update_session(Uuid::new_v4(), "rotated")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NoSessionToUpdate));
    }

    #[tokio::test]
    async fn test_token_binding_is_exact() {
        let storage = MemoryAuthStorage::new(3);
        let user = seeded_user(&storage).await;
        let sessions = storage.sessions();

        let bound = sessions.create_session(user.id, "bound-token").await.unwrap();

        let (found, session) = sessions
            .find_session_by_user_and_token(user.id, "bound-token")
            .await
            .unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(session.id, bound.id);

        let err = sessions
            .find_session_by_user_and_token(user.id, "other-token")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::SessionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_session_invalidates_binding() {
        let storage = MemoryAuthStorage::new(3);
        let user = seeded_user(&storage).await;
        let sessions = storage.sessions();

        let session = sessions.create_session(user.id, "bound-token").await.unwrap();
        sessions.delete_session(session.id).await.unwrap();

        let err = sessions
            .find_session_by_user_and_token(user.id, "bound-token")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::SessionNotFound { .. }));

        let err = sessions.delete_session(session.id).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_sessions_for_unknown_user() {
        let storage = MemoryAuthStorage::new(3);
        let err = storage
            .sessions()
            .create_session(Uuid::new_v4(), "t1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound { .. }));
    }
}
