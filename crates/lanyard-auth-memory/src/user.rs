//! In-memory user table.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use lanyard_auth::AuthResult;
use lanyard_auth::error::AuthError;
use lanyard_auth::storage::{NewUser, UserStorage};
use lanyard_auth::types::User;

use crate::Inner;

/// User storage backed by a creation-ordered vector.
pub struct MemoryUserStorage {
    inner: Arc<Inner>,
}

impl MemoryUserStorage {
    pub(crate) fn new(inner: Arc<Inner>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl UserStorage for MemoryUserStorage {
    async fn create(&self, new_user: NewUser) -> AuthResult<User> {
        // Uniqueness check and insert under one write lock so two
        // concurrent sign-ups with the same email cannot both pass.
        let mut users = self.inner.users.write().await;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            role_name: new_user.role_name,
            created_at: now,
            updated_at: now,
        };

        users.push(user.clone());
        tracing::debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        let users = self.inner.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let users = self.inner.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_or_name(&self, query: &str) -> AuthResult<Option<User>> {
        let users = self.inner.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.contains(query) || u.name.contains(query))
            .cloned())
    }

    async fn list(&self, skip: usize, take: usize) -> AuthResult<Vec<User>> {
        let users = self.inner.users.read().await;
        Ok(users.iter().skip(skip).take(take).cloned().collect())
    }

    async fn assign_role(&self, user_id: Uuid, role_name: &str) -> AuthResult<User> {
        let lock = self.inner.user_lock(user_id).await;
        let _guard = lock.lock().await;

        // Role must exist before the user record is touched.
        {
            let roles = self.inner.roles.read().await;
            if !roles.contains_key(role_name) {
                return Err(AuthError::role_not_found(role_name));
            }
        }

        let mut users = self.inner.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AuthError::user_not_found(format!("id {user_id}")))?;

        user.role_name = role_name.to_string();
        user.updated_at = OffsetDateTime::now_utc();
        Ok(user.clone())
    }

    async fn update_password(&self, user_id: Uuid, password_hash: &str) -> AuthResult<User> {
        let lock = self.inner.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let mut users = self.inner.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AuthError::user_not_found(format!("id {user_id}")))?;

        user.password_hash = password_hash.to_string();
        user.updated_at = OffsetDateTime::now_utc();
        Ok(user.clone())
    }

    async fn delete(&self, user_id: Uuid) -> AuthResult<User> {
        let lock = self.inner.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let removed = {
            let mut users = self.inner.users.write().await;
            let index = users
                .iter()
                .position(|u| u.id == user_id)
                .ok_or_else(|| AuthError::user_not_found(format!("id {user_id}")))?;
            users.remove(index)
        };

        // Cascade: the user's sessions go with the user.
        {
            let mut sessions = self.inner.sessions.write().await;
            sessions.retain(|s| s.user_id != user_id);
        }

        drop(_guard);
        self.inner.drop_user_lock(user_id).await;

        tracing::debug!(user_id = %user_id, "User deleted with sessions");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryAuthStorage;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Test User".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role_name: "PUBLIC".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let storage = MemoryAuthStorage::default();
        let users = storage.users();

        users.create(new_user("a@example.com")).await.unwrap();
        let err = users.create(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailAlreadyRegistered));
    }

    #[tokio::test]
    async fn test_list_preserves_creation_order() {
        let storage = MemoryAuthStorage::default();
        let users = storage.users();

        users.create(new_user("first@example.com")).await.unwrap();
        users.create(new_user("second@example.com")).await.unwrap();
        users.create(new_user("third@example.com")).await.unwrap();

        let page = users.list(1, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].email, "second@example.com");
        assert_eq!(page[1].email, "third@example.com");
    }

    #[tokio::test]
    async fn test_assign_role_requires_existing_role() {
        let storage = MemoryAuthStorage::default();
        let users = storage.users();

        let user = users.create(new_user("a@example.com")).await.unwrap();
        let err = users.assign_role(user.id, "ADMIN").await.unwrap_err();
        assert!(matches!(err, AuthError::RoleNotFound { .. }));

        storage.roles().connect_or_create("ADMIN").await.unwrap();
        let updated = users.assign_role(user.id, "ADMIN").await.unwrap();
        assert_eq!(updated.role_name, "ADMIN");
    }

    #[tokio::test]
    async fn test_find_by_email_or_name_matches_substring() {
        let storage = MemoryAuthStorage::default();
        let users = storage.users();

        users.create(new_user("alice@example.com")).await.unwrap();
        users
            .create(NewUser {
                name: "Bob Example".to_string(),
                ..new_user("bob@example.com")
            })
            .await
            .unwrap();

        let by_email = users.find_by_email_or_name("alice").await.unwrap().unwrap();
        assert_eq!(by_email.email, "alice@example.com");

        let by_name = users.find_by_email_or_name("Bob").await.unwrap().unwrap();
        assert_eq!(by_name.email, "bob@example.com");

        assert!(users.find_by_email_or_name("carol").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_releases_user_lock_entry() {
        let storage = MemoryAuthStorage::default();
        let users = storage.users();

        let user = users.create(new_user("a@example.com")).await.unwrap();
        storage.roles().connect_or_create("ADMIN").await.unwrap();
        users.assign_role(user.id, "ADMIN").await.unwrap();
        assert_eq!(storage.inner.user_lock_count().await, 1);

        users.delete(user.id).await.unwrap();
        assert_eq!(storage.inner.user_lock_count().await, 0);
    }

    #[tokio::test]
    async fn test_delete_cascades_sessions() {
        let storage = MemoryAuthStorage::default();
        let users = storage.users();
        let sessions = storage.sessions();

        let user = users.create(new_user("a@example.com")).await.unwrap();
        sessions.create_session(user.id, "token-1").await.unwrap();
        sessions.create_session(user.id, "token-2").await.unwrap();

        users.delete(user.id).await.unwrap();

        assert!(users.find_by_id(user.id).await.unwrap().is_none());
        assert!(sessions.find_sessions_by_user(user.id).await.unwrap().is_empty());
    }
}
