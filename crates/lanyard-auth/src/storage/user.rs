//! User storage trait.
//!
//! Defines the interface for user persistence operations. Implementations
//! must enforce the unique constraint on `email` and serialize mutations of
//! the (User, Sessions) aggregate per user id (see [`SessionStorage`] for
//! the session-side operations that share that discipline).
//!
//! [`SessionStorage`]: crate::storage::SessionStorage

use async_trait::async_trait;
use uuid::Uuid;

use crate::AuthResult;
use crate::types::User;

/// Payload for creating a user record.
///
/// The password is already hashed by the time it reaches storage; backends
/// never see plaintext credentials.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address (unique).
    pub email: String,

    /// Display name.
    pub name: String,

    /// Argon2 credential hash.
    pub password_hash: String,

    /// Role to connect, created on first use if absent.
    pub role_name: String,
}

/// Storage trait for user records.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Creates a new user, connecting (or lazily creating) the named role.
    ///
    /// # Errors
    ///
    /// Returns `EmailAlreadyRegistered` if the email is taken, or a storage
    /// error if persistence fails.
    async fn create(&self, new_user: NewUser) -> AuthResult<User>;

    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails. An unknown id is
    /// `Ok(None)`, not an error.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>>;

    /// Finds a user by exact email.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Finds the first user, in creation order, whose email or name
    /// contains `query` as a substring.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails. No match is
    /// `Ok(None)`, not an error.
    async fn find_by_email_or_name(&self, query: &str) -> AuthResult<Option<User>>;

    /// Lists users in creation order.
    ///
    /// # Arguments
    ///
    /// * `skip` - Number of leading records to skip
    /// * `take` - Maximum number of records to return
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn list(&self, skip: usize, take: usize) -> AuthResult<Vec<User>>;

    /// Assigns a named role to a user.
    ///
    /// Loads user and role, then updates the user's role reference. The
    /// whole operation runs under the user's aggregate lock; a failed role
    /// lookup leaves the user untouched.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` or `RoleNotFound` if either side of the
    /// assignment is missing.
    async fn assign_role(&self, user_id: Uuid, role_name: &str) -> AuthResult<User>;

    /// Replaces a user's credential hash.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not exist.
    async fn update_password(&self, user_id: Uuid, password_hash: &str) -> AuthResult<User>;

    /// Deletes a user and cascade-deletes the user's sessions.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not exist.
    async fn delete(&self, user_id: Uuid) -> AuthResult<User>;
}
