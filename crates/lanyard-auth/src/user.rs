//! User service: credential-store-backed CRUD with cache-aside read views.
//!
//! Read paths go through the cache (`user:<id>`, `user:<email>`, short TTL;
//! `all_users` listing, rebuilt wholesale). Every mutating operation
//! rebuilds the listing after the store commit. Cache population is
//! best-effort: it never fails the surrounding operation.

use std::sync::Arc;

use uuid::Uuid;

use crate::AuthResult;
use crate::cache::{ALL_USERS_KEY, CacheService, user_email_key, user_id_key};
use crate::config::CacheConfig;
use crate::error::AuthError;
use crate::password::PasswordHasher;
use crate::storage::{NewUser, RoleStorage, UserStorage};
use crate::types::role::DEFAULT_ROLE;
use crate::types::{CreateUser, LoginUser, PublicUser, UpdatePassword, User};

/// User lifecycle service.
pub struct UserService {
    users: Arc<dyn UserStorage>,
    roles: Arc<dyn RoleStorage>,
    cache: Arc<CacheService>,
    hasher: Arc<dyn PasswordHasher>,
    config: CacheConfig,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStorage>,
        roles: Arc<dyn RoleStorage>,
        cache: Arc<CacheService>,
        hasher: Arc<dyn PasswordHasher>,
        config: CacheConfig,
    ) -> Self {
        Self {
            users,
            roles,
            cache,
            hasher,
            config,
        }
    }

    /// Creates a new user with the default `PUBLIC` role.
    ///
    /// # Errors
    ///
    /// Returns `EmailAlreadyRegistered` if the email is taken.
    pub async fn create_user(&self, dto: CreateUser) -> AuthResult<PublicUser> {
        if self.users.find_by_email(&dto.email).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let password_hash = self.hasher.hash(&dto.password)?;

        // Idempotent connect-or-create keeps first sign-up from racing on
        // the role row.
        let role = self.roles.connect_or_create(DEFAULT_ROLE).await?;

        let user = self
            .users
            .create(NewUser {
                email: dto.email,
                name: dto.name,
                password_hash,
                role_name: role.name,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User created");
        self.rebuild_listing().await;

        Ok(user.to_public())
    }

    /// Looks up a user by email and verifies the password.
    ///
    /// Returns the full record: the orchestrator needs it to issue tokens.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` or `PasswordMismatch`. The HTTP boundary
    /// collapses both into a generic `SignInRejected`.
    pub async fn find_by_login(&self, dto: &LoginUser) -> AuthResult<User> {
        let user = self
            .users
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(|| AuthError::user_not_found(format!("no user for {}", dto.email)))?;

        if !self.hasher.verify(&dto.password, &user.password_hash)? {
            return Err(AuthError::PasswordMismatch);
        }

        Ok(user)
    }

    /// Finds a user by id, read-through cached under `user:<id>`.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the id does not resolve.
    pub async fn find_user_by_id(&self, id: Uuid) -> AuthResult<PublicUser> {
        let key = user_id_key(id);
        if let Some(cached) = self.cache.get::<PublicUser>(&key).await {
            return Ok(cached);
        }

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::user_not_found(format!("no user with id {id}")))?;

        let public = user.to_public();
        self.cache
            .set(&key, &public, Some(self.config.entity_ttl))
            .await;
        Ok(public)
    }

    /// Finds a user by email, read-through cached under `user:<email>`.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the email does not resolve.
    pub async fn find_user_by_email(&self, email: &str) -> AuthResult<PublicUser> {
        let key = user_email_key(email);
        if let Some(cached) = self.cache.get::<PublicUser>(&key).await {
            return Ok(cached);
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::user_not_found(format!("no user for {email}")))?;

        let public = user.to_public();
        self.cache
            .set(&key, &public, Some(self.config.entity_ttl))
            .await;
        Ok(public)
    }

    /// Finds a user by an email-or-name substring match.
    ///
    /// Free-form queries make poor cache keys, so this read goes straight
    /// to the store.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if nothing matches.
    pub async fn find_user_by_email_or_name(&self, query: &str) -> AuthResult<PublicUser> {
        let user = self
            .users
            .find_by_email_or_name(query)
            .await?
            .ok_or_else(|| AuthError::user_not_found(format!("no user matching {query}")))?;

        Ok(user.to_public())
    }

    /// Returns the sanitized user listing, served from the `all_users`
    /// cache entry when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage listing fails on a cache miss.
    pub async fn find_all_users(&self) -> AuthResult<Vec<PublicUser>> {
        if let Some(cached) = self.cache.get::<Vec<PublicUser>>(ALL_USERS_KEY).await {
            return Ok(cached);
        }

        let listing = self.sanitized_listing().await?;
        self.cache.set(ALL_USERS_KEY, &listing, None).await;
        Ok(listing)
    }

    /// Assigns a named role to a user.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` or `RoleNotFound`.
    pub async fn assign_role_to_user(
        &self,
        user_id: Uuid,
        role_name: &str,
    ) -> AuthResult<PublicUser> {
        let user = self.users.assign_role(user_id, role_name).await?;

        tracing::info!(user_id = %user.id, role = role_name, "Role assigned");
        self.drop_entity_entries(&user).await;
        self.rebuild_listing().await;

        Ok(user.to_public())
    }

    /// Replaces a user's password through the hashing collaborator.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not exist.
    pub async fn update_user_password(
        &self,
        user_id: Uuid,
        dto: UpdatePassword,
    ) -> AuthResult<PublicUser> {
        let password_hash = self.hasher.hash(&dto.password)?;
        let user = self.users.update_password(user_id, &password_hash).await?;

        tracing::info!(user_id = %user.id, "Password updated");
        self.drop_entity_entries(&user).await;
        self.rebuild_listing().await;

        Ok(user.to_public())
    }

    /// Deletes a user (sessions cascade with it).
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not exist.
    pub async fn delete_user(&self, user_id: Uuid) -> AuthResult<PublicUser> {
        let user = self.users.delete(user_id).await?;

        tracing::info!(user_id = %user.id, "User deleted");
        self.drop_entity_entries(&user).await;
        self.rebuild_listing().await;

        Ok(user.to_public())
    }

    /// Drops the per-entity cache entries for a user after a mutation.
    async fn drop_entity_entries(&self, user: &User) {
        self.cache.delete(&user_id_key(user.id)).await;
        self.cache.delete(&user_email_key(&user.email)).await;
    }

    /// Recomputes the sanitized `all_users` listing from the store.
    ///
    /// Cache is best-effort: a failed rebuild is logged and swallowed, the
    /// primary store result still returns to the caller.
    async fn rebuild_listing(&self) {
        match self.sanitized_listing().await {
            Ok(listing) => self.cache.set(ALL_USERS_KEY, &listing, None).await,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to rebuild all_users cache");
                self.cache.delete(ALL_USERS_KEY).await;
            }
        }
    }

    async fn sanitized_listing(&self) -> AuthResult<Vec<PublicUser>> {
        let users = self.users.list(0, self.config.listing_page_size).await?;
        Ok(users.iter().map(User::to_public).collect())
    }
}
