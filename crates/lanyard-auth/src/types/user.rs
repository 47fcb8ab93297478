//! User domain type and request DTOs.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A user identity record.
///
/// Owned by the credential store. The credential hash is only ever written
/// through the password hashing collaborator; it must never leave the
/// storage/service layer; use [`PublicUser`] for anything cached or
/// returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,

    /// Email address, unique across users (case-sensitive as stored).
    pub email: String,

    /// Display name.
    pub name: String,

    /// Argon2 credential hash (PHC string).
    pub password_hash: String,

    /// Name of the role this user references.
    pub role_name: String,

    /// When the user was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// When the user was last updated.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl User {
    /// Returns the sanitized projection of this user.
    #[must_use]
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role_name: self.role_name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Sanitized user projection.
///
/// This type intentionally has no credential hash field, so any value that
/// reaches a cache or a response body is sanitized by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    /// Unique identifier.
    pub id: Uuid,

    /// Email address.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Name of the role this user references.
    pub role_name: String,

    /// When the user was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// When the user was last updated.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Sign-up request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    /// Email address, must be unique.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Plaintext password, hashed before storage.
    pub password: String,
}

/// Sign-in request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    /// Email address.
    pub email: String,

    /// Plaintext password.
    pub password: String,
}

/// Password update request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePassword {
    /// New plaintext password, hashed before storage.
    pub password: String,
}
