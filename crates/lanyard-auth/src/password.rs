//! Password hashing collaborator.
//!
//! Credential hashing sits behind a trait so the slow Argon2id production
//! hasher can be swapped for a fast fake in tests.
//!
//! # Security
//!
//! - Hashing uses Argon2id (hybrid mode) with default parameters
//! - Salts are generated using OsRng (cryptographically secure RNG)
//! - Hashes are stored in PHC string format

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::AuthResult;
use crate::error::AuthError;

/// Hashes and verifies user credentials.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into an opaque storage string.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails (rare).
    fn hash(&self, plaintext: &str) -> AuthResult<String>;

    /// Verifies a plaintext password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash is malformed.
    fn verify(&self, plaintext: &str, hash: &str) -> AuthResult<bool>;
}

/// Argon2id-based production hasher.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> AuthResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AuthError::internal(format!("malformed password hash: {e}")))?;
        Ok(Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}
