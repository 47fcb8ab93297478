//! JWT encoding, decoding and validation.
//!
//! Access and refresh tokens are HS256 JWTs signed with a shared secret and
//! carrying the user's `{id, email}` identity claims. Token class is
//! distinguished only by lifetime; refresh token validity additionally
//! requires the session binding check performed by the session store.
//!
//! ## Example
//!
//! ```ignore
//! use lanyard_auth::token::jwt::{JwtService, TokenClaims};
//!
//! let jwt = JwtService::new(b"secret", "https://auth.example.com");
//! let token = jwt.encode(&claims)?;
//! let claims = jwt.decode(&token)?;
//! ```

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during JWT operations.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to encode a token.
    #[error("Failed to encode token: {message}")]
    EncodingError {
        /// Description of the encoding error.
        message: String,
    },

    /// Failed to decode a token.
    #[error("Failed to decode token: {message}")]
    DecodingError {
        /// Description of the decoding error.
        message: String,
    },

    /// The token has expired.
    #[error("Token expired")]
    Expired,

    /// The token signature is invalid.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The token claims are invalid.
    #[error("Invalid claims: {message}")]
    InvalidClaims {
        /// Description of why claims are invalid.
        message: String,
    },
}

impl JwtError {
    /// Creates a new `EncodingError`.
    #[must_use]
    pub fn encoding_error(message: impl Into<String>) -> Self {
        Self::EncodingError {
            message: message.into(),
        }
    }

    /// Creates a new `DecodingError`.
    #[must_use]
    pub fn decoding_error(message: impl Into<String>) -> Self {
        Self::DecodingError {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidClaims` error.
    #[must_use]
    pub fn invalid_claims(message: impl Into<String>) -> Self {
        Self::InvalidClaims {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a validation error
    /// (expired, invalid signature, bad claims).
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::Expired | Self::InvalidSignature | Self::InvalidClaims { .. }
        )
    }
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::InvalidIssuer
            | ErrorKind::InvalidSubject
            | ErrorKind::MissingRequiredClaim(_) => Self::invalid_claims(err.to_string()),
            _ => Self::decoding_error(err.to_string()),
        }
    }
}

// ============================================================================
// Token Claims
// ============================================================================

/// Identity claims carried by both access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer (auth server URL).
    pub iss: String,

    /// Subject: the user id.
    pub id: Uuid,

    /// The user's email.
    pub email: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl TokenClaims {
    /// Creates claims for the given identity, expiring `lifetime_secs`
    /// seconds from now.
    #[must_use]
    pub fn new(
        issuer: impl Into<String>,
        id: Uuid,
        email: impl Into<String>,
        lifetime_secs: i64,
    ) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            iss: issuer.into(),
            id,
            email: email.into(),
            iat: now,
            exp: now + lifetime_secs,
        }
    }

    /// Returns `true` if the expiration timestamp lies in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.exp < OffsetDateTime::now_utc().unix_timestamp()
    }
}

// ============================================================================
// JWT Service
// ============================================================================

/// Service for encoding and decoding HS256 tokens.
///
/// Thread-safe (`Send + Sync`); share it across tasks behind an `Arc`.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Creates a new JWT service from a shared signing secret.
    #[must_use]
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
        }
    }

    /// Returns the configured issuer.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Encodes claims into a signed JWT string.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::encoding_error(e.to_string()))
    }

    /// Decodes and validates a JWT string (signature, expiry, issuer).
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is invalid, the token is expired,
    /// or the issuer does not match.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(JwtError::from)
    }

    /// Decodes a JWT without verifying signature or expiry.
    ///
    /// Used only by best-effort paths (idempotent logout) that need the
    /// subject id out of whatever cookie the client still holds. Never use
    /// the result to authorize anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not structurally a JWT.
    pub fn decode_unverified(&self, token: &str) -> Result<TokenClaims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .map_err(JwtError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(b"test-secret", "https://auth.test")
    }

    fn claims(lifetime: i64) -> TokenClaims {
        TokenClaims::new("https://auth.test", Uuid::new_v4(), "a@x.com", lifetime)
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let jwt = service();
        let claims = claims(60);
        let token = jwt.encode(&claims).unwrap();
        let decoded = jwt.decode(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = service();
        let mut claims = claims(60);
        claims.iat -= 600;
        claims.exp = claims.iat + 10;
        let token = jwt.encode(&claims).unwrap();
        assert!(matches!(jwt.decode(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let jwt = service();
        let token = jwt.encode(&claims(60)).unwrap();
        let other = JwtService::new(b"other-secret", "https://auth.test");
        assert!(matches!(
            other.decode(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let other = JwtService::new(b"test-secret", "https://evil.test");
        let token = other.encode(&claims(60)).unwrap();
        let err = service().decode(&token).unwrap_err();
        assert!(matches!(err, JwtError::InvalidClaims { .. }));
    }

    #[test]
    fn test_decode_unverified_ignores_expiry_and_signature() {
        let jwt = service();
        let mut claims = claims(60);
        claims.iat -= 600;
        claims.exp = claims.iat + 10;
        let token = jwt.encode(&claims).unwrap();

        let other = JwtService::new(b"other-secret", "https://auth.test");
        let decoded = other.decode_unverified(&token).unwrap();
        assert_eq!(decoded.id, claims.id);
        assert_eq!(decoded.email, claims.email);
    }

    #[test]
    fn test_decode_unverified_garbage_is_error() {
        assert!(service().decode_unverified("not-a-jwt").is_err());
    }
}
