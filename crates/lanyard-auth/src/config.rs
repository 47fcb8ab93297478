//! Auth module configuration.
//!
//! Configuration for token lifetimes, the per-user session cap, cache TTLs,
//! and the cookie/header transport boundary.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the JWT signing secret.
pub const JWT_SECRET_ENV: &str = "LANYARD_JWT_SECRET";

/// Root auth configuration.
///
/// # Example (TOML)
///
/// ```toml
/// [auth]
/// issuer = "https://auth.example.com"
///
/// [auth.token]
/// access_token_lifetime = "15m"
/// refresh_token_lifetime = "7d"
///
/// [auth.session]
/// max_sessions_per_user = 3
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Server issuer URL (used in token `iss` claim).
    pub issuer: String,

    /// JWT signing secret. Usually left empty in files and loaded from the
    /// `LANYARD_JWT_SECRET` environment variable via [`AuthConfig::from_env`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Token lifetime configuration.
    pub token: TokenLifetimes,

    /// Session store configuration.
    pub session: SessionConfig,

    /// Cache-aside layer configuration.
    pub cache: CacheConfig,

    /// Cookie transport configuration.
    pub cookie: CookieConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: "http://localhost:8080".to_string(),
            secret: None,
            token: TokenLifetimes::default(),
            session: SessionConfig::default(),
            cache: CacheConfig::default(),
            cookie: CookieConfig::default(),
        }
    }
}

/// Token lifetime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenLifetimes {
    /// Access token lifetime. Short: access tokens ride on every request.
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,

    /// Refresh token lifetime. Long: refresh tokens are bound to a session
    /// row and can be invalidated server-side at any time.
    #[serde(with = "humantime_serde")]
    pub refresh_token_lifetime: Duration,

    /// Rotate the refresh token on each refresh exchange.
    /// Disabled by default: the minimal flow reissues only access tokens.
    pub rotate_refresh_tokens: bool,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access_token_lifetime: Duration::from_secs(15 * 60),
            refresh_token_lifetime: Duration::from_secs(7 * 24 * 3600),
            rotate_refresh_tokens: false,
        }
    }
}

/// Session store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum concurrent sessions per user. Inserting beyond the cap
    /// evicts the user's oldest session first.
    pub max_sessions_per_user: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions_per_user: 3,
        }
    }
}

/// Cache-aside layer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL for single-entity read-through entries (`user:<id>`, `user:<email>`).
    #[serde(with = "humantime_serde")]
    pub entity_ttl: Duration,

    /// Page size for the cached `all_users` listing.
    pub listing_page_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entity_ttl: Duration::from_secs(60),
            listing_page_size: 10,
        }
    }
}

/// Cookie and header transport configuration.
///
/// The access token travels in the `auth_token` response header (and may be
/// read back from a same-name cookie); the refresh token travels in an
/// httpOnly, SameSite=Strict cookie.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Name of the access token header/cookie.
    pub access_token_name: String,

    /// Name of the refresh token cookie.
    pub refresh_cookie_name: String,

    /// Set the `Secure` attribute on cookies.
    pub secure: bool,

    /// Cookie path.
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_token_name: "auth_token".to_string(),
            refresh_cookie_name: "refresh_token".to_string(),
            secure: true,
            path: "/".to_string(),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// A required configuration value is missing.
    #[error("Missing required configuration: {0}")]
    Missing(String),
}

impl AuthConfig {
    /// Loads the signing secret from the environment, keeping all other
    /// fields at their current values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `LANYARD_JWT_SECRET` is unset and no
    /// secret was configured explicitly.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        if self.secret.is_none() {
            self.secret = std::env::var(JWT_SECRET_ENV).ok().filter(|s| !s.is_empty());
        }
        if self.secret.is_none() {
            return Err(ConfigError::Missing(JWT_SECRET_ENV.to_string()));
        }
        Ok(self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - The issuer URL is empty
    /// - The session cap is zero
    /// - The access token lifetime is not shorter than the refresh lifetime
    /// - A cookie/header name is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.issuer.is_empty() {
            return Err(ConfigError::InvalidValue(
                "issuer cannot be empty".to_string(),
            ));
        }

        if self.session.max_sessions_per_user == 0 {
            return Err(ConfigError::InvalidValue(
                "max_sessions_per_user must be > 0".to_string(),
            ));
        }

        if self.token.access_token_lifetime >= self.token.refresh_token_lifetime {
            return Err(ConfigError::InvalidValue(
                "access_token_lifetime must be shorter than refresh_token_lifetime".to_string(),
            ));
        }

        if self.cookie.access_token_name.is_empty() || self.cookie.refresh_cookie_name.is_empty() {
            return Err(ConfigError::InvalidValue(
                "cookie names cannot be empty".to_string(),
            ));
        }

        if self.cache.listing_page_size == 0 {
            return Err(ConfigError::InvalidValue(
                "listing_page_size must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
