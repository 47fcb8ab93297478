//! Domain types for users, roles, sessions and tokens.

pub mod role;
pub mod session;
pub mod user;

pub use role::Role;
pub use session::Session;
pub use user::{CreateUser, LoginUser, PublicUser, UpdatePassword, User};

use serde::{Deserialize, Serialize};

/// An access/refresh token pair issued on sign-in.
///
/// Not persisted as an entity: the refresh token string is bound to a
/// session row and the access token is a derived, short-lived artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token, transported via the `auth_token` header.
    pub access_token: String,

    /// Long-lived refresh token, transported via an httpOnly cookie and
    /// stored verbatim on the owning session row.
    pub refresh_token: String,
}
