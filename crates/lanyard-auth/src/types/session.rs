//! Session domain type.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// One authenticated client session.
///
/// A session is exclusively owned by its user (cascade-deleted with it) and
/// carries the refresh token currently bound to that client. A refresh token
/// presented by a client is valid only while it exactly equals the token
/// stored here: overwriting or deleting the row invalidates the old token
/// immediately, even though its signature stays valid until expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier.
    pub id: Uuid,

    /// Owning user id.
    pub user_id: Uuid,

    /// The refresh token currently bound to this session.
    pub token: String,

    /// When the session was created. Sessions are ordered by this field;
    /// "oldest" means lowest creation order.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// When the session was last updated (token overwrite).
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Session {
    /// Creates a new session binding `token` to `user_id`.
    #[must_use]
    pub fn new(user_id: Uuid, token: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token: token.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
