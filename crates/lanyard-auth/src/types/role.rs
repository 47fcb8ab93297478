//! Role domain type.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The role assigned to newly signed-up users.
pub const DEFAULT_ROLE: &str = "PUBLIC";

/// A named permission group.
///
/// Roles are referenced (not owned) by users: many users point at one role,
/// and user-side operations never delete a role. Roles are created lazily on
/// first use (connect-or-create by name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role name (natural key), e.g. `PUBLIC` or `ADMIN`.
    pub name: String,

    /// When the role was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Role {
    /// Creates a new role with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
