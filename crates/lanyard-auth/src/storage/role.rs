//! Role storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::Role;

/// Storage trait for named roles.
///
/// Roles are referenced by users, never owned: user-side operations must not
/// delete roles. Creation is idempotent by natural key.
#[async_trait]
pub trait RoleStorage: Send + Sync {
    /// Finds a role by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_name(&self, name: &str) -> AuthResult<Option<Role>>;

    /// Returns the role with the given name, creating it on first use.
    ///
    /// Repeated calls with the same name return the same role
    /// (connect-or-create by natural key).
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn connect_or_create(&self, name: &str) -> AuthResult<Role>;
}
