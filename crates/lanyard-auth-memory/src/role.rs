//! In-memory role table.

use std::sync::Arc;

use async_trait::async_trait;

use lanyard_auth::AuthResult;
use lanyard_auth::storage::RoleStorage;
use lanyard_auth::types::Role;

use crate::Inner;

/// Role storage backed by a name-keyed map.
pub struct MemoryRoleStorage {
    inner: Arc<Inner>,
}

impl MemoryRoleStorage {
    pub(crate) fn new(inner: Arc<Inner>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RoleStorage for MemoryRoleStorage {
    async fn find_by_name(&self, name: &str) -> AuthResult<Option<Role>> {
        let roles = self.inner.roles.read().await;
        Ok(roles.get(name).cloned())
    }

    async fn connect_or_create(&self, name: &str) -> AuthResult<Role> {
        let mut roles = self.inner.roles.write().await;
        if let Some(role) = roles.get(name) {
            return Ok(role.clone());
        }

        let role = Role::new(name);
        roles.insert(name.to_string(), role.clone());
        tracing::debug!(role = %name, "Role created on first use");
        Ok(role)
    }
}
