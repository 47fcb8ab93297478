//! In-memory storage backend for lanyard-auth.
//!
//! Keeps users, roles and sessions in process-local tables behind
//! `tokio::sync::RwLock`. Useful for tests and single-node deployments
//! where persistence across restarts is not required.
//!
//! Per-user aggregate mutations (session cap-and-evict, role assignment,
//! user deletion) are serialized through a per-user `tokio::sync::Mutex`,
//! so two concurrent sign-ins for the same user cannot both observe "under
//! the cap" and jointly exceed it.
//!
//! # Example
//!
//! ```ignore
//! use lanyard_auth_memory::MemoryAuthStorage;
//!
//! let storage = MemoryAuthStorage::new(3);
//! let users = storage.users();
//! let sessions = storage.sessions();
//! ```

pub mod role;
pub mod session;
pub mod user;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use lanyard_auth::storage::{RoleStorage, SessionStorage, UserStorage};
use lanyard_auth::types::{Role, Session, User};

pub use role::MemoryRoleStorage;
pub use session::MemorySessionStorage;
pub use user::MemoryUserStorage;

/// Shared tables and locks for the in-memory backend.
pub(crate) struct Inner {
    /// Users in creation order.
    pub(crate) users: RwLock<Vec<User>>,

    /// Roles keyed by name.
    pub(crate) roles: RwLock<HashMap<String, Role>>,

    /// Sessions in creation order across all users; a user's ordered list
    /// is the order-preserving filter by `user_id`.
    pub(crate) sessions: RwLock<Vec<Session>>,

    /// Per-user aggregate locks, created lazily.
    user_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,

    /// Session cap enforced by the cap-and-evict path.
    pub(crate) max_sessions_per_user: usize,
}

impl Inner {
    fn new(max_sessions_per_user: usize) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            roles: RwLock::new(HashMap::new()),
            sessions: RwLock::new(Vec::new()),
            user_locks: Mutex::new(HashMap::new()),
            max_sessions_per_user,
        }
    }

    /// Returns the aggregate lock for a user, creating it on first use.
    ///
    /// The lock is returned by value so callers hold it across awaits
    /// without borrowing the registry.
    pub(crate) async fn user_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Removes a deleted user's entry from the lock registry so the map
    /// does not grow with user churn.
    pub(crate) async fn drop_user_lock(&self, user_id: Uuid) {
        let mut locks = self.user_locks.lock().await;
        locks.remove(&user_id);
    }

    #[cfg(test)]
    pub(crate) async fn user_lock_count(&self) -> usize {
        self.user_locks.lock().await.len()
    }
}

/// In-memory auth storage, handing out trait objects per table.
#[derive(Clone)]
pub struct MemoryAuthStorage {
    inner: Arc<Inner>,
}

impl MemoryAuthStorage {
    /// Creates empty storage with the given per-user session cap.
    #[must_use]
    pub fn new(max_sessions_per_user: usize) -> Self {
        Self {
            inner: Arc::new(Inner::new(max_sessions_per_user)),
        }
    }

    /// Returns the user storage handle.
    #[must_use]
    pub fn users(&self) -> Arc<dyn UserStorage> {
        Arc::new(MemoryUserStorage::new(self.inner.clone()))
    }

    /// Returns the role storage handle.
    #[must_use]
    pub fn roles(&self) -> Arc<dyn RoleStorage> {
        Arc::new(MemoryRoleStorage::new(self.inner.clone()))
    }

    /// Returns the session storage handle.
    #[must_use]
    pub fn sessions(&self) -> Arc<dyn SessionStorage> {
        Arc::new(MemorySessionStorage::new(self.inner.clone()))
    }
}

impl Default for MemoryAuthStorage {
    fn default() -> Self {
        Self::new(3)
    }
}
