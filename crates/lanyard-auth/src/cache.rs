//! Cache-aside layer for derived read views.
//!
//! An injected, process-wide cache instance (no ambient global state) with
//! TTL-bearing entries. Reads never fail: a miss, an expired entry, or a
//! deserialization mismatch all come back as `None`. Writers race on
//! last-write-wins, which is acceptable because the store is the source of
//! truth and every cached view is rebuilt deterministically from it.
//!
//! # Example
//!
//! ```ignore
//! use lanyard_auth::cache::CacheService;
//! use std::time::Duration;
//!
//! let cache = CacheService::new();
//! cache.set("user:42", &public_user, Some(Duration::from_secs(60))).await;
//! let hit: Option<PublicUser> = cache.get("user:42").await;
//! ```

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// Cache key for the sanitized user listing.
pub const ALL_USERS_KEY: &str = "all_users";

/// Builds the single-entity cache key for a user id.
#[must_use]
pub fn user_id_key(id: uuid::Uuid) -> String {
    format!("user:{id}")
}

/// Builds the single-entity cache key for a user email.
#[must_use]
pub fn user_email_key(email: &str) -> String {
    format!("user:{email}")
}

/// One cached value with optional expiry.
struct CacheEntry {
    value: serde_json::Value,
    expires_at: Option<OffsetDateTime>,
}

impl CacheEntry {
    fn is_fresh(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// In-memory TTL cache for derived read views.
///
/// Values are stored as JSON so heterogeneous view types share one map.
pub struct CacheService {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl CacheService {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached value under `key` if present and unexpired.
    ///
    /// Never raises on a miss; an entry that fails to deserialize into `T`
    /// is treated as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = OffsetDateTime::now_utc();

        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_fresh(now) => {
                    return serde_json::from_value(entry.value.clone()).ok();
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Entry expired: drop it under the write lock, re-checking freshness
        // in case a writer repopulated the key in between.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.is_fresh(now) {
                return serde_json::from_value(entry.value.clone()).ok();
            }
            entries.remove(key);
        }
        None
    }

    /// Stores `value` under `key`, overwriting silently.
    ///
    /// `ttl` of `None` means the entry never expires on its own and lives
    /// until the next overwrite or [`delete`](Self::delete).
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize cache value");
                return;
            }
        };

        let expires_at = ttl.map(|ttl| OffsetDateTime::now_utc() + ttl);
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry { value, expires_at });
    }

    /// Removes the entry under `key`. Returns `true` if one was present.
    pub async fn delete(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of live entries (expired-but-unswept entries included).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for CacheService {
    fn default() -> Self {
        Self::new()
    }
}
