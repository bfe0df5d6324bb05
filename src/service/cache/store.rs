//! Cache storage backends.
//!
//! The dashboard talks to storage through [`CacheStore`] so the same cache
//! logic runs against Valkey in production and an in-process map when
//! Valkey is unreachable or absent in tests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::cache::CacheError;

/// String-keyed storage with per-entry expiry and prefix invalidation.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Removes every key starting with `prefix`, returning how many went.
    async fn delete_prefix(&self, prefix: &str) -> Result<u64, CacheError>;
}

/// Process-local store backing tests and the degraded no-Valkey mode.
///
/// Expiry is lazy: entries are dropped when a read finds them stale.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, MemoryEntry>>,
}

struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // The read guard must drop before the removal below can lock.
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if entry.expires_at > Instant::now() {
                    return Ok(Some(entry.value.clone()));
                }
                true
            }
            None => false,
        };

        if expired {
            self.entries
                .remove_if(key, |_, entry| entry.expires_at <= Instant::now());
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<u64, CacheError> {
        // Approximate under concurrent writes, exact otherwise.
        let before = self.entries.len() as u64;
        self.entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - self.entries.len() as u64)
    }
}
