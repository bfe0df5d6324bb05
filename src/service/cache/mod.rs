//! Read-through caching for computed statistics.
//!
//! The cache is strictly an optimization: any storage or decoding failure
//! reads as a miss and the caller recomputes from the database, so a dead
//! Valkey node degrades throughput, never correctness. A per-key gate
//! collapses concurrent misses into a single computation.

pub mod key;
mod lua;
pub mod store;
pub mod ttl;
pub mod valkey;

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use crate::error::{cache::CacheError, Error};
use crate::model::scope::Scope;
use store::CacheStore;
use ttl::TtlTier;

pub struct StatisticsCache<S: CacheStore> {
    store: S,
    in_flight: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl<S: CacheStore> StatisticsCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Returns the cached value for the key, computing and storing it on a
    /// miss.
    ///
    /// Concurrent callers for the same key wait on one gate and the first
    /// one through computes; the rest pick up its result from the cache.
    /// Failed computations are returned to the caller and never stored.
    pub async fn remember<T, F, Fut>(
        &self,
        scope: &Scope,
        kind: &str,
        params: &BTreeMap<String, String>,
        tier: TtlTier,
        compute: F,
    ) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let key = key::build(scope, kind, params);

        if let Some(value) = self.read(&key).await {
            return Ok(value);
        }

        let gate = self
            .in_flight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = gate.lock().await;

        // A prior gate holder may have filled the cache while we waited.
        let result = match self.read(&key).await {
            Some(value) => Ok(value),
            None => {
                let computed = compute().await;
                if let Ok(value) = &computed {
                    self.write(&key, value, tier).await;
                }
                computed
            }
        };

        drop(guard);
        self.release(&key, &gate);
        result
    }

    /// Drops a single cached entry.
    pub async fn forget(&self, scope: &Scope, kind: &str, params: &BTreeMap<String, String>) {
        let key = key::build(scope, kind, params);
        if let Err(error) = self.store.delete(&key).await {
            tracing::warn!("Error invalidating cache entry {}: {:?}", key, error);
        }
    }

    /// Drops every cached entry of one scope, returning how many went.
    pub async fn forget_scope(&self, scope: &Scope) -> u64 {
        self.forget_prefix(&key::scope_prefix(scope)).await
    }

    /// Drops every cached entry the subsystem owns.
    pub async fn forget_all(&self) -> u64 {
        self.forget_prefix(&key::root_prefix()).await
    }

    async fn forget_prefix(&self, prefix: &str) -> u64 {
        match self.store.delete_prefix(prefix).await {
            Ok(removed) => removed,
            Err(error) => {
                tracing::warn!("Error invalidating cache prefix {}: {:?}", prefix, error);
                0
            }
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!("Error reading cache entry {}: {:?}", key, error);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(source) => {
                // A payload layout change between deploys reads as a miss.
                let error = CacheError::Decode {
                    key: key.to_string(),
                    source,
                };
                tracing::warn!("Error decoding cache entry: {:?}", error);
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T, tier: TtlTier) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!("Error encoding cache entry {}: {:?}", key, error);
                return;
            }
        };
        if let Err(error) = self.store.set(key, &payload, tier.duration()).await {
            tracing::warn!("Error writing cache entry {}: {:?}", key, error);
        }
    }

    /// Removes the gate once the last holder is done with it. Waiters
    /// still holding clones keep it alive.
    fn release(&self, key: &str, gate: &Arc<Mutex<()>>) {
        self.in_flight.remove_if(key, |_, current| {
            Arc::ptr_eq(current, gate) && Arc::strong_count(current) <= 2
        });
    }
}
