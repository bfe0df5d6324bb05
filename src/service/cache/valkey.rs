//! Valkey-backed cache store.

use std::time::Duration;

use async_trait::async_trait;
use fred::{
    clients::Pool,
    interfaces::{KeysInterface, LuaInterface},
    types::Expiration,
};

use super::lua::DELETE_PREFIX_SCRIPT;
use super::store::CacheStore;
use crate::error::cache::CacheError;

#[derive(Clone)]
pub struct ValkeyStore {
    pool: Pool,
}

impl ValkeyStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CacheStore for ValkeyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.pool.get(key).await?)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let _: () = self
            .pool
            .set(
                key,
                value,
                Some(Expiration::EX(ttl.as_secs() as i64)),
                None,
                false,
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let _: i64 = self.pool.del(key).await?;
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<u64, CacheError> {
        // Executes a SCAN loop server-side so invalidation stays atomic
        // from the caller's point of view.
        let removed: i64 = self
            .pool
            .eval(
                DELETE_PREFIX_SCRIPT,
                Vec::<String>::new(),
                vec![format!("{prefix}*")],
            )
            .await?;
        Ok(removed as u64)
    }
}
