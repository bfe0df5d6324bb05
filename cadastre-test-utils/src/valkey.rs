use fred::prelude::*;

use crate::TestError;

/// Valkey test setup with a namespaced key prefix.
///
/// This struct manages a connection pool and a unique key namespace so cache
/// tests running in parallel never observe each other's entries. Tests should
/// build their cache keys under [`namespace`](Self::namespace) and clear that
/// prefix when done.
pub struct ValkeyTest {
    pub pool: Pool,
    namespace: String,
}

impl ValkeyTest {
    /// Create a new ValkeyTest instance with a unique namespace.
    pub async fn new() -> Result<Self, TestError> {
        let config = Config::from_url("redis://127.0.0.1:6379")?;
        let pool = Pool::new(config, None, None, None, 5)?;
        pool.init().await?;

        let namespace = Self::generate_unique_namespace();

        Ok(ValkeyTest { pool, namespace })
    }

    /// Get the unique key namespace for this test instance.
    ///
    /// This ensures each test writes under a unique prefix to prevent
    /// collisions when tests run in parallel. The namespace is generated once
    /// during ValkeyTest creation and cached.
    pub fn namespace(&self) -> String {
        self.namespace.clone()
    }

    /// Generate a unique namespace using timestamp and thread ID.
    fn generate_unique_namespace() -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let thread_id = std::thread::current().id();

        let mut hasher = DefaultHasher::new();
        timestamp.hash(&mut hasher);
        thread_id.hash(&mut hasher);
        let hash = hasher.finish();

        format!("test:{}:{:x}:stats", timestamp, hash)
    }
}
