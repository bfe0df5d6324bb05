//! Tests for ValkeyStore's CacheStore implementation
//!
//! These tests verify the Valkey-backed store's behavior including:
//! - Round-tripping a payload through set and get
//! - Reading a key that was never written
//! - Removing a single key
//! - Prefix invalidation through the server-side scan script
//! - Expiry being attached to written entries

use std::time::Duration;

use cadastre::service::cache::store::CacheStore;
use cadastre::service::cache::valkey::ValkeyStore;
use cadastre_test_utils::ValkeyTest;
use fred::interfaces::KeysInterface;

#[tokio::test]
async fn test_set_then_get_returns_the_payload() {
    let valkey = ValkeyTest::new().await.expect("Failed to create Valkey test");
    let store = ValkeyStore::new(valkey.pool.clone());
    let key = format!("{}:overview", valkey.namespace());

    store
        .set(&key, "{\"total\":4}", Duration::from_secs(60))
        .await
        .expect("Set should succeed");

    let value = store.get(&key).await.expect("Get should succeed");
    assert_eq!(
        value.as_deref(),
        Some("{\"total\":4}"),
        "Should read back the stored payload"
    );

    store
        .delete_prefix(&valkey.namespace())
        .await
        .expect("Failed to clean up Valkey keys");
}

#[tokio::test]
async fn test_get_unknown_key_returns_none() {
    let valkey = ValkeyTest::new().await.expect("Failed to create Valkey test");
    let store = ValkeyStore::new(valkey.pool.clone());
    let key = format!("{}:never-written", valkey.namespace());

    let value = store.get(&key).await.expect("Get should succeed");
    assert_eq!(value, None, "Unknown key should read as a miss");
}

#[tokio::test]
async fn test_delete_removes_the_key() {
    let valkey = ValkeyTest::new().await.expect("Failed to create Valkey test");
    let store = ValkeyStore::new(valkey.pool.clone());
    let key = format!("{}:doomed", valkey.namespace());

    store
        .set(&key, "payload", Duration::from_secs(60))
        .await
        .expect("Set should succeed");

    store.delete(&key).await.expect("Delete should succeed");

    let value = store.get(&key).await.expect("Get should succeed");
    assert_eq!(value, None, "Deleted key should read as a miss");
}

#[tokio::test]
async fn test_delete_prefix_removes_only_matching_keys() {
    let valkey = ValkeyTest::new().await.expect("Failed to create Valkey test");
    let store = ValkeyStore::new(valkey.pool.clone());
    let namespace = valkey.namespace();
    let ttl = Duration::from_secs(60);

    store
        .set(&format!("{namespace}:district:4:overview"), "a", ttl)
        .await
        .expect("Set should succeed");
    store
        .set(&format!("{namespace}:district:4:dossiers"), "b", ttl)
        .await
        .expect("Set should succeed");
    store
        .set(&format!("{namespace}:global:overview"), "c", ttl)
        .await
        .expect("Set should succeed");

    let removed = store
        .delete_prefix(&format!("{namespace}:district:4:"))
        .await
        .expect("Prefix delete should succeed");
    assert_eq!(removed, 2, "Should remove exactly the district keys");

    let survivor = store
        .get(&format!("{namespace}:global:overview"))
        .await
        .expect("Get should succeed");
    assert!(survivor.is_some(), "Keys outside the prefix should survive");

    store
        .delete_prefix(&namespace)
        .await
        .expect("Failed to clean up Valkey keys");
}

#[tokio::test]
async fn test_set_applies_the_requested_expiry() {
    let valkey = ValkeyTest::new().await.expect("Failed to create Valkey test");
    let store = ValkeyStore::new(valkey.pool.clone());
    let key = format!("{}:expiring", valkey.namespace());

    store
        .set(&key, "payload", Duration::from_secs(60))
        .await
        .expect("Set should succeed");

    let ttl: i64 = valkey.pool.ttl(&key).await.expect("TTL lookup should succeed");
    assert!(
        ttl > 0 && ttl <= 60,
        "Entry should carry the requested expiry, got {}",
        ttl
    );

    store.delete(&key).await.expect("Failed to clean up Valkey keys");
}
