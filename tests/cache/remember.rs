//! Tests for StatisticsCache::remember against a live Valkey instance
//!
//! These tests verify the read-through path end to end including:
//! - Computing on a cold key and serving the cached value afterwards
//! - Scope invalidation removing one district's entries only
//! - Structured payloads surviving the round trip through Valkey
//!
//! Cache keys are shared across the instance, so every test here claims
//! district ids no other test uses.

use serde::{Deserialize, Serialize};

use cadastre::error::Error;
use cadastre::model::scope::Scope;
use cadastre::service::cache::ttl::TtlTier;
use cadastre_test_utils::ValkeyTest;

use super::{no_params, setup_test_cache};

#[tokio::test]
async fn test_remember_serves_the_cached_value() {
    let valkey = ValkeyTest::new().await.expect("Failed to create Valkey test");
    let cache = setup_test_cache(&valkey);
    let scope = Scope::district(9311);

    let first = cache
        .remember(&scope, "overview", &no_params(), TtlTier::Short, || async {
            Ok::<i64, Error>(4)
        })
        .await
        .expect("First remember should compute");
    assert_eq!(first, 4, "Cold key should run the computation");

    // The second seed must lose to the entry the first call stored.
    let second = cache
        .remember(&scope, "overview", &no_params(), TtlTier::Short, || async {
            Ok::<i64, Error>(99)
        })
        .await
        .expect("Second remember should succeed");
    assert_eq!(second, 4, "Warm key should serve the cached value");

    cache.forget(&scope, "overview", &no_params()).await;
}

#[tokio::test]
async fn test_forget_scope_leaves_other_districts_cached() {
    let valkey = ValkeyTest::new().await.expect("Failed to create Valkey test");
    let cache = setup_test_cache(&valkey);
    let invalidated = Scope::district(9321);
    let untouched = Scope::district(9322);

    cache
        .remember(
            &invalidated,
            "overview",
            &no_params(),
            TtlTier::Short,
            || async { Ok::<i64, Error>(1) },
        )
        .await
        .expect("Seed should compute");
    cache
        .remember(
            &untouched,
            "overview",
            &no_params(),
            TtlTier::Short,
            || async { Ok::<i64, Error>(5) },
        )
        .await
        .expect("Seed should compute");

    let removed = cache.forget_scope(&invalidated).await;
    assert_eq!(removed, 1, "Should remove the invalidated district's entry");

    let recomputed = cache
        .remember(
            &invalidated,
            "overview",
            &no_params(),
            TtlTier::Short,
            || async { Ok::<i64, Error>(2) },
        )
        .await
        .expect("Recompute should succeed");
    assert_eq!(recomputed, 2, "Invalidated key should recompute");

    let survivor = cache
        .remember(
            &untouched,
            "overview",
            &no_params(),
            TtlTier::Short,
            || async { Ok::<i64, Error>(99) },
        )
        .await
        .expect("Read should succeed");
    assert_eq!(survivor, 5, "Neighbor district should stay cached");

    cache.forget_scope(&invalidated).await;
    cache.forget_scope(&untouched).await;
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Snapshot {
    total: i64,
    label: String,
}

#[tokio::test]
async fn test_remember_round_trips_structured_payloads() {
    let valkey = ValkeyTest::new().await.expect("Failed to create Valkey test");
    let cache = setup_test_cache(&valkey);
    let scope = Scope::district(9331);

    let seeded = cache
        .remember(&scope, "snapshot", &no_params(), TtlTier::Short, || async {
            Ok::<Snapshot, Error>(Snapshot {
                total: 17,
                label: "Rufisque".to_string(),
            })
        })
        .await
        .expect("Seed should compute");
    assert_eq!(seeded.total, 17, "Cold key should run the computation");

    let cached: Snapshot = cache
        .remember(&scope, "snapshot", &no_params(), TtlTier::Short, || async {
            panic!("Warm key must not recompute")
        })
        .await
        .expect("Cached read should succeed");
    assert_eq!(
        cached,
        Snapshot {
            total: 17,
            label: "Rufisque".to_string(),
        },
        "Structured payload should survive the Valkey round trip"
    );

    cache.forget(&scope, "snapshot", &no_params()).await;
}
