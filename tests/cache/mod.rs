pub mod remember;
pub mod store;

use std::collections::BTreeMap;

use cadastre::service::cache::{valkey::ValkeyStore, StatisticsCache};
use cadastre_test_utils::ValkeyTest;

pub fn setup_test_cache(valkey: &ValkeyTest) -> StatisticsCache<ValkeyStore> {
    StatisticsCache::new(ValkeyStore::new(valkey.pool.clone()))
}

pub fn no_params() -> BTreeMap<String, String> {
    BTreeMap::new()
}
