use thiserror::Error;

/// Failure inside the cache layer. These are recovered close to where they
/// happen so a degraded cache never takes statistics down with it.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error(transparent)]
    Store(#[from] fred::error::Error),
    #[error("Failed to decode cached payload for key {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
