use thiserror::Error;

/// Failure talking to the cache layer.
///
/// The proxy never hands these to its callers; they are logged and treated
/// as a miss (reads) or as done (invalidations and cache fills).
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
    #[error("cache entry {key} could not be (de)serialized")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Failure talking to the backing datastore, the system of record.
///
/// Always propagated to the caller as-is.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("datastore unavailable: {0}")]
    Unavailable(String),
    #[error("entity could not be (de)serialized")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
