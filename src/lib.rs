//! Cache-aside access to a document datastore.
//!
//! [`ProxyDatastoreService`] puts a memcache-style [`KeyByteValueStore`] in
//! front of a [`Datastore`]: writes invalidate the cached entry, reads are
//! served from the cache when possible and fill it when not. Cache keys are
//! prefixed with the deployment version id, so entries written by a previous
//! deployment are never read back.

pub mod cache_key;
pub mod error;
pub mod key;
pub mod memcache;
pub mod memory_datastore;
pub mod memory_store;
pub mod model;
pub mod proxy;
pub mod settings;
pub mod store;

pub use cache_key::{CacheKey, KeyFormat};
pub use error::{CacheError, StoreError};
pub use key::Key;
pub use memcache::{CacheLookup, Memcache};
pub use memory_datastore::MemoryDatastore;
pub use memory_store::MemoryStore;
pub use model::Model;
pub use proxy::ProxyDatastoreService;
pub use settings::ProxySettings;
pub use store::{Datastore, KeyByteValueStore};

pub use memproxy_config as config;

pub fn init_logging(cfg: impl memproxy_config::Config) {
    let rust_log_config = cfg.get(memproxy_config::RUST_LOG).ok();
    let mut logger_builder = env_logger::builder();
    if let Some(rust_log) = rust_log_config {
        logger_builder.parse_filters(&rust_log);
    } else {
        logger_builder.filter_level(log::LevelFilter::Info);
    }
    // a logger may already be installed, e.g. by a test harness
    if logger_builder.try_init().is_ok() {
        log::debug!("max logging level is: {}.", log::max_level());
    }
}
