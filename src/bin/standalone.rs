use anyhow::Result;
use memproxy::config::{default_config, CompositeConfig, Config, EnvConfig, HashMapConfig, RUST_LOG, VERSION_ID};
use memproxy::{Key, MemoryDatastore, MemoryStore, Model, ProxyDatastoreService, ProxySettings};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Person {
    key: Key,
    name: String,
}

impl Model for Person {
    fn kind() -> &'static str {
        "Person"
    }

    fn key(&self) -> &Key {
        &self.key
    }
}

fn main() -> Result<()> {
    let executable_name = std::env::args().next().unwrap_or_else(||"unknown".to_string());

    let fallback = CompositeConfig::from_configs(
        Box::new(default_config()),
        Box::new(HashMapConfig::from_pairs([(VERSION_ID, "dev")])),
    );
    let config = CompositeConfig::from_configs(
        Box::new(EnvConfig::from_env()),
        Box::new(fallback),
    );
    memproxy::init_logging(&config);
    log::info!("starting {executable_name}...");

    let settings = ProxySettings::from_config(&config)?;
    let proxy: ProxyDatastoreService<Person, _, _> =
        ProxyDatastoreService::new(MemoryDatastore::new(), MemoryStore::new(), settings);
    log::info!("using version id '{}', key format {:?}", proxy.version_id(), proxy.key_format());

    let person = Person { key: Key::new(Person::kind(), 123), name: "Ada".to_string() };
    proxy.put(&person)?;
    log::info!("stored {}, cache key is {}", person.key, proxy.create_memcache_key(&person.key));

    // first read fills the cache, second one is served from it
    for _ in 0..2 {
        let found = proxy.get(&person.key)?;
        log::info!("get {} -> {found:?} ({} cached entries)", person.key, proxy.cache().len());
    }

    proxy.delete(&person.key)?;
    log::info!("after delete: {:?}", proxy.get(&person.key)?);

    if EnvConfig.get(RUST_LOG).is_err() {
        println!("Use RUST_LOG environment variable to set one of the levels, e.g. RUST_LOG=trace");
    }
    Ok(())
}
