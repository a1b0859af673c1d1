use std::collections::HashMap;

use anyhow::{Result, anyhow};
use dotenv::*;

/// Config key holding the deployment version id used to namespace cache keys.
pub const VERSION_ID: &str = "VERSION_ID";
/// Config key selecting how cache keys are laid out.
pub const CACHE_KEY_FORMAT: &str = "CACHE_KEY_FORMAT";
/// Config key holding `env_logger` filter directives.
pub const RUST_LOG: &str = "RUST_LOG";

pub trait Config: Send + Sync{
    fn get(&self, key: &str) -> Result<String>;
    fn clone_box_dyn(&self) -> Box<dyn Config>;

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|_| default.to_string())
    }
}

impl Clone for Box<dyn Config> {
    fn clone(&self) -> Self {
        self.clone_box_dyn()
    }
}

impl<C> Config for &C
where C: Config + ?Sized
{
    fn get(&self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn clone_box_dyn(&self) -> Box<dyn Config> {
        (**self).clone_box_dyn()
    }
}

/// Looks keys up in `main` first, then in `fallback`.
#[derive(Clone)]
pub struct CompositeConfig {
    main: Box<dyn Config>,
    fallback: Box<dyn Config>,
}

impl CompositeConfig {
    pub fn from_configs(main: Box<dyn Config>, fallback: Box<dyn Config>) -> CompositeConfig {
        CompositeConfig{ main, fallback }
    }
}

impl Config for CompositeConfig {
    fn get(&self, key: &str) -> Result<String> {
        self.main
        .get(key)
        .or_else(|_e| self.fallback.get(key))
    }

    fn clone_box_dyn(&self) -> Box<dyn Config> {
        Box::new(CompositeConfig {
            main: self.main.clone_box_dyn(),
            fallback: self.fallback.clone_box_dyn()
        })
    }
}

/// Reads the process environment, after merging in a `.env` file if one is found.
#[derive(Clone)]
pub struct EnvConfig;

impl EnvConfig {
    pub fn from_env() -> EnvConfig {
        if let Ok(path) = dotenv() {
            let path = path.to_string_lossy();
            println!("additional environment variables loaded from {path}");
        }

        EnvConfig
    }
}

impl Config for EnvConfig{
    fn get(&self, key: &str) -> Result<String> {
        std::env::var(key).map_err(|_| anyhow!("no such environment variable {key}"))
    }
    fn clone_box_dyn(&self) -> Box<dyn Config> {
        Box::new(self.clone())
    }
}

pub fn default_config() -> impl Config {
    let default_values = [
        (CACHE_KEY_FORMAT, "concatenated"),
        (RUST_LOG, "info"),
    ];
    HashMapConfig::from_pairs(default_values)
}

#[derive(Clone, Default)]
pub struct HashMapConfig {
    map: HashMap<String,String>
}

impl HashMapConfig {
    pub fn new(map: HashMap<String,String>) -> HashMapConfig {
        Self {map}
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item=(&'a str, &'a str)>) -> HashMapConfig {
        let map = pairs.into_iter()
        .map(|(k,v)|(k.to_string(), v.to_string()))
        .collect();
        Self {map}
    }
}

impl Config for HashMapConfig {
    fn get(&self, key: &str) -> Result<String> {
        self.map
        .get(key)
        .map(String::clone)
        .ok_or_else(||anyhow!("key '{key}' not found"))
    }

    fn clone_box_dyn(&self) -> Box<dyn Config> {
        Box::new(self.clone())
    }
}

#[test]
fn test_composite_prefers_main() {
    let main = HashMapConfig::from_pairs([(VERSION_ID, "v2")]);
    let fallback = HashMapConfig::from_pairs([(VERSION_ID, "v1"), (CACHE_KEY_FORMAT, "concatenated")]);
    let config = CompositeConfig::from_configs(Box::new(main), Box::new(fallback));

    assert_eq!(config.get(VERSION_ID).unwrap(), "v2");
    assert_eq!(config.get(CACHE_KEY_FORMAT).unwrap(), "concatenated");
    assert!(config.get("NOT_THERE").is_err());
}

#[test]
fn test_get_or() {
    let config = HashMapConfig::default();
    assert_eq!(config.get_or(VERSION_ID, "dev"), "dev");

    let boxed: Box<dyn Config> = Box::new(default_config());
    assert_eq!(boxed.clone().get(RUST_LOG).unwrap(), "info");
}
