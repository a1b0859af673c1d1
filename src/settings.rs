use anyhow::{Context, Result};
use memproxy_config::{Config, CACHE_KEY_FORMAT, VERSION_ID};

use crate::cache_key::KeyFormat;

/// Immutable configuration captured by a proxy at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxySettings {
    /// Deployment version id, prepended to every cache key.
    pub version_id: String,
    pub key_format: KeyFormat,
}

impl ProxySettings {
    pub fn new(version_id: impl Into<String>) -> Self {
        Self {
            version_id: version_id.into(),
            key_format: KeyFormat::default(),
        }
    }

    pub fn with_key_format(mut self, key_format: KeyFormat) -> Self {
        self.key_format = key_format;
        self
    }

    /// Reads `VERSION_ID` (required) and `CACHE_KEY_FORMAT` (optional).
    pub fn from_config(cfg: impl Config) -> Result<Self> {
        let version_id = cfg.get(VERSION_ID)
        .with_context(||"no deployment version configured, set VERSION_ID")?;
        let key_format = match cfg.get(CACHE_KEY_FORMAT) {
            Ok(format) => format.parse()?,
            Err(_) => KeyFormat::default(),
        };
        Ok(Self { version_id, key_format })
    }
}

#[test]
fn test_settings_from_config() {
    use memproxy_config::HashMapConfig;

    let cfg = HashMapConfig::from_pairs([(VERSION_ID, "v7"), (CACHE_KEY_FORMAT, "length-prefixed")]);
    let settings = ProxySettings::from_config(&cfg).unwrap();
    assert_eq!(settings, ProxySettings::new("v7").with_key_format(KeyFormat::LengthPrefixed));

    let cfg = HashMapConfig::from_pairs([(VERSION_ID, "v7")]);
    assert_eq!(ProxySettings::from_config(&cfg).unwrap().key_format, KeyFormat::Concatenated);

    let cfg = HashMapConfig::from_pairs([(CACHE_KEY_FORMAT, "concatenated")]);
    assert!(ProxySettings::from_config(&cfg).is_err());

    let cfg = HashMapConfig::from_pairs([(VERSION_ID, "v7"), (CACHE_KEY_FORMAT, "rot13")]);
    assert!(ProxySettings::from_config(&cfg).is_err());
}
