use std::fmt::{self, Display};
use std::str::FromStr;

use anyhow::anyhow;

use crate::key::Key;

/// How the version id and the entity key are joined into a cache key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyFormat {
    /// `version_id + key`, no delimiter. Compatible with entries written
    /// by earlier deployments.
    #[default]
    Concatenated,
    /// `<len(version_id)>:version_id + key`. Unambiguous for arbitrary
    /// version ids and keys.
    LengthPrefixed,
}

impl FromStr for KeyFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concatenated" => Ok(KeyFormat::Concatenated),
            "length-prefixed" | "length_prefixed" => Ok(KeyFormat::LengthPrefixed),
            other => Err(anyhow!("unknown cache key format '{other}'")),
        }
    }
}

/// Key of an entity in the cache, namespaced by deployment version.
///
/// Only obtainable through [`CacheKey::build`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn build(version_id: &str, key: &Key, format: KeyFormat) -> Self {
        let cache_key = match format {
            KeyFormat::Concatenated => format!("{version_id}{key}"),
            KeyFormat::LengthPrefixed => format!("{}:{version_id}{key}", version_id.len()),
        };
        Self(cache_key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[test]
fn test_concatenated_key() {
    let key = Key::from("Person:123");
    let cache_key = CacheKey::build("v1", &key, KeyFormat::Concatenated);
    assert_eq!(cache_key.as_str(), "v1Person:123");
}

#[test]
fn test_versions_do_not_collide() {
    let key = Key::new("Person", 123);
    for (v1, v2) in [("v1", "v2"), ("1", "2"), ("20240101t120000", "20240102t090000")] {
        for format in [KeyFormat::Concatenated, KeyFormat::LengthPrefixed] {
            assert_ne!(
                CacheKey::build(v1, &key, format),
                CacheKey::build(v2, &key, format)
            );
        }
    }
}

#[test]
fn test_length_prefix_disambiguates() {
    // "v1" + "1Person:1" and "v11" + "Person:1" concatenate to the same string
    let a = Key::from("1Person:1");
    let b = Key::from("Person:1");
    assert_eq!(
        CacheKey::build("v1", &a, KeyFormat::Concatenated),
        CacheKey::build("v11", &b, KeyFormat::Concatenated)
    );
    assert_ne!(
        CacheKey::build("v1", &a, KeyFormat::LengthPrefixed),
        CacheKey::build("v11", &b, KeyFormat::LengthPrefixed)
    );
    assert_eq!(
        CacheKey::build("v11", &b, KeyFormat::LengthPrefixed).as_str(),
        "3:v11Person:1"
    );
}

#[test]
fn test_parse_key_format() {
    assert_eq!("concatenated".parse::<KeyFormat>().unwrap(), KeyFormat::Concatenated);
    assert_eq!("Length-Prefixed".parse::<KeyFormat>().unwrap(), KeyFormat::LengthPrefixed);
    assert!("base64".parse::<KeyFormat>().is_err());
}
