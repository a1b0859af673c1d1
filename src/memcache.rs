use log::{trace, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::cache_key::CacheKey;
use crate::error::CacheError;
use crate::model::Model;
use crate::store::KeyByteValueStore;

/// Cached form of a model, remembering the kind it was written as.
#[derive(Serialize, Deserialize)]
struct KindTagged<T> {
    kind: String,
    model: T,
}

/// Outcome of a cache read.
#[derive(Debug)]
pub enum CacheLookup<V> {
    Hit(V),
    Miss,
    /// The cache could not answer. Callers treat this like a miss.
    Failed(CacheError),
}

impl<V> CacheLookup<V> {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLookup::Hit(_))
    }

    /// Collapses a failed lookup into a miss.
    pub fn into_option(self) -> Option<V> {
        match self {
            CacheLookup::Hit(v) => Some(v),
            CacheLookup::Miss | CacheLookup::Failed(_) => None,
        }
    }
}

/// Typed access to entities in a `KeyByteValueStore`, stored as JSON.
pub struct Memcache<S>
where S: KeyByteValueStore
{
    store: S
}

impl <S> Memcache<S>
where S: KeyByteValueStore {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get<V>(&self, key: &CacheKey) -> CacheLookup<V>
    where V: DeserializeOwned
    {
        trace!("retrieving entry {key} from memcache");
        let raw = match self.store.get(key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CacheLookup::Miss,
            Err(e) => return CacheLookup::Failed(e),
        };

        match serde_json::from_slice::<V>(&raw) {
            Ok(v) => CacheLookup::Hit(v),
            Err(source) => {
                warn!("broken entry {key} found in memcache that cannot be deserialized, deleting...");
                // delete erroneous entry that we cannot deserialize
                if let Err(e) = self.store.delete(key.as_str()) {
                    warn!("[FAILED]Memcache delete:key={key}: {e}");
                }
                CacheLookup::Failed(CacheError::Serialization { key: key.to_string(), source })
            }
        }
    }

    pub fn put<V>(&self, key: &CacheKey, value: &V) -> Result<(), CacheError>
    where V: Serialize
    {
        let raw = serde_json::to_vec(value)
        .map_err(|source| CacheError::Serialization { key: key.to_string(), source })?;
        self.store.set(key.as_str(), raw)
    }

    /// Like `get`, but an entry written for another kind is a miss.
    pub fn get_model<M>(&self, key: &CacheKey) -> CacheLookup<M>
    where M: Model
    {
        match self.get::<KindTagged<M>>(key) {
            CacheLookup::Hit(tagged) if tagged.kind == M::kind() => CacheLookup::Hit(tagged.model),
            CacheLookup::Hit(tagged) => {
                trace!("entry {key} is of kind {}, not {}", tagged.kind, M::kind());
                CacheLookup::Miss
            },
            CacheLookup::Miss => CacheLookup::Miss,
            CacheLookup::Failed(e) => CacheLookup::Failed(e),
        }
    }

    pub fn put_model<M>(&self, key: &CacheKey, model: &M) -> Result<(), CacheError>
    where M: Model
    {
        self.put(key, &KindTagged { kind: M::kind().to_string(), model })
    }

    pub fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.store.delete(key.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cache_key::KeyFormat;
    use crate::key::Key;
    use crate::memory_store::MemoryStore;

    #[test]
    fn test_hit_and_miss() {
        let memcache = Memcache::new(MemoryStore::new());
        let key = CacheKey::build("v1", &Key::from("Person:1"), KeyFormat::Concatenated);

        assert!(matches!(memcache.get::<String>(&key), CacheLookup::Miss));
        memcache.put(&key, &"Ada".to_string()).unwrap();
        assert!(memcache.get::<String>(&key).is_hit());
        assert_eq!(memcache.get::<String>(&key).into_option(), Some("Ada".to_string()));

        memcache.delete(&key).unwrap();
        assert!(matches!(memcache.get::<String>(&key), CacheLookup::Miss));
    }

    #[test]
    fn test_broken_entry_is_dropped() {
        let store = MemoryStore::new();
        let memcache = Memcache::new(store.clone());
        let key = CacheKey::build("v1", &Key::from("Person:1"), KeyFormat::Concatenated);
        store.set(key.as_str(), b"not json".to_vec()).unwrap();

        let lookup = memcache.get::<String>(&key);
        assert!(matches!(lookup, CacheLookup::Failed(CacheError::Serialization { .. })));
        assert!(store.is_empty());
    }

    #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Note {
        key: Key,
    }

    impl Model for Note {
        fn kind() -> &'static str { "Note" }
        fn key(&self) -> &Key { &self.key }
    }

    #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Tag {
        key: Key,
    }

    impl Model for Tag {
        fn kind() -> &'static str { "Tag" }
        fn key(&self) -> &Key { &self.key }
    }

    #[test]
    fn test_model_of_other_kind_is_miss() {
        let store = MemoryStore::new();
        let memcache = Memcache::new(store.clone());
        let note = Note { key: Key::new("Note", 1) };
        let key = CacheKey::build("v1", &note.key, KeyFormat::Concatenated);

        memcache.put_model(&key, &note).unwrap();
        assert_eq!(memcache.get_model::<Note>(&key).into_option(), Some(note));
        assert!(matches!(memcache.get_model::<Tag>(&key), CacheLookup::Miss));
        // left in place for the kind that wrote it
        assert_eq!(store.len(), 1);
    }
}
