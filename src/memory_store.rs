use std::{sync::{Arc, RwLock}, collections::HashMap};

use crate::error::CacheError;
use crate::store::KeyByteValueStore;

/// A `KeyByteValueStore` implementation on a HashMap.
///
/// Clones share the same entries.
#[derive(Default, Clone)]
pub struct MemoryStore {
    store: Arc<RwLock<HashMap<String,Vec<u8>>>>
}
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.store.read().map(|s|s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> CacheError {
    CacheError::Unavailable("memory store lock poisoned".to_string())
}

impl KeyByteValueStore for MemoryStore
{
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.store.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        self.store.write().map_err(poisoned)?.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

#[test]
fn test_memory_store_shared_between_clones() {
    let store = MemoryStore::new();
    let other = store.clone();

    store.set("a", b"1".to_vec()).unwrap();
    assert_eq!(other.get("a").unwrap(), Some(b"1".to_vec()));
    assert_eq!(other.get("b").unwrap(), None);

    other.delete("a").unwrap();
    other.delete("a").unwrap();
    assert!(store.is_empty());
}
