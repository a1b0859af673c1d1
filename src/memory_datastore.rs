use std::{sync::{Arc, RwLock}, collections::HashMap};

use log::trace;

use crate::error::StoreError;
use crate::key::Key;
use crate::model::Model;
use crate::store::Datastore;

/// A `Datastore` keeping entities as JSON documents in a HashMap.
///
/// Each record remembers the kind it was written with; reading it back as
/// another kind yields `None`, like a lookup by (kind, key) would.
#[derive(Default, Clone)]
pub struct MemoryDatastore {
    records: Arc<RwLock<HashMap<Key,(&'static str, serde_json::Value)>>>
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r|r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("memory datastore lock poisoned".to_string())
}

impl Datastore for MemoryDatastore {
    fn get_or_null<M>(&self, key: &Key) -> Result<Option<M>, StoreError>
    where M: Model
    {
        let records = self.records.read().map_err(poisoned)?;
        match records.get(key) {
            Some((kind, doc)) if *kind == M::kind() => {
                Ok(Some(serde_json::from_value(doc.clone())?))
            },
            Some((kind, _)) => {
                trace!("record {key} is of kind {kind}, not {}", M::kind());
                Ok(None)
            },
            None => Ok(None),
        }
    }

    fn put<M>(&self, model: &M) -> Result<(), StoreError>
    where M: Model
    {
        let doc = serde_json::to_value(model)?;
        self.records.write().map_err(poisoned)?
        .insert(model.key().clone(), (M::kind(), doc));
        Ok(())
    }

    fn delete(&self, key: &Key) -> Result<(), StoreError> {
        self.records.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        key: Key,
        text: String,
    }

    impl Model for Note {
        fn kind() -> &'static str { "Note" }
        fn key(&self) -> &Key { &self.key }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Tag {
        key: Key,
    }

    impl Model for Tag {
        fn kind() -> &'static str { "Tag" }
        fn key(&self) -> &Key { &self.key }
    }

    #[test]
    fn test_put_get_delete() {
        let store = MemoryDatastore::new();
        let note = Note { key: Key::new("Note", 1), text: "hello".into() };

        store.put(&note).unwrap();
        assert_eq!(store.get_or_null::<Note>(&note.key).unwrap(), Some(note.clone()));

        store.delete(&note.key).unwrap();
        assert_eq!(store.get_or_null::<Note>(&note.key).unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_kind_mismatch_is_absent() {
        let store = MemoryDatastore::new();
        let note = Note { key: Key::new("Note", 1), text: "hello".into() };
        store.put(&note).unwrap();

        assert_eq!(store.get_or_null::<Tag>(&note.key).unwrap(), None);
    }
}
