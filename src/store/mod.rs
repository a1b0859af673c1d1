use crate::error::{CacheError, StoreError};
use crate::key::Key;
use crate::model::Model;

/// Define an abstract key value store using `str` values as keys and `Vec<u8>` as
/// values. This is the shape of a memcache client.
///
/// The goal is to decouple cache implementations (e.g. a memcache cluster) from the
/// places where it's used (e.g. the datastore proxy).
pub trait KeyByteValueStore: Send + Sync {
    /// `Ok(None)` if there is no entry for `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError>;
    /// Deleting a missing entry is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// The backing document store, i.e. the system of record.
pub trait Datastore: Send + Sync {
    /// `Ok(None)` if no entity of kind `M::kind()` is stored under `key`.
    fn get_or_null<M>(&self, key: &Key) -> Result<Option<M>, StoreError>
    where M: Model;
    fn put<M>(&self, model: &M) -> Result<(), StoreError>
    where M: Model;
    /// Deleting a missing entity is not an error.
    fn delete(&self, key: &Key) -> Result<(), StoreError>;
}
