use std::marker::PhantomData;

use log::{debug, trace, warn};

use crate::cache_key::{CacheKey, KeyFormat};
use crate::error::StoreError;
use crate::key::Key;
use crate::memcache::{CacheLookup, Memcache};
use crate::model::Model;
use crate::settings::ProxySettings;
use crate::store::{Datastore, KeyByteValueStore};

/// Datastore access for one model type, with memcache in front of reads.
///
/// Writes and deletes invalidate the cached entry, reads fill it. Cache
/// failures are logged and otherwise ignored; datastore failures are
/// returned to the caller.
pub struct ProxyDatastoreService<M, D, S>
where
    M: Model,
    D: Datastore,
    S: KeyByteValueStore,
{
    datastore: D,
    memcache: Memcache<S>,
    settings: ProxySettings,
    _model: PhantomData<fn() -> M>,
}

impl<M, D, S> ProxyDatastoreService<M, D, S>
where
    M: Model,
    D: Datastore,
    S: KeyByteValueStore,
{
    pub fn new(datastore: D, cache: S, settings: ProxySettings) -> Self {
        Self {
            datastore,
            memcache: Memcache::new(cache),
            settings,
            _model: PhantomData,
        }
    }

    pub fn version_id(&self) -> &str {
        &self.settings.version_id
    }

    pub fn key_format(&self) -> KeyFormat {
        self.settings.key_format
    }

    pub fn datastore(&self) -> &D {
        &self.datastore
    }

    pub fn cache(&self) -> &S {
        self.memcache.store()
    }

    pub fn create_memcache_key(&self, key: &Key) -> CacheKey {
        CacheKey::build(&self.settings.version_id, key, self.settings.key_format)
    }

    /// Invalidates the cached entry, then writes `model` to the datastore.
    pub fn put(&self, model: &M) -> Result<(), StoreError> {
        let memcache_key = self.create_memcache_key(model.key());
        self.delete_in_memcache(&memcache_key);

        self.datastore.put(model)
    }

    /// Gets the model from memcache, or from the datastore on a miss.
    ///
    /// A model read from the datastore is put into memcache before it is returned.
    pub fn get(&self, key: &Key) -> Result<Option<M>, StoreError> {
        let memcache_key = self.create_memcache_key(key);
        if let Some(model) = self.get_from_memcache(&memcache_key) {
            trace!("get from Memcache: key={key}");
            return Ok(Some(model));
        }

        let Some(model) = self.get_or_null_from_datastore(key)? else {
            return Ok(None);
        };

        self.put_to_memcache(&memcache_key, &model);

        trace!("get from Datastore: key={key}");
        Ok(Some(model))
    }

    /// Deletes the model from the datastore and from memcache.
    ///
    /// The memcache entry is invalidated even if the datastore delete fails.
    pub fn delete(&self, key: &Key) -> Result<(), StoreError> {
        let result = self.datastore.delete(key);
        self.delete_in_memcache(&self.create_memcache_key(key));
        result
    }

    /// Reads straight from the datastore, bypassing memcache.
    pub fn get_or_null_from_datastore(&self, key: &Key) -> Result<Option<M>, StoreError> {
        self.datastore.get_or_null::<M>(key)
    }

    fn get_from_memcache(&self, memcache_key: &CacheKey) -> Option<M> {
        match self.memcache.get_model::<M>(memcache_key) {
            CacheLookup::Failed(e) => {
                warn!("[FAILED]Memcache get:key={memcache_key}: {e}");
                None
            },
            lookup => lookup.into_option(),
        }
    }

    fn put_to_memcache(&self, memcache_key: &CacheKey, model: &M) {
        if let Err(e) = self.memcache.put_model(memcache_key, model) {
            warn!("[FAILED]Memcache put:key={memcache_key}: {e}");
        }
    }

    fn delete_in_memcache(&self, memcache_key: &CacheKey) {
        match self.memcache.delete(memcache_key) {
            Ok(()) => debug!("invalidated Memcache: key={memcache_key}"),
            Err(e) => warn!("[FAILED]Memcache delete:key={memcache_key}: {e}"),
        }
    }
}
