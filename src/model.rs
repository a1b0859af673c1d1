use serde::{de::DeserializeOwned, Serialize};

use crate::key::Key;

/// An application record persisted in a `Datastore`.
///
/// `kind()` ties a model type to its records at compile time, so a proxy
/// is bound to one model for its whole lifetime.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    fn kind() -> &'static str;
    fn key(&self) -> &Key;
}
