use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of an entity.
///
/// The string form is `<kind>:<id>`, e.g. `Person:123`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    pub fn new(kind: &str, id: impl Display) -> Self {
        Self(format!("{kind}:{id}"))
    }

    /// Takes a key in its string form as produced by `Display`.
    pub fn from_string(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The kind part, or the whole key if it has no `:` separator.
    pub fn kind(&self) -> &str {
        self.0.split_once(':').map(|(kind,_)|kind).unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

#[test]
fn test_key_parts() {
    let key = Key::new("Person", 123);
    assert_eq!(key.to_string(), "Person:123");
    assert_eq!(key.kind(), "Person");
    assert_eq!(key, Key::from("Person:123"));
    assert_eq!(Key::from("orphan").kind(), "orphan");
}
