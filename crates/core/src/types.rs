//! Storage key type
//!
//! Every stored entry is addressed by a `Key`: a space (logical table, e.g.
//! `"person"`) plus a name within that space. Spaces partition the sharded
//! store so unrelated entity kinds never share a shard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Space-qualified storage key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    /// Logical space the key belongs to
    pub space: String,
    /// Name of the entry within its space
    pub name: String,
}

impl Key {
    /// Create a key in the given space
    pub fn new(space: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            name: name.into(),
        }
    }

    /// Space this key belongs to
    pub fn space(&self) -> &str {
        &self.space
    }

    /// Name within the space
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.space, self.name)
    }
}
