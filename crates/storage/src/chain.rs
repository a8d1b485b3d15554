//! Append-only version chain for a single key

use popreg_core::VersionedValue;

/// All versions ever committed for one key, oldest first
///
/// Versions are only ever appended; nothing is removed or reordered, so a
/// position, once assigned, always refers to the same version.
#[derive(Debug, Clone, Default)]
pub struct VersionChain {
    versions: Vec<VersionedValue>,
}

impl VersionChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a version
    ///
    /// The caller guarantees versions arrive in commit order.
    pub fn push(&mut self, value: VersionedValue) {
        debug_assert!(
            self.versions
                .last()
                .map_or(true, |last| last.version < value.version),
            "version chain must be strictly increasing"
        );
        self.versions.push(value);
    }

    /// Current (latest) version
    pub fn latest(&self) -> Option<&VersionedValue> {
        self.versions.last()
    }

    /// Version at a 0-based position
    pub fn at(&self, position: usize) -> Option<&VersionedValue> {
        self.versions.get(position)
    }

    /// Number of versions
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether the chain holds no versions
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Iterate versions oldest first
    pub fn iter(&self) -> impl Iterator<Item = &VersionedValue> {
        self.versions.iter()
    }
}
