//! Database configuration
//!
//! Persisted as `popreg.toml` in the database directory. A missing file is
//! created with defaults on first open; unknown keys are rejected so typos
//! surface instead of silently falling back to defaults.
//!
//! ```toml
//! durability = "strict"      # strict | buffered | none
//! max_txn_retries = 8
//!
//! [limits]
//! max_key_bytes = 256
//! max_field_bytes = 4096
//! ```

use popreg_core::{StoreError, StoreResult};
use popreg_durability::DurabilityMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name inside the database directory
pub const CONFIG_FILE_NAME: &str = "popreg.toml";

/// Size limits enforced at the request surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum passport number length in bytes
    pub max_key_bytes: usize,
    /// Maximum length of any other record field in bytes
    pub max_field_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_key_bytes: 256,
            max_field_bytes: 4096,
        }
    }
}

/// Unified database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopregConfig {
    /// How commits are made durable (takes effect on next open)
    pub durability: DurabilityMode,
    /// Times a transaction is re-run after a commit conflict
    pub max_txn_retries: u32,
    /// Request size limits
    pub limits: Limits,
}

impl Default for PopregConfig {
    fn default() -> Self {
        Self {
            durability: DurabilityMode::Strict,
            max_txn_retries: 8,
            limits: Limits::default(),
        }
    }
}

impl PopregConfig {
    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> StoreResult<Self> {
        toml::from_str(text)
            .map_err(|e| StoreError::invalid_input(format!("{}: {}", CONFIG_FILE_NAME, e)))
    }

    /// Render as TOML text
    pub fn to_toml_string(&self) -> StoreResult<String> {
        toml::to_string_pretty(self).map_err(|e| StoreError::serialization(e.to_string()))
    }

    /// Load `popreg.toml` from a directory, writing defaults if absent
    pub fn load_or_create(dir: &Path) -> StoreResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.write_to(dir)?;
                Ok(config)
            }
            Err(e) => Err(StoreError::storage(format!("read {}", path.display()), e)),
        }
    }

    /// Write `popreg.toml` into a directory
    pub fn write_to(&self, dir: &Path) -> StoreResult<()> {
        let path = dir.join(CONFIG_FILE_NAME);
        let text = self.to_toml_string()?;
        std::fs::write(&path, text)
            .map_err(|e| StoreError::storage(format!("write {}", path.display()), e))
    }
}
