//! Stored value type
//!
//! The backend treats values as opaque. Absence is always represented by
//! `Option::None` at the API boundary; an empty string or empty byte vector
//! is a present value.

use serde::{Deserialize, Serialize};

/// Opaque stored payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// UTF-8 text payload
    String(String),
    /// Raw byte payload
    Bytes(Vec<u8>),
}

impl Value {
    /// Name of the variant, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
        }
    }

    /// Borrow the text payload, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Bytes(_) => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}
