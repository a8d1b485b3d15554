//! PersonRecord and its stored encoding
//!
//! Records are stored as `Value::String` holding a JSON object with
//! PascalCase keys:
//!
//! ```json
//! {"PassportNumber":"1","Name":"Ildar","LastName":"Zinatulin","City":"Moscow",
//!  "ResidentialAddress":"Some street, house 1, apartment 10",
//!  "PhoneNumber":"+79999999999","FamilyStatus":"Not married"}
//! ```
//!
//! The same shape is used on the write and read paths. Unknown keys fail
//! decoding.

use popreg_core::{Key, StoreError, StoreResult, Value};
use serde::{Deserialize, Serialize};

/// A person's registry record, keyed by passport number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct PersonRecord {
    /// Unique key; immutable once created
    pub passport_number: String,
    /// Given name
    pub name: String,
    /// Family name
    pub last_name: String,
    /// City of residence
    pub city: String,
    /// Street address
    pub residential_address: String,
    /// Contact phone
    pub phone_number: String,
    /// Marital status, free text
    pub family_status: String,
}

impl PersonRecord {
    /// Build a record from its seven fields
    pub fn new(
        passport_number: impl Into<String>,
        name: impl Into<String>,
        last_name: impl Into<String>,
        city: impl Into<String>,
        residential_address: impl Into<String>,
        phone_number: impl Into<String>,
        family_status: impl Into<String>,
    ) -> Self {
        Self {
            passport_number: passport_number.into(),
            name: name.into(),
            last_name: last_name.into(),
            city: city.into(),
            residential_address: residential_address.into(),
            phone_number: phone_number.into(),
            family_status: family_status.into(),
        }
    }

    /// Same record with `passport_number` replaced
    pub fn with_passport_number(mut self, passport_number: impl Into<String>) -> Self {
        self.passport_number = passport_number.into();
        self
    }

    /// The six mutable fields, paired with their serialized names
    pub fn payload_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Name", &self.name),
            ("LastName", &self.last_name),
            ("City", &self.city),
            ("ResidentialAddress", &self.residential_address),
            ("PhoneNumber", &self.phone_number),
            ("FamilyStatus", &self.family_status),
        ]
    }

    /// Encode for storage
    pub fn to_value(&self) -> StoreResult<Value> {
        serde_json::to_string(self)
            .map(Value::String)
            .map_err(|e| StoreError::serialization(e.to_string()))
    }

    /// Decode a stored value read from `key`
    ///
    /// Anything other than a JSON string holding exactly the record's fields
    /// is `Corruption`. Pass `position` when decoding a history entry.
    pub fn from_value(key: &Key, position: Option<u64>, value: &Value) -> StoreResult<Self> {
        let corrupt = |message: String| match position {
            Some(p) => StoreError::corruption_at(key.clone(), p, message),
            None => StoreError::corruption(key.clone(), message),
        };

        let text = value
            .as_str()
            .ok_or_else(|| corrupt(format!("expected JSON text, found {}", value.type_name())))?;
        serde_json::from_str(text).map_err(|e| corrupt(e.to_string()))
    }
}

/// The two records written by the registry's init routine
pub fn seed_records() -> [PersonRecord; 2] {
    [
        PersonRecord::new(
            "1",
            "Ildar",
            "Zinatulin",
            "Moscow",
            "Some street, house 1, apartment 10",
            "+79999999999",
            "Not married",
        ),
        PersonRecord::new(
            "2",
            "Artem",
            "Barger",
            "Moscow",
            "Some street, house 1, apartment 11",
            "+79999999998",
            "No data",
        ),
    ]
}
