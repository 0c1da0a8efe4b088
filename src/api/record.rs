use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::autofill::coerce::target_id;

/// Reserved field carrying the record's primary key.
pub const PK_FIELD: &str = "_pk";

/// Keys starting with this prefix describe the record, not a form field.
pub const METADATA_PREFIX: char = '_';

pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with(METADATA_PREFIX)
}

/// A record as served by the autofill endpoints: field name to scalar value,
/// in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Record { fields }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Primary key as a target identifier, if the record carries a usable one.
    pub fn pk(&self) -> Option<String> {
        self.fields.get(PK_FIELD).and_then(target_id)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Every entry, metadata included.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
