//! Self-describing, field-name-indexed records

use crate::codec::{decode_record, encode_record};
use crate::error::CompactResult;
use crate::value::FieldValue;
use std::collections::BTreeMap;

/// A record of named field values tagged with its type name (fingerprint).
///
/// Fields are kept sorted by name, so encoding is independent of write order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactRecord {
    type_name: String,
    fields: BTreeMap<String, FieldValue>,
}

impl CompactRecord {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.remove(field)
    }

    /// Fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        encode_record(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> CompactResult<Self> {
        decode_record(bytes)
    }
}
