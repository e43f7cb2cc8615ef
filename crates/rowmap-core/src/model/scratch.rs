//! Map-like scratch records

use super::target::OutputTarget;
use crate::types::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// Temporary map-like target used for the components of a relationship
/// group. Keys are taken verbatim, dotted or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScratchRecord {
    entries: IndexMap<String, Value>,
}

impl ScratchRecord {
    /// Create an empty scratch record
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been written
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in write order
    pub fn entries(&self) -> &IndexMap<String, Value> {
        &self.entries
    }
}

impl From<ScratchRecord> for Value {
    fn from(record: ScratchRecord) -> Self {
        Value::Object(record.entries)
    }
}

impl OutputTarget for ScratchRecord {
    fn is_map_like(&self) -> bool {
        true
    }

    fn get(&self, field: &str) -> Option<&Value> {
        self.entries.get(field)
    }

    fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.entries.get_mut(field)
    }

    fn insert(&mut self, field: &str, value: Value) {
        self.entries.insert(field.to_string(), value);
    }
}
