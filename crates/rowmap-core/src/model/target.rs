//! Output target capability trait

use crate::types::{Record, Value};

/// Anything the rule engine can populate.
///
/// Two styles exist. Map-like targets (`ScratchRecord`) store every output
/// path as one flat key. Attribute-style targets (`ModelInstance`, or caller
/// structs) expose top-level attributes, and the engine navigates dotted
/// paths into nested objects itself.
///
/// The error list and raw-input backref are optional capabilities; the
/// defaults opt out.
pub trait OutputTarget {
    /// True for map-like targets
    fn is_map_like(&self) -> bool;

    /// Read a top-level field (map-like: a key)
    fn get(&self, field: &str) -> Option<&Value>;

    /// Mutable access to a top-level field
    fn get_mut(&mut self, field: &str) -> Option<&mut Value>;

    /// Write a top-level field, replacing any previous value
    fn insert(&mut self, field: &str, value: Value);

    /// Per-record error list, if this target keeps one
    fn errors_mut(&mut self) -> Option<&mut Vec<String>> {
        None
    }

    /// Store a copy of the input record, if this target keeps one
    fn set_raw_input(&mut self, _record: &Record) {}

    /// Append to a list field, replacing the field with a new list when it
    /// is absent or not a list
    fn append_to_list(&mut self, field: &str, value: Value) {
        match self.get_mut(field) {
            Some(Value::Array(items)) => items.push(value),
            _ => self.insert(field, Value::Array(vec![value])),
        }
    }
}
