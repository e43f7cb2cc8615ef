//! Model objects and top-level model instances

use super::target::OutputTarget;
use crate::types::{Record, Value};
use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// An attribute-style object of a schema class
#[derive(Debug, Clone, PartialEq)]
pub struct ModelObject {
    class_name: String,
    fields: IndexMap<String, Value>,
}

impl ModelObject {
    /// Create an object with no fields set
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Class this object was created from
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Read an attribute
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Mutable access to an attribute
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Write an attribute
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// All attributes in declaration order
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    /// Mutable attribute map
    pub fn fields_mut(&mut self) -> &mut IndexMap<String, Value> {
        &mut self.fields
    }
}

impl Serialize for ModelObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// A top-level output document for one input record.
///
/// Besides its attributes it carries the per-record error list and a copy of
/// the input record for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    root: ModelObject,
    errors: Vec<String>,
    raw_input: Option<Record>,
}

impl ModelInstance {
    /// Wrap a root object
    pub fn new(root: ModelObject) -> Self {
        Self {
            root,
            errors: Vec::new(),
            raw_input: None,
        }
    }

    /// Class of the root object
    pub fn class_name(&self) -> &str {
        self.root.class_name()
    }

    /// Root object
    pub fn root(&self) -> &ModelObject {
        &self.root
    }

    /// Read a top-level attribute
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }

    /// Read a dotted path, `None` if any segment is missing
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.member(segment)?;
        }
        Some(current)
    }

    /// Errors recorded while rules were applied
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// True when at least one rule failed for this record
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Copy of the input record this instance was built from
    pub fn raw_input(&self) -> Option<&Record> {
        self.raw_input.as_ref()
    }

    /// Consume into the root object and the error list
    pub fn into_parts(self) -> (ModelObject, Vec<String>) {
        (self.root, self.errors)
    }
}

impl OutputTarget for ModelInstance {
    fn is_map_like(&self) -> bool {
        false
    }

    fn get(&self, field: &str) -> Option<&Value> {
        self.root.get(field)
    }

    fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.root.get_mut(field)
    }

    fn insert(&mut self, field: &str, value: Value) {
        self.root.set(field, value);
    }

    fn errors_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.errors)
    }

    fn set_raw_input(&mut self, record: &Record) {
        self.raw_input = Some(record.clone());
    }
}

impl Serialize for ModelInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ModelInstance", 3)?;
        state.serialize_field("class", self.root.class_name())?;
        state.serialize_field("data", &self.root)?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_instance() -> ModelInstance {
        let mut gender = ModelObject::new("CD_Element");
        gender.set("code", Value::from("1"));

        let mut root = ModelObject::new("Record");
        root.set("patient_gender", Value::Model(gender));
        root.set("note", Value::Null);
        ModelInstance::new(root)
    }

    #[test]
    fn test_lookup_dotted_path() {
        let instance = sample_instance();
        assert_eq!(instance.lookup("patient_gender.code"), Some(&Value::from("1")));
        assert_eq!(instance.lookup("patient_gender.display_name"), None);
        assert_eq!(instance.lookup("note.code"), None);
    }

    #[test]
    fn test_output_target_impl() {
        let mut instance = sample_instance();
        assert!(!instance.is_map_like());

        instance.insert("title", Value::from("Checkup"));
        assert_eq!(instance.field("title"), Some(&Value::from("Checkup")));

        instance.errors_mut().unwrap().push("boom".to_string());
        assert!(instance.has_errors());
    }

    #[test]
    fn test_serialize_instance() {
        let instance = sample_instance();
        let json = serde_json::to_value(&instance).unwrap();

        assert_eq!(json["class"], "Record");
        assert_eq!(json["data"]["patient_gender"]["code"], "1");
        assert!(json["data"]["note"].is_null());
        assert_eq!(json["errors"], serde_json::json!([]));
    }
}
