//! Model schema definitions
//!
//! A schema declares the classes an output document is built from. Example
//! (YAML):
//!
//! ```yaml
//! classes:
//!   CD_Element:
//!     fields:
//!       code: { type: scalar }
//!       display_name: { type: scalar }
//!   PatientRecord:
//!     fields:
//!       language_code: { type: scalar, default: ja-JP }
//!       patient_gender: { type: nested, class: CD_Element, eager: true }
//!       observations: { type: list }
//! ```
//!
//! `eager` nested fields are created together with their owner, so rules
//! can address `patient_gender.code` without a `create_nested_object` rule.

use super::object::{ModelInstance, ModelObject};
use crate::error::{CoreError, Result};
use crate::types::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// All classes known to an engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    #[serde(default)]
    pub classes: IndexMap<String, ModelClass>,
}

/// One model class: ordered field declarations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelClass {
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,
}

/// Field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldSpec {
    /// Plain value with an optional literal default
    Scalar {
        #[serde(default)]
        default: Value,
    },
    /// Instance of another class
    Nested {
        class: String,
        #[serde(default)]
        eager: bool,
    },
    /// List of values, starts empty
    List,
}

impl ModelClass {
    /// Create an empty class
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar field starting as null
    pub fn scalar(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), FieldSpec::Scalar { default: Value::Null });
        self
    }

    /// Add a scalar field with a literal default
    pub fn scalar_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.fields.insert(
            name.into(),
            FieldSpec::Scalar {
                default: default.into(),
            },
        );
        self
    }

    /// Add a nested field that starts as null
    pub fn nested(mut self, name: impl Into<String>, class: impl Into<String>) -> Self {
        self.fields.insert(
            name.into(),
            FieldSpec::Nested {
                class: class.into(),
                eager: false,
            },
        );
        self
    }

    /// Add a nested field created together with its owner
    pub fn eager_nested(mut self, name: impl Into<String>, class: impl Into<String>) -> Self {
        self.fields.insert(
            name.into(),
            FieldSpec::Nested {
                class: class.into(),
                eager: true,
            },
        );
        self
    }

    /// Add a list field
    pub fn list(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), FieldSpec::List);
        self
    }

    /// Look up a field declaration
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }
}

impl ModelSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class
    pub fn with_class(mut self, name: impl Into<String>, class: ModelClass) -> Self {
        self.classes.insert(name.into(), class);
        self
    }

    /// Look up a class
    pub fn class(&self, name: &str) -> Option<&ModelClass> {
        self.classes.get(name)
    }

    /// Returns true if the class is declared
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Check that every nested field names a declared class and that eager
    /// nesting is not cyclic
    pub fn check(&self) -> Result<()> {
        for (class_name, class) in &self.classes {
            for (field_name, spec) in &class.fields {
                if let FieldSpec::Nested { class: target, .. } = spec {
                    if !self.has_class(target) {
                        return Err(CoreError::InvalidSchema(format!(
                            "field '{}.{}' refers to unknown class '{}'",
                            class_name, field_name, target
                        )));
                    }
                }
            }
            self.instantiate(class_name)?;
        }
        Ok(())
    }

    /// Build a fresh object of the named class with all defaults applied
    pub fn instantiate(&self, class_name: &str) -> Result<ModelObject> {
        let mut stack = Vec::new();
        self.instantiate_inner(class_name, &mut stack)
    }

    /// Build a fresh top-level model instance of the named class
    pub fn new_instance(&self, class_name: &str) -> Result<ModelInstance> {
        self.instantiate(class_name).map(ModelInstance::new)
    }

    fn instantiate_inner<'a>(
        &'a self,
        class_name: &'a str,
        stack: &mut Vec<&'a str>,
    ) -> Result<ModelObject> {
        let class = self
            .class(class_name)
            .ok_or_else(|| CoreError::UnknownClass(class_name.to_string()))?;

        if stack.contains(&class_name) {
            return Err(CoreError::InvalidSchema(format!(
                "eager nesting cycle through class '{}'",
                class_name
            )));
        }
        stack.push(class_name);

        let mut object = ModelObject::new(class_name);
        for (field_name, spec) in &class.fields {
            let initial = match spec {
                FieldSpec::Scalar { default } => default.clone(),
                FieldSpec::Nested { class, eager: true } => {
                    Value::Model(self.instantiate_inner(class, stack)?)
                }
                FieldSpec::Nested { eager: false, .. } => Value::Null,
                FieldSpec::List => Value::Array(Vec::new()),
            };
            object.set(field_name.clone(), initial);
        }

        stack.pop();
        Ok(object)
    }
}
