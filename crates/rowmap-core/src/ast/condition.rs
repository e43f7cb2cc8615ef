//! Conditions for conditional mappings

use crate::types::Value;
use serde::{Deserialize, Serialize};

/// A single comparison evaluated by a `conditional_mapping` rule
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Condition {
    /// Field to read (`field` is accepted as an alias)
    #[serde(default, alias = "field")]
    pub input_field: Option<String>,

    /// Comparison operator (defaults to `equals`)
    #[serde(default)]
    pub operator: ConditionOperator,

    /// Value to compare against
    #[serde(default)]
    pub value: Value,

    /// Where the field is read from
    #[serde(default)]
    pub source: ConditionSource,
}

/// Condition operators
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionOperator {
    /// Textual equality
    #[default]
    Equals,
    /// Textual inequality
    NotEquals,
    /// Value is present and not null
    Exists,
    /// Value is absent or null
    NotExists,
    /// Value is null or blank
    IsEmpty,
    /// Value is neither null nor blank
    IsNotEmpty,
    /// Operator name not recognised; always evaluates to false
    Unknown(String),
}

impl ConditionOperator {
    /// Operator name as written in rule files
    pub fn as_str(&self) -> &str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "not_equals",
            ConditionOperator::Exists => "exists",
            ConditionOperator::NotExists => "not_exists",
            ConditionOperator::IsEmpty => "is_empty",
            ConditionOperator::IsNotEmpty => "is_not_empty",
            ConditionOperator::Unknown(name) => name,
        }
    }
}

impl From<String> for ConditionOperator {
    fn from(name: String) -> Self {
        match name.as_str() {
            "equals" => ConditionOperator::Equals,
            "not_equals" => ConditionOperator::NotEquals,
            "exists" => ConditionOperator::Exists,
            "not_exists" => ConditionOperator::NotExists,
            "is_empty" => ConditionOperator::IsEmpty,
            "is_not_empty" => ConditionOperator::IsNotEmpty,
            _ => ConditionOperator::Unknown(name),
        }
    }
}

impl From<ConditionOperator> for String {
    fn from(op: ConditionOperator) -> Self {
        op.as_str().to_string()
    }
}

/// Where a condition reads its field from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionSource {
    /// The output target being built
    Output,
    /// The original input record
    #[default]
    #[serde(other)]
    Input,
}
