//! Rule AST definitions
//!
//! Rule files are JSON lists of objects keyed by `rule_type`. Each known kind
//! decodes into its own struct carrying only the fields that kind needs.
//! Decoding never fails for a whole list: an unrecognised kind becomes
//! `Rule::Unknown`, and a known kind with a malformed body becomes
//! `Rule::Invalid`, which reports its problem when applied to a record.

use super::condition::Condition;
use super::path::AttributePath;
use crate::types::Value;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Relationship type code used when a group rule does not name one
pub const DEFAULT_RELATIONSHIP_TYPE_CODE: &str = "COMP";

/// A single declarative transformation step
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    DirectMapping(DirectMapping),
    DefaultValue(DefaultValue),
    DataTypeConversion(DataTypeConversion),
    RoundNumber(RoundNumber),
    MapMissingValues(MapMissingValues),
    LookupValue(LookupValue),
    Concat(Concat),
    Split(Split),
    CreateNestedObject(CreateNestedObject),
    Calculate(Calculate),
    ConditionalMapping(ConditionalMapping),
    EntryRelationshipGroup(EntryRelationshipGroup),
    /// `comment` rules and rules without a `rule_type`
    Comment,
    /// A `rule_type` this engine does not know
    Unknown { kind: String },
    /// A known kind whose body could not be decoded
    Invalid {
        kind: String,
        output_field: Option<String>,
        message: String,
    },
}

/// Copy an input field to an output path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectMapping {
    #[serde(default)]
    pub input_field: Option<String>,
    #[serde(default)]
    pub output_field: Option<AttributePath>,
}

/// Write a literal, optionally only when a guard input field is blank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultValue {
    #[serde(default)]
    pub input_field: Option<String>,
    #[serde(default)]
    pub output_field: Option<AttributePath>,
    #[serde(default)]
    pub value: Value,
}

/// Convert an input field with one of the named conversions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTypeConversion {
    #[serde(default)]
    pub input_field: Option<String>,
    #[serde(default)]
    pub output_field: Option<AttributePath>,
    #[serde(default)]
    pub conversion_type: Option<ConversionType>,
}

/// Round a numeric input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundNumber {
    #[serde(default)]
    pub input_field: Option<String>,
    #[serde(default)]
    pub output_field: Option<AttributePath>,
    #[serde(default, deserialize_with = "lenient_digits")]
    pub digits: i32,
}

/// Accept `digits` as a JSON integer or as integer text such as `"1"`
fn lenient_digits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Digits {
        Int(i32),
        Text(String),
    }

    match Digits::deserialize(deserializer)? {
        Digits::Int(n) => Ok(n),
        Digits::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("digits must be an integer, got {:?}", text))
        }),
    }
}

/// Replace null, blank or listed "missing" markers with a literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMissingValues {
    #[serde(default)]
    pub input_field: Option<String>,
    #[serde(default)]
    pub output_field: Option<AttributePath>,
    #[serde(default)]
    pub missing_values: Vec<Value>,
    #[serde(default)]
    pub mapped_value: Value,
}

/// Resolve a key through a named lookup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupValue {
    #[serde(default)]
    pub input_field: Option<String>,
    #[serde(default)]
    pub lookup_table_name: Option<String>,
    #[serde(default)]
    pub output_field: Option<AttributePath>,
    #[serde(default)]
    pub output_mappings: Vec<OutputMapping>,
    #[serde(default)]
    pub default_on_miss: Value,
}

/// One fan-out entry of a lookup: copy `source_key_from_lookup` of the
/// lookup result to `target_property`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMapping {
    #[serde(default)]
    pub source_key_from_lookup: Option<String>,
    #[serde(default)]
    pub target_property: Option<AttributePath>,
}

/// Join several input fields with a delimiter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concat {
    #[serde(default)]
    pub input_fields: Vec<String>,
    #[serde(default)]
    pub delimiter: String,
    #[serde(default)]
    pub output_field: Option<AttributePath>,
}

/// Split one input field into an ordered list of output fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    #[serde(default)]
    pub input_field: Option<String>,
    #[serde(default)]
    pub delimiter: String,
    #[serde(default)]
    pub output_fields: Vec<AttributePath>,
}

/// Instantiate a schema class at an output path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNestedObject {
    #[serde(default)]
    pub output_field: Option<AttributePath>,
    #[serde(default)]
    pub class_name: Option<String>,
}

/// Invoke a registered calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculate {
    #[serde(default)]
    pub calculation_name: Option<String>,
    #[serde(default)]
    pub input_mapping: Vec<InputMapping>,
    #[serde(default)]
    pub output_field: Option<AttributePath>,
}

/// Binds one keyword argument of a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMapping {
    #[serde(default)]
    pub source_field: Option<String>,
    #[serde(default)]
    pub param_name: Option<String>,
    #[serde(default)]
    pub source_type: SourceType,
    #[serde(default)]
    pub data_type: Option<ParamType>,
    #[serde(default)]
    pub default_if_missing: Option<Value>,
}

/// Where a calculation argument is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    #[default]
    InputRecord,
    #[serde(other)]
    Output,
}

/// Coercion applied to a calculation argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Float,
    Integer,
    /// Passed through unchanged
    #[serde(other)]
    Other,
}

/// Branch on a condition
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConditionalMapping {
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub then_rules: Vec<Rule>,
    #[serde(default)]
    pub else_rules: Vec<Rule>,
}

/// Build a list of component sub-records under an anchor list attribute
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryRelationshipGroup {
    #[serde(default)]
    pub output_field_anchor: Option<String>,
    #[serde(
        default = "default_relationship_type_code",
        rename = "entry_relationship_typeCode"
    )]
    pub relationship_type_code: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// One component of a group: its own rule list
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

fn default_relationship_type_code() -> String {
    DEFAULT_RELATIONSHIP_TYPE_CODE.to_string()
}

/// Named data type conversions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConversionType {
    ToInteger,
    ToDateYyyymmdd,
    ToBoolean,
    Unknown(String),
}

impl ConversionType {
    /// Conversion name as written in rule files
    pub fn as_str(&self) -> &str {
        match self {
            ConversionType::ToInteger => "to_integer",
            ConversionType::ToDateYyyymmdd => "to_date_yyyymmdd",
            ConversionType::ToBoolean => "to_boolean",
            ConversionType::Unknown(name) => name,
        }
    }
}

impl From<String> for ConversionType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "to_integer" => ConversionType::ToInteger,
            "to_date_yyyymmdd" => ConversionType::ToDateYyyymmdd,
            "to_boolean" => ConversionType::ToBoolean,
            _ => ConversionType::Unknown(name),
        }
    }
}

impl From<ConversionType> for String {
    fn from(conversion: ConversionType) -> Self {
        conversion.as_str().to_string()
    }
}

impl Rule {
    /// Decode one rule object. Never fails; see the module docs.
    pub fn from_json(json: serde_json::Value) -> Rule {
        let Some(obj) = json.as_object() else {
            return Rule::Invalid {
                kind: "-".to_string(),
                output_field: None,
                message: format!("rule must be an object, got {}", json),
            };
        };

        let kind = match obj.get("rule_type") {
            None | Some(serde_json::Value::Null) => return Rule::Comment,
            Some(serde_json::Value::String(kind)) => kind.clone(),
            Some(other) => {
                return Rule::Invalid {
                    kind: other.to_string(),
                    output_field: output_label_of(obj),
                    message: "rule_type must be a string".to_string(),
                }
            }
        };

        match kind.as_str() {
            "comment" => Rule::Comment,
            "direct_mapping" => decode(json, &kind, Rule::DirectMapping),
            "default_value" => decode(json, &kind, Rule::DefaultValue),
            "data_type_conversion" => decode(json, &kind, Rule::DataTypeConversion),
            "round_number" => decode(json, &kind, Rule::RoundNumber),
            "map_missing_values" => decode(json, &kind, Rule::MapMissingValues),
            "lookup_value" => decode(json, &kind, Rule::LookupValue),
            "concat" => decode(json, &kind, Rule::Concat),
            "split" => decode(json, &kind, Rule::Split),
            "create_nested_object" => decode(json, &kind, Rule::CreateNestedObject),
            "calculate" => decode(json, &kind, Rule::Calculate),
            "conditional_mapping" => decode(json, &kind, Rule::ConditionalMapping),
            "entry_relationship_group" => decode(json, &kind, Rule::EntryRelationshipGroup),
            _ => Rule::Unknown { kind },
        }
    }

    /// Rule kind as written in rule files
    pub fn kind(&self) -> &str {
        match self {
            Rule::DirectMapping(_) => "direct_mapping",
            Rule::DefaultValue(_) => "default_value",
            Rule::DataTypeConversion(_) => "data_type_conversion",
            Rule::RoundNumber(_) => "round_number",
            Rule::MapMissingValues(_) => "map_missing_values",
            Rule::LookupValue(_) => "lookup_value",
            Rule::Concat(_) => "concat",
            Rule::Split(_) => "split",
            Rule::CreateNestedObject(_) => "create_nested_object",
            Rule::Calculate(_) => "calculate",
            Rule::ConditionalMapping(_) => "conditional_mapping",
            Rule::EntryRelationshipGroup(_) => "entry_relationship_group",
            Rule::Comment => "comment",
            Rule::Unknown { kind } | Rule::Invalid { kind, .. } => kind,
        }
    }

    /// The field a rule writes, for diagnostics: its output field, else the
    /// group anchor
    pub fn output_label(&self) -> Option<String> {
        let path = match self {
            Rule::DirectMapping(r) => r.output_field.as_ref(),
            Rule::DefaultValue(r) => r.output_field.as_ref(),
            Rule::DataTypeConversion(r) => r.output_field.as_ref(),
            Rule::RoundNumber(r) => r.output_field.as_ref(),
            Rule::MapMissingValues(r) => r.output_field.as_ref(),
            Rule::LookupValue(r) => r.output_field.as_ref(),
            Rule::Concat(r) => r.output_field.as_ref(),
            Rule::CreateNestedObject(r) => r.output_field.as_ref(),
            Rule::Calculate(r) => r.output_field.as_ref(),
            Rule::EntryRelationshipGroup(r) => return r.output_field_anchor.clone(),
            Rule::Invalid { output_field, .. } => return output_field.clone(),
            Rule::Split(_)
            | Rule::ConditionalMapping(_)
            | Rule::Comment
            | Rule::Unknown { .. } => None,
        };
        path.map(ToString::to_string)
    }
}

fn decode<T: DeserializeOwned>(json: serde_json::Value, kind: &str, wrap: fn(T) -> Rule) -> Rule {
    let label = json.as_object().and_then(output_label_of);
    match serde_json::from_value::<T>(json) {
        Ok(body) => wrap(body),
        Err(e) => Rule::Invalid {
            kind: kind.to_string(),
            output_field: label,
            message: format!("malformed {} rule: {}", kind, e),
        },
    }
}

fn output_label_of(obj: &serde_json::Map<String, serde_json::Value>) -> Option<String> {
    obj.get("output_field")
        .or_else(|| obj.get("output_field_anchor"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Rule::from_json)
    }
}
