//! Abstract Syntax Tree (AST) definitions for rowmap rules
//!
//! This module contains:
//! - Rule definitions (one variant per rule kind)
//! - Conditions used by conditional mappings
//! - Dotted attribute paths

pub mod condition;
pub mod path;
pub mod rule;

pub use condition::{Condition, ConditionOperator, ConditionSource};
pub use path::AttributePath;
pub use rule::{
    Calculate, Component, ConditionalMapping, Concat, ConversionType, CreateNestedObject,
    DataTypeConversion, DefaultValue, DirectMapping, EntryRelationshipGroup, InputMapping,
    LookupValue, MapMissingValues, OutputMapping, ParamType, RoundNumber, Rule, SourceType, Split,
    DEFAULT_RELATIONSHIP_TYPE_CODE,
};
