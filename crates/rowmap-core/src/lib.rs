//! rowmap Core - Core types and definitions for the rowmap rule engine
//!
//! This crate provides the fundamental types shared by the rowmap crates:
//! - Value and record types for runtime data
//! - Rule AST (one variant per rule kind)
//! - Model schema, model instances and scratch records
//! - The `OutputTarget` capability trait
//! - Lookup tables
//! - Error types

pub mod ast;
pub mod error;
pub mod lookup;
pub mod model;
pub mod types;

// Re-export commonly used types
pub use ast::{AttributePath, Condition, ConditionOperator, ConversionType, Rule};
pub use error::CoreError;
pub use lookup::{LookupTable, LookupTables, OID_CATALOG_TABLE};
pub use model::{FieldSpec, ModelClass, ModelInstance, ModelObject, ModelSchema, OutputTarget, ScratchRecord};
pub use types::{record_from_pairs, Record, Value};
