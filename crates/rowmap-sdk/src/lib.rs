//! rowmap SDK
//!
//! High-level API for building a transform engine from rule, lookup and
//! schema documents and running it over batches of records.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;

// Re-export main types
pub use builder::TransformEngineBuilder;
pub use config::EngineConfig;
pub use engine::TransformEngine;
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use rowmap_core::{
    LookupTables, ModelClass, ModelInstance, ModelObject, ModelSchema, OutputTarget, Record, Rule, ScratchRecord, Value,
};
pub use rowmap_parser::PathDiagnostic;
pub use rowmap_runtime::{Calculation, CalculationArgs, CalculationError, CalculationRegistry};
