//! rowmap Runtime - Rule evaluation engine
//!
//! This crate interprets rule lists against input records:
//! - type coercion
//! - dotted attribute path resolution
//! - condition evaluation
//! - lookup resolution
//! - registered calculations
//! - the rule dispatcher and the batch driver

pub mod batch;
pub mod calculation;
pub mod coercion;
pub mod condition;
pub mod dispatcher;
pub mod error;
pub mod lookup;
pub mod path;

// Re-export main types
pub use batch::BatchDriver;
pub use calculation::{Calculation, CalculationArgs, CalculationError, CalculationRegistry};
pub use dispatcher::RuleDispatcher;
pub use error::{Result, RuleApplicationError};
