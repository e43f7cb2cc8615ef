//! Registered calculations
//!
//! `calculate` rules call a named function with keyword arguments bound from
//! the input record or the output target. Functions live in a
//! `CalculationRegistry` that the engine owns; callers add their own next
//! to the built-ins.

pub mod builtin;
pub mod dispatch;
pub mod registry;

use crate::coercion::to_float;
use crate::error::RuleApplicationError;
use indexmap::IndexMap;
use rowmap_core::Value;
use thiserror::Error;

pub use dispatch::apply_calculation;
pub use registry::CalculationRegistry;

/// Error returned by a calculation or while binding its arguments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// Required keyword argument not bound
    #[error("missing argument '{0}'")]
    MissingArgument(String),

    /// Argument bound but unusable
    #[error("invalid argument '{param}': {message}")]
    InvalidArgument { param: String, message: String },

    /// Argument coercion failed
    #[error(transparent)]
    Coercion(#[from] RuleApplicationError),

    /// Any other failure inside the calculation
    #[error("{0}")]
    Failed(String),
}

/// Keyword arguments passed to a calculation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationArgs {
    values: IndexMap<String, Value>,
}

impl CalculationArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an argument
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Builder-style bind
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Raw argument value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of bound arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Required numeric argument; `None` when bound to null or blank
    pub fn f64(&self, name: &str) -> Result<Option<f64>, CalculationError> {
        let value = self
            .get(name)
            .ok_or_else(|| CalculationError::MissingArgument(name.to_string()))?;
        to_float(value).map_err(|e| CalculationError::InvalidArgument {
            param: name.to_string(),
            message: e.to_string(),
        })
    }
}

/// A function callable from `calculate` rules
pub trait Calculation: Send + Sync {
    fn call(&self, args: &CalculationArgs) -> Result<Value, CalculationError>;
}

impl<F> Calculation for F
where
    F: Fn(&CalculationArgs) -> Result<Value, CalculationError> + Send + Sync,
{
    fn call(&self, args: &CalculationArgs) -> Result<Value, CalculationError> {
        self(args)
    }
}
