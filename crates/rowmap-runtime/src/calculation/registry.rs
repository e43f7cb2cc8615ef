//! Calculation registry

use super::builtin;
use super::Calculation;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Named calculations available to `calculate` rules
#[derive(Clone, Default)]
pub struct CalculationRegistry {
    calculations: HashMap<String, Arc<dyn Calculation>>,
}

impl CalculationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in calculations (`bmi`)
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("bmi", builtin::bmi);
        registry
    }

    /// Register a calculation, replacing any previous one of the same name
    pub fn register(&mut self, name: impl Into<String>, calculation: impl Calculation + 'static) {
        let name = name.into();
        debug!(name = %name, "Registered calculation");
        self.calculations.insert(name, Arc::new(calculation));
    }

    /// Get a calculation by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Calculation>> {
        self.calculations.get(name)
    }

    /// Check if a calculation is registered
    pub fn contains(&self, name: &str) -> bool {
        self.calculations.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.calculations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for CalculationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculationRegistry")
            .field("calculations", &self.names())
            .finish()
    }
}
