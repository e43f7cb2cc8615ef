//! Configuration types for TransformEngine

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rule file path(s), applied in order
    pub rule_files: Vec<PathBuf>,

    /// Rule documents given inline as JSON, applied after the files
    #[serde(skip)]
    pub rule_contents: Vec<String>,

    /// Lookup table file path(s); earlier files win on duplicate table names
    pub lookup_files: Vec<PathBuf>,

    /// Model schema file
    pub schema_file: Option<PathBuf>,

    /// Class instantiated for each input record
    pub root_class: Option<String>,

    /// Single-table file loaded as the `$oid_catalog$` lookup table
    pub oid_catalog_file: Option<PathBuf>,

    /// Fail engine construction when an output path cannot resolve
    pub strict_paths: bool,

    /// Spread records over the rayon thread pool
    pub parallel: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            rule_files: Vec::new(),
            rule_contents: Vec::new(),
            lookup_files: Vec::new(),
            schema_file: None,
            root_class: None,
            oid_catalog_file: None,
            strict_paths: false,
            parallel: false,
        }
    }

    /// Add a rule file
    pub fn with_rule_file(mut self, path: PathBuf) -> Self {
        self.rule_files.push(path);
        self
    }

    /// Add a lookup tables file
    pub fn with_lookup_file(mut self, path: PathBuf) -> Self {
        self.lookup_files.push(path);
        self
    }

    /// Set the schema file
    pub fn with_schema_file(mut self, path: PathBuf) -> Self {
        self.schema_file = Some(path);
        self
    }

    /// Set the root model class
    pub fn with_root_class(mut self, class: impl Into<String>) -> Self {
        self.root_class = Some(class.into());
        self
    }

    /// Set the OID catalog file
    pub fn with_oid_catalog_file(mut self, path: PathBuf) -> Self {
        self.oid_catalog_file = Some(path);
        self
    }

    /// Enable strict path checking
    pub fn strict_paths(mut self, enable: bool) -> Self {
        self.strict_paths = enable;
        self
    }

    /// Enable parallel batches
    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
