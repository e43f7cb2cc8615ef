//! Builder pattern for TransformEngine

use crate::config::EngineConfig;
use crate::engine::TransformEngine;
use crate::error::{Result, SdkError};
use rowmap_core::{LookupTables, ModelSchema, Rule, OID_CATALOG_TABLE};
use rowmap_parser::{LookupParser, PathValidator, RuleParser, SchemaParser};
use rowmap_runtime::{Calculation, CalculationRegistry};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Builder for TransformEngine
///
/// # Example
///
/// ```rust,ignore
/// use rowmap_sdk::TransformEngineBuilder;
///
/// let engine = TransformEngineBuilder::new()
///     .add_rule_file("config/rules.json")
///     .add_lookup_file("config/lookups.json")
///     .with_schema_file("config/models.yaml")
///     .root_class("HealthCheckupRecord")
///     .build()?;
///
/// let instances = engine.transform(&records)?;
/// ```
pub struct TransformEngineBuilder {
    config: EngineConfig,
    rules: Vec<Rule>,
    tables: LookupTables,
    schema: Option<ModelSchema>,
    registry: CalculationRegistry,
}

impl TransformEngineBuilder {
    /// Create a new builder with the built-in calculations registered
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            rules: Vec::new(),
            tables: LookupTables::new(),
            schema: None,
            registry: CalculationRegistry::with_builtins(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    // ========== Rules ==========

    /// Add a rule file
    pub fn add_rule_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rule_files.push(path.into());
        self
    }

    /// Add rule content directly as a JSON list (alternative to file path)
    pub fn add_rule_content(mut self, content: impl Into<String>) -> Self {
        self.config.rule_contents.push(content.into());
        self
    }

    /// Add already parsed rules; they run before any file or content rules
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    // ========== Lookup Tables ==========

    /// Add a lookup tables file
    pub fn add_lookup_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.lookup_files.push(path.into());
        self
    }

    /// Add in-memory lookup tables; these win over tables loaded from files
    pub fn with_lookup_tables(mut self, tables: LookupTables) -> Self {
        self.tables.merge(tables);
        self
    }

    /// Set the OID catalog file, loaded as the `$oid_catalog$` table
    pub fn with_oid_catalog_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.oid_catalog_file = Some(path.into());
        self
    }

    // ========== Model Schema ==========

    /// Set the model schema
    pub fn with_schema(mut self, schema: ModelSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set the model schema file; ignored when a schema is set directly
    pub fn with_schema_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.schema_file = Some(path.into());
        self
    }

    /// Set the class instantiated for each record
    pub fn root_class(mut self, class: impl Into<String>) -> Self {
        self.config.root_class = Some(class.into());
        self
    }

    // ========== Calculations ==========

    /// Register a calculation, replacing any with the same name
    pub fn with_calculation(
        mut self,
        name: impl Into<String>,
        calculation: impl Calculation + 'static,
    ) -> Self {
        self.registry.register(name, calculation);
        self
    }

    /// Replace the whole calculation registry
    pub fn with_registry(mut self, registry: CalculationRegistry) -> Self {
        self.registry = registry;
        self
    }

    // ========== Engine Options ==========

    /// Fail the build when an output path can never resolve
    pub fn strict_paths(mut self, enable: bool) -> Self {
        self.config.strict_paths = enable;
        self
    }

    /// Spread batches over the rayon thread pool
    pub fn parallel(mut self, enable: bool) -> Self {
        self.config.parallel = enable;
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<TransformEngine> {
        let Self {
            config,
            mut rules,
            mut tables,
            schema,
            registry,
        } = self;

        for path in &config.rule_files {
            rules.extend(RuleParser::from_file(path)?);
        }
        for content in &config.rule_contents {
            rules.extend(RuleParser::parse_json(content)?);
        }

        for path in &config.lookup_files {
            tables.merge(LookupParser::from_file(path)?);
        }
        if let Some(path) = &config.oid_catalog_file {
            if !tables.contains(OID_CATALOG_TABLE) {
                match LookupParser::table_from_file(path) {
                    Ok(catalog) => tables.insert(OID_CATALOG_TABLE, catalog),
                    Err(e) => warn!("OID catalog not loaded from {}: {}", path.display(), e),
                }
            }
        }

        let schema = match (schema, &config.schema_file) {
            (Some(schema), _) => schema,
            (None, Some(path)) => SchemaParser::from_file(path)?,
            (None, None) => ModelSchema::new(),
        };

        let template = match &config.root_class {
            Some(root_class) => {
                check_paths(&schema, root_class, &rules, config.strict_paths)?;
                Some(schema.new_instance(root_class)?)
            }
            None => None,
        };

        info!(
            "Transform engine ready: {} rules, {} lookup tables, {} calculations",
            rules.len(),
            tables.len(),
            registry.names().len()
        );

        Ok(TransformEngine::new(
            rules,
            tables,
            schema,
            registry,
            template,
            config.parallel,
        ))
    }
}

impl Default for TransformEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Report output paths that cannot resolve; fatal in strict mode
fn check_paths(schema: &ModelSchema, root_class: &str, rules: &[Rule], strict: bool) -> Result<()> {
    let validator = PathValidator::new(schema, root_class)?;
    let diagnostics = validator.validate(rules);

    if diagnostics.is_empty() {
        debug!("All output paths resolve against {}", root_class);
        return Ok(());
    }
    for diagnostic in &diagnostics {
        warn!("Unresolvable output path: {}", diagnostic);
    }
    if strict {
        return Err(SdkError::UnresolvablePaths(diagnostics));
    }
    Ok(())
}
