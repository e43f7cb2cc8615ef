//! TransformEngine - main entry point for record transformation
//!
//! The engine owns everything loaded at build time behind `Arc`s, so it can
//! be cloned cheaply and shared across threads. Each call builds a
//! dispatcher borrowing that state; no per-record state outlives a call.

use crate::error::{Result, SdkError};
use rowmap_core::{LookupTables, ModelInstance, ModelSchema, OutputTarget, Record, Rule};
use rowmap_runtime::{BatchDriver, CalculationRegistry, RuleDispatcher};
use std::sync::Arc;
use tracing::debug;

/// Applies one rule list to batches of records
#[derive(Debug, Clone)]
pub struct TransformEngine {
    rules: Arc<Vec<Rule>>,
    tables: Arc<LookupTables>,
    schema: Arc<ModelSchema>,
    registry: Arc<CalculationRegistry>,
    /// Fresh root instance, cloned for every record
    template: Option<ModelInstance>,
    parallel: bool,
}

impl TransformEngine {
    pub(crate) fn new(
        rules: Vec<Rule>,
        tables: LookupTables,
        schema: ModelSchema,
        registry: CalculationRegistry,
        template: Option<ModelInstance>,
        parallel: bool,
    ) -> Self {
        Self {
            rules: Arc::new(rules),
            tables: Arc::new(tables),
            schema: Arc::new(schema),
            registry: Arc::new(registry),
            template,
            parallel,
        }
    }

    /// Transform records into instances of the root class, in input order
    pub fn transform(&self, records: &[Record]) -> Result<Vec<ModelInstance>> {
        let template = self.template.as_ref().ok_or(SdkError::NoRootClass)?;
        debug!("Transforming {} records", records.len());

        let driver = BatchDriver::new(self.dispatcher());
        let instances = if self.parallel {
            driver.apply_parallel(records, &self.rules, || template.clone())
        } else {
            driver.apply(records, &self.rules, || template.clone())
        };
        Ok(instances)
    }

    /// Transform a single record
    pub fn transform_one(&self, record: &Record) -> Result<ModelInstance> {
        let mut instance = self.template.clone().ok_or(SdkError::NoRootClass)?;
        BatchDriver::new(self.dispatcher()).apply_record(0, record, &self.rules, &mut instance);
        Ok(instance)
    }

    /// Transform records into caller-supplied targets
    ///
    /// `new_target` is called once per record; the target is returned in
    /// input order after every rule has been applied to it.
    pub fn transform_into<T, F>(&self, records: &[Record], new_target: F) -> Vec<T>
    where
        T: OutputTarget,
        F: FnMut() -> T,
    {
        BatchDriver::new(self.dispatcher()).apply(records, &self.rules, new_target)
    }

    fn dispatcher(&self) -> RuleDispatcher<'_> {
        RuleDispatcher::new(&self.tables, &self.registry).with_schema(&self.schema)
    }

    /// Loaded rules, in application order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn lookup_tables(&self) -> &LookupTables {
        &self.tables
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    pub fn calculations(&self) -> &CalculationRegistry {
        &self.registry
    }

    /// Name of the class built for each record, if configured
    pub fn root_class(&self) -> Option<&str> {
        self.template.as_ref().map(|t| t.class_name())
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}
