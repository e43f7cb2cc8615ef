//! Common test utilities for runtime integration tests

#![allow(dead_code)]

use rowmap_core::{LookupTable, LookupTables, ModelClass, ModelInstance, ModelSchema, Record, Rule, Value};
use rowmap_runtime::{BatchDriver, CalculationRegistry, RuleDispatcher};

/// Test helper that runs inline JSON rules over records
pub struct TestHarness {
    rules: Vec<Rule>,
    tables: LookupTables,
    registry: CalculationRegistry,
    schema: ModelSchema,
    root_class: String,
}

impl TestHarness {
    /// Create a harness using the health checkup schema below
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tables: LookupTables::new(),
            registry: CalculationRegistry::with_builtins(),
            schema: checkup_schema(),
            root_class: "HealthCheckupRecord".to_string(),
        }
    }

    /// Load rules from a JSON list
    pub fn with_rules(mut self, rules_json: &str) -> Self {
        self.rules = serde_json::from_str(rules_json).expect("Failed to parse rules");
        self
    }

    /// Add a lookup table from a JSON object
    pub fn with_table(mut self, name: &str, table_json: &str) -> Self {
        let table: LookupTable = serde_json::from_str(table_json).expect("Failed to parse table");
        self.tables.insert(name, table);
        self
    }

    /// Mutable access to the calculation registry
    pub fn registry_mut(&mut self) -> &mut CalculationRegistry {
        &mut self.registry
    }

    /// Run the rules over `records`, one model instance per record
    pub fn run(&self, records: &[Record]) -> Vec<ModelInstance> {
        let dispatcher = RuleDispatcher::new(&self.tables, &self.registry).with_schema(&self.schema);
        BatchDriver::new(dispatcher).apply(records, &self.rules, || {
            self.schema
                .new_instance(&self.root_class)
                .expect("Failed to create instance")
        })
    }

    /// Run the rules over a single record
    pub fn run_one(&self, record: Record) -> ModelInstance {
        self.run(&[record]).remove(0)
    }

    /// Borrow the loaded rules
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Dispatcher over the harness state
    pub fn dispatcher(&self) -> RuleDispatcher<'_> {
        RuleDispatcher::new(&self.tables, &self.registry).with_schema(&self.schema)
    }
}

/// Model schema resembling a health checkup document
pub fn checkup_schema() -> ModelSchema {
    ModelSchema::new()
        .with_class(
            "HealthCheckupRecord",
            ModelClass::new()
                .scalar("patient_id")
                .scalar("birth_date")
                .scalar("bmi")
                .scalar("smoker")
                .scalar("comment")
                .eager_nested("administrative_gender", "CD_Element")
                .nested("weight", "ObservationDataItem")
                .list("anemia_panel_results"),
        )
        .with_class(
            "CD_Element",
            ModelClass::new()
                .scalar("code")
                .scalar("display_name")
                .scalar_with_default("code_system", "2.16.840.1.113883.5.1"),
        )
        .with_class(
            "ObservationDataItem",
            ModelClass::new().scalar("value").scalar("unit"),
        )
}

/// Helper to create an input record from key-value pairs
#[macro_export]
macro_rules! record {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = rowmap_core::Record::new();
        $(
            map.insert($key.to_string(), rowmap_core::Value::from($value));
        )*
        map
    }};
}

/// Assertion helpers for model instances
pub trait InstanceAssertions {
    fn assert_path(&self, path: &str, expected: Value);
    fn assert_no_errors(&self);
    fn assert_error_contains(&self, needle: &str);
}

impl InstanceAssertions for ModelInstance {
    fn assert_path(&self, path: &str, expected: Value) {
        assert_eq!(
            self.lookup(path),
            Some(&expected),
            "unexpected value at '{}'",
            path
        );
    }

    fn assert_no_errors(&self) {
        assert!(self.errors().is_empty(), "unexpected errors: {:?}", self.errors());
    }

    fn assert_error_contains(&self, needle: &str) {
        assert!(
            self.errors().iter().any(|e| e.contains(needle)),
            "no error containing '{}' in {:?}",
            needle,
            self.errors()
        );
    }
}
