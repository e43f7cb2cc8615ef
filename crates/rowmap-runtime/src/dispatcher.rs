//! Rule dispatcher
//!
//! Applies one rule to one input record and one output target. Nested rule
//! lists (conditional branches, group components) are applied recursively
//! through the same dispatcher.

use crate::calculation::{apply_calculation, CalculationRegistry};
use crate::coercion;
use crate::condition::evaluate_condition;
use crate::error::{Result, RuleApplicationError};
use crate::lookup::resolve_lookup;
use crate::path::set_path;
use indexmap::IndexMap;
use rowmap_core::ast::{
    Concat, ConditionalMapping, CreateNestedObject, DataTypeConversion, DefaultValue,
    DirectMapping, EntryRelationshipGroup, MapMissingValues, RoundNumber, Split,
};
use rowmap_core::{AttributePath, LookupTables, ModelSchema, OutputTarget, Record, Rule, ScratchRecord, Value};
use tracing::{debug, error, warn};

/// Applies rules against shared, read-only lookup tables, calculations and
/// model schema
#[derive(Debug, Clone, Copy)]
pub struct RuleDispatcher<'a> {
    tables: &'a LookupTables,
    registry: &'a CalculationRegistry,
    schema: Option<&'a ModelSchema>,
}

impl<'a> RuleDispatcher<'a> {
    /// Create a dispatcher without a model schema
    pub fn new(tables: &'a LookupTables, registry: &'a CalculationRegistry) -> Self {
        Self {
            tables,
            registry,
            schema: None,
        }
    }

    /// Use `schema` for `create_nested_object` rules
    pub fn with_schema(mut self, schema: &'a ModelSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Apply a single rule.
    ///
    /// Structural problems (missing fields, unknown kinds, unresolvable
    /// paths) are logged and skipped. Conversion failures and malformed
    /// rules are returned as errors.
    pub fn apply(&self, rule: &Rule, record: &Record, target: &mut dyn OutputTarget) -> Result<()> {
        debug!(rule_type = rule.kind(), output_field = ?rule.output_label(), "Applying rule");

        match rule {
            Rule::DirectMapping(r) => self.direct_mapping(r, record, target),
            Rule::DefaultValue(r) => self.default_value(r, record, target),
            Rule::DataTypeConversion(r) => self.data_type_conversion(r, record, target),
            Rule::RoundNumber(r) => self.round_number(r, record, target),
            Rule::MapMissingValues(r) => self.map_missing_values(r, record, target),
            Rule::LookupValue(r) => {
                if r.output_mappings.is_empty() && require_output(rule, &r.output_field).is_none() {
                    return Ok(());
                }
                resolve_lookup(r, record, target, self.tables)
            }
            Rule::Concat(r) => self.concat(r, record, target),
            Rule::Split(r) => self.split(r, record, target),
            Rule::CreateNestedObject(r) => self.create_nested_object(r, target),
            Rule::Calculate(r) => {
                apply_calculation(r, record, target, self.registry);
                Ok(())
            }
            Rule::ConditionalMapping(r) => self.conditional_mapping(r, record, target),
            Rule::EntryRelationshipGroup(r) => self.entry_relationship_group(r, record, target),
            Rule::Comment => Ok(()),
            Rule::Unknown { kind } => {
                warn!(rule_type = %kind, "Unknown rule_type; rule skipped");
                Ok(())
            }
            Rule::Invalid { message, .. } => Err(RuleApplicationError::InvalidRule(message.clone())),
        }
    }

    /// Apply rules in order, stopping at the first error
    pub fn apply_all(&self, rules: &[Rule], record: &Record, target: &mut dyn OutputTarget) -> Result<()> {
        for rule in rules {
            self.apply(rule, record, target)?;
        }
        Ok(())
    }

    fn direct_mapping(&self, r: &DirectMapping, record: &Record, target: &mut dyn OutputTarget) -> Result<()> {
        let Some(output_field) = require_output_of("direct_mapping", &r.output_field) else {
            return Ok(());
        };
        let Some(input_field) = r.input_field.as_deref() else {
            warn!(output_field = %output_field, "Direct mapping missing input_field; skipped");
            return Ok(());
        };

        if let Some(value) = record.get(input_field) {
            set_path(target, output_field, value.clone());
        }
        Ok(())
    }

    fn default_value(&self, r: &DefaultValue, record: &Record, target: &mut dyn OutputTarget) -> Result<()> {
        let Some(output_field) = require_output_of("default_value", &r.output_field) else {
            return Ok(());
        };

        // With a guard field the default only fills a blank input
        let apply = match r.input_field.as_deref() {
            Some(guard) => record.get(guard).map_or(true, Value::is_blank),
            None => true,
        };
        if apply {
            set_path(target, output_field, r.value.clone());
        }
        debug!(output_field = %output_field, applied = apply, "Default value");
        Ok(())
    }

    fn data_type_conversion(
        &self,
        r: &DataTypeConversion,
        record: &Record,
        target: &mut dyn OutputTarget,
    ) -> Result<()> {
        let Some(output_field) = require_output_of("data_type_conversion", &r.output_field) else {
            return Ok(());
        };
        let conversion = r
            .conversion_type
            .as_ref()
            .ok_or(RuleApplicationError::MissingParameter {
                kind: "data_type_conversion",
                parameter: "conversion_type",
            })?;

        let converted = coercion::convert(conversion, input_value(record, r.input_field.as_deref()))?;
        set_path(target, output_field, converted);
        Ok(())
    }

    fn round_number(&self, r: &RoundNumber, record: &Record, target: &mut dyn OutputTarget) -> Result<()> {
        let Some(output_field) = require_output_of("round_number", &r.output_field) else {
            return Ok(());
        };

        let rounded = coercion::round_number(input_value(record, r.input_field.as_deref()), r.digits)?;
        set_path(target, output_field, rounded.into());
        Ok(())
    }

    fn map_missing_values(
        &self,
        r: &MapMissingValues,
        record: &Record,
        target: &mut dyn OutputTarget,
    ) -> Result<()> {
        let Some(output_field) = require_output_of("map_missing_values", &r.output_field) else {
            return Ok(());
        };

        let value = input_value(record, r.input_field.as_deref());
        let text = value.to_text();
        let is_missing = value.is_blank() || r.missing_values.iter().any(|m| m.to_text() == text);

        let result = if is_missing {
            r.mapped_value.clone()
        } else {
            value.clone()
        };
        set_path(target, output_field, result);
        Ok(())
    }

    fn concat(&self, r: &Concat, record: &Record, target: &mut dyn OutputTarget) -> Result<()> {
        let Some(output_field) = require_output_of("concat", &r.output_field) else {
            return Ok(());
        };

        let joined = r
            .input_fields
            .iter()
            .map(|field| input_value(record, Some(field)).to_text())
            .collect::<Vec<_>>()
            .join(&r.delimiter);
        set_path(target, output_field, Value::String(joined));
        Ok(())
    }

    fn split(&self, r: &Split, record: &Record, target: &mut dyn OutputTarget) -> Result<()> {
        let Some(input_field) = r.input_field.as_deref() else {
            warn!("Split rule missing input_field; skipped");
            return Ok(());
        };

        if r.delimiter.is_empty() {
            return Err(RuleApplicationError::MissingParameter {
                kind: "split",
                parameter: "delimiter",
            });
        }

        let text = input_value(record, Some(input_field)).to_text();
        let parts: Vec<&str> = text.split(r.delimiter.as_str()).collect();

        for (idx, field) in r.output_fields.iter().enumerate() {
            let value = parts.get(idx).map_or(Value::Null, |part| Value::from(*part));
            set_path(target, field, value);
        }
        Ok(())
    }

    fn create_nested_object(&self, r: &CreateNestedObject, target: &mut dyn OutputTarget) -> Result<()> {
        let Some(output_field) = require_output_of("create_nested_object", &r.output_field) else {
            return Ok(());
        };
        let Some(class_name) = r.class_name.as_deref() else {
            warn!(output_field = %output_field, "create_nested_object rule missing class_name; skipped");
            return Ok(());
        };
        let Some(schema) = self.schema else {
            error!(class = class_name, "No model schema configured; cannot create nested object");
            return Ok(());
        };

        match schema.instantiate(class_name) {
            Ok(object) => {
                set_path(target, output_field, Value::Model(object));
            }
            Err(e) => error!(class = class_name, error = %e, "Failed to create nested object"),
        }
        Ok(())
    }

    fn conditional_mapping(
        &self,
        r: &ConditionalMapping,
        record: &Record,
        target: &mut dyn OutputTarget,
    ) -> Result<()> {
        let branch = if evaluate_condition(&r.condition, record, &*target) {
            &r.then_rules
        } else {
            &r.else_rules
        };
        self.apply_all(branch, record, target)
    }

    fn entry_relationship_group(
        &self,
        r: &EntryRelationshipGroup,
        record: &Record,
        target: &mut dyn OutputTarget,
    ) -> Result<()> {
        let anchor = r
            .output_field_anchor
            .as_deref()
            .ok_or(RuleApplicationError::MissingParameter {
                kind: "entry_relationship_group",
                parameter: "output_field_anchor",
            })?;
        if target.is_map_like() {
            return Err(RuleApplicationError::MapLikeTarget(anchor.to_string()));
        }

        let mut components = Vec::with_capacity(r.components.len());
        for component in r.components.iter().filter(|c| !c.rules.is_empty()) {
            let mut scratch = ScratchRecord::new();
            self.apply_all(&component.rules, record, &mut scratch)?;
            components.push(Value::from(scratch));
        }
        debug!(anchor, components = components.len(), "Built relationship group");

        let mut entry = IndexMap::new();
        entry.insert(
            "entry_relationship_typeCode".to_string(),
            Value::from(r.relationship_type_code.as_str()),
        );
        entry.insert("components".to_string(), Value::Array(components));
        target.append_to_list(anchor, Value::Object(entry));
        Ok(())
    }
}

static NULL: Value = Value::Null;

/// Input field value; absent fields read as null
fn input_value<'r>(record: &'r Record, field: Option<&str>) -> &'r Value {
    field.and_then(|f| record.get(f)).unwrap_or(&NULL)
}

fn require_output<'p>(rule: &Rule, output_field: &'p Option<AttributePath>) -> Option<&'p AttributePath> {
    require_output_of(rule.kind(), output_field)
}

fn require_output_of<'p>(kind: &str, output_field: &'p Option<AttributePath>) -> Option<&'p AttributePath> {
    if output_field.is_none() {
        warn!(rule_type = kind, "Rule missing output_field; skipped");
    }
    output_field.as_ref()
}
