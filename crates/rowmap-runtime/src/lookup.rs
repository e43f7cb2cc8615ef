//! Lookup resolution
//!
//! A lookup rule resolves a key through a named table and writes either the
//! whole result to `output_field`, or, when the result is an object and the
//! rule lists `output_mappings`, selected members of it to several target
//! properties ("fan-out").

use crate::error::{Result, RuleApplicationError};
use crate::path::{get_path, set_path};
use rowmap_core::ast::LookupValue;
use rowmap_core::{LookupTables, OutputTarget, Record, Value};
use tracing::{debug, warn};

/// Apply a `lookup_value` rule to `target`
pub fn resolve_lookup(
    rule: &LookupValue,
    record: &Record,
    target: &mut dyn OutputTarget,
    tables: &LookupTables,
) -> Result<()> {
    let Some(input_field) = rule.input_field.as_deref() else {
        warn!("Lookup rule missing input_field; skipped");
        return Ok(());
    };

    // Earlier rules may already have written a normalised key to the output
    let key = get_path(target, input_field)
        .filter(|v| !v.is_null())
        .or_else(|| record.get(input_field))
        .filter(|v| !v.is_null())
        .map(Value::to_text);

    let table_name = rule
        .lookup_table_name
        .as_deref()
        .ok_or(RuleApplicationError::MissingParameter {
            kind: "lookup_value",
            parameter: "lookup_table_name",
        })?;

    if tables.is_empty() {
        return Err(RuleApplicationError::LookupTablesMissing);
    }

    let has_fan_out = !rule.output_mappings.is_empty();
    let Some(table) = tables.get(table_name) else {
        warn!(
            table = table_name,
            available = ?tables.names(),
            "Lookup table not found"
        );
        if let (Some(output_field), false) = (&rule.output_field, has_fan_out) {
            set_path(target, output_field, rule.default_on_miss.clone());
        }
        return Ok(());
    };

    let result = match key.as_deref().and_then(|k| table.get(k)) {
        Some(found) => found.clone(),
        None => {
            debug!(table = table_name, key = ?key, "Lookup miss; using default_on_miss");
            rule.default_on_miss.clone()
        }
    };

    if has_fan_out && matches!(result, Value::Object(_) | Value::Model(_)) {
        fan_out(rule, &result, target);
    } else if let Some(output_field) = &rule.output_field {
        debug!(output_field = %output_field, value = ?result, "Lookup assigned");
        set_path(target, output_field, result);
    } else {
        warn!(
            input_field,
            "Lookup rule has neither output_field nor usable output_mappings; result not assigned"
        );
    }

    Ok(())
}

fn fan_out(rule: &LookupValue, result: &Value, target: &mut dyn OutputTarget) {
    if target.is_map_like() {
        warn!("output_mappings used with a map-like target; target properties are written as flat keys");
    }

    for mapping in &rule.output_mappings {
        match (mapping.source_key_from_lookup.as_deref(), &mapping.target_property) {
            (Some(source_key), Some(target_property)) => {
                let value = result.member(source_key).cloned().unwrap_or_default();
                set_path(target, target_property, value);
            }
            _ => warn!(mapping = ?mapping, "Invalid output mapping; skipped"),
        }
    }
}
