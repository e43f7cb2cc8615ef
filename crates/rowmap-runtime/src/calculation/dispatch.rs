//! `calculate` rule dispatch

use super::{CalculationArgs, CalculationError, CalculationRegistry};
use crate::coercion::{to_float, to_integer};
use crate::path::{get_path, set_path};
use rowmap_core::ast::{Calculate, InputMapping, ParamType, SourceType};
use rowmap_core::{OutputTarget, Record};
use tracing::{debug, error, warn};

/// Apply a `calculate` rule.
///
/// Never fails: binding or call errors are logged and recorded on the target
/// as `Calculation error for <name>: <message>`, and the output field is
/// left unset.
pub fn apply_calculation(
    rule: &Calculate,
    record: &Record,
    target: &mut dyn OutputTarget,
    registry: &CalculationRegistry,
) {
    let (Some(name), Some(output_field)) = (rule.calculation_name.as_deref(), &rule.output_field) else {
        warn!("Calculate rule missing calculation_name or output_field; skipped");
        return;
    };

    let Some(calculation) = registry.get(name) else {
        error!(calculation = name, available = ?registry.names(), "Calculation not registered");
        return;
    };

    let outcome = bind_arguments(&rule.input_mapping, record, &*target).and_then(|args| {
        debug!(calculation = name, args = ?args, "Calling calculation");
        calculation.call(&args)
    });

    match outcome {
        Ok(value) => {
            debug!(calculation = name, output_field = %output_field, value = ?value, "Calculated");
            set_path(target, output_field, value);
        }
        Err(e) => {
            error!(calculation = name, error = %e, "Calculation failed");
            if let Some(errors) = target.errors_mut() {
                errors.push(format!("Calculation error for {}: {}", name, e));
            }
        }
    }
}

fn bind_arguments(
    mappings: &[InputMapping],
    record: &Record,
    target: &dyn OutputTarget,
) -> Result<CalculationArgs, CalculationError> {
    let mut args = CalculationArgs::new();

    for mapping in mappings {
        let (Some(source_field), Some(param_name)) =
            (mapping.source_field.as_deref(), mapping.param_name.as_deref())
        else {
            warn!(mapping = ?mapping, "Invalid input_mapping entry; parameter skipped");
            continue;
        };

        let raw = match mapping.source_type {
            SourceType::InputRecord => record.get(source_field),
            SourceType::Output => get_path(target, source_field),
        }
        .cloned()
        .unwrap_or_default();

        let raw = match &mapping.default_if_missing {
            Some(default) if raw.is_null() => default.clone(),
            _ => raw,
        };

        let value = match mapping.data_type {
            Some(ParamType::Float) => to_float(&raw)?.into(),
            Some(ParamType::Integer) => to_integer(&raw)?.into(),
            Some(ParamType::Other) | None => raw,
        };

        args.insert(param_name, value);
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_core::{record_from_pairs, ModelClass, ModelInstance, ModelSchema, ScratchRecord, Value};
    use serde_json::json;

    fn bmi_rule() -> Calculate {
        serde_json::from_value(json!({
            "calculation_name": "bmi",
            "output_field": "bmi",
            "input_mapping": [
                {"source_field": "weight", "param_name": "weight_kg", "data_type": "float"},
                {"source_field": "height", "param_name": "height_m", "data_type": "float"}
            ]
        }))
        .unwrap()
    }

    fn instance() -> ModelInstance {
        ModelSchema::new()
            .with_class("Checkup", ModelClass::new().scalar("bmi").scalar("height"))
            .new_instance("Checkup")
            .unwrap()
    }

    #[test]
    fn test_bmi_from_strings() {
        let mut out = instance();
        let rec = record_from_pairs([("weight", "70"), ("height", "1.75")]);

        apply_calculation(&bmi_rule(), &rec, &mut out, &CalculationRegistry::with_builtins());
        assert_eq!(out.field("bmi"), Some(&Value::Float(22.86)));
        assert!(out.errors().is_empty());
    }

    #[test]
    fn test_unparseable_argument_is_recorded() {
        let mut out = instance();
        let rec = record_from_pairs([("weight", "seventy"), ("height", "1.75")]);

        apply_calculation(&bmi_rule(), &rec, &mut out, &CalculationRegistry::with_builtins());
        assert_eq!(out.field("bmi"), Some(&Value::Null));
        assert_eq!(out.errors().len(), 1);
        assert!(out.errors()[0].starts_with("Calculation error for bmi: "));
        assert!(out.errors()[0].contains("seventy"));
    }

    #[test]
    fn test_default_if_missing_and_output_source() {
        let mut out = instance();
        out.insert("height", Value::from("2"));
        let rule: Calculate = serde_json::from_value(json!({
            "calculation_name": "bmi",
            "output_field": "bmi",
            "input_mapping": [
                {"source_field": "weight", "param_name": "weight_kg", "data_type": "float", "default_if_missing": "80"},
                {"source_field": "height", "param_name": "height_m", "source_type": "output", "data_type": "float"},
                {"param_name": "ignored"}
            ]
        }))
        .unwrap();

        apply_calculation(&rule, &record_from_pairs([("other", "x")]), &mut out, &CalculationRegistry::with_builtins());
        assert_eq!(out.field("bmi"), Some(&Value::Float(20.0)));
    }

    #[test]
    fn test_unknown_calculation_is_noop() {
        let mut out = ScratchRecord::new();
        let rule: Calculate = serde_json::from_value(json!({
            "calculation_name": "egfr",
            "output_field": "egfr"
        }))
        .unwrap();

        apply_calculation(&rule, &Record::new(), &mut out, &CalculationRegistry::with_builtins());
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_argument_on_map_target_leaves_it_unset() {
        let mut out = ScratchRecord::new();
        let rule: Calculate = serde_json::from_value(json!({
            "calculation_name": "bmi",
            "output_field": "bmi",
            "input_mapping": []
        }))
        .unwrap();

        apply_calculation(&rule, &Record::new(), &mut out, &CalculationRegistry::with_builtins());
        assert!(out.get("bmi").is_none());
    }
}
