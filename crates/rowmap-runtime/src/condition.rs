//! Condition evaluation for conditional mappings

use crate::path::get_path;
use rowmap_core::ast::{Condition, ConditionOperator, ConditionSource};
use rowmap_core::{OutputTarget, Record, Value};
use tracing::warn;

/// Evaluate a condition against the input record or the output built so far.
///
/// Never fails: a condition without a field reads nothing, and an unknown
/// operator evaluates to `false`.
pub fn evaluate_condition(condition: &Condition, record: &Record, target: &dyn OutputTarget) -> bool {
    let actual = condition.input_field.as_deref().and_then(|field| match condition.source {
        ConditionSource::Input => record.get(field),
        ConditionSource::Output => get_path(target, field),
    });
    let present = actual.is_some_and(|v| !v.is_null());

    match &condition.operator {
        ConditionOperator::Equals => text_matches(actual, &condition.value),
        ConditionOperator::NotEquals => !text_matches(actual, &condition.value),
        ConditionOperator::Exists => present,
        ConditionOperator::NotExists => !present,
        ConditionOperator::IsEmpty => actual.map_or(true, Value::is_blank),
        ConditionOperator::IsNotEmpty => !actual.map_or(true, Value::is_blank),
        ConditionOperator::Unknown(name) => {
            warn!(operator = %name, "Unknown condition operator; condition evaluates to false");
            false
        }
    }
}

/// An absent or null field only equals a null expected value
fn text_matches(actual: Option<&Value>, expected: &Value) -> bool {
    match actual.filter(|v| !v.is_null()) {
        Some(value) => value.to_text() == expected.to_text(),
        None => expected.is_null(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_core::{record_from_pairs, ScratchRecord};
    use serde_json::json;

    fn condition(json: serde_json::Value) -> Condition {
        serde_json::from_value(json).unwrap()
    }

    fn record() -> Record {
        record_from_pairs([
            ("sex", Value::from("1")),
            ("note", Value::from("  ")),
            ("age", Value::Integer(42)),
            ("gone", Value::Null),
        ])
    }

    #[test]
    fn test_equals_compares_text() {
        let scratch = ScratchRecord::new();
        assert!(evaluate_condition(
            &condition(json!({"input_field": "sex", "value": "1"})),
            &record(),
            &scratch
        ));
        assert!(evaluate_condition(
            &condition(json!({"field": "age", "operator": "equals", "value": 42})),
            &record(),
            &scratch
        ));
        assert!(evaluate_condition(
            &condition(json!({"input_field": "sex", "operator": "not_equals", "value": "2"})),
            &record(),
            &scratch
        ));
    }

    #[test]
    fn test_equality_against_absent_field() {
        let scratch = ScratchRecord::new();
        let rec = record();
        let check = |field: &str, op: &str, value: serde_json::Value| {
            evaluate_condition(
                &condition(json!({"input_field": field, "operator": op, "value": value})),
                &rec,
                &scratch,
            )
        };

        assert!(!check("missing", "equals", json!("")));
        assert!(!check("gone", "equals", json!("")));
        assert!(check("missing", "not_equals", json!("")));
        assert!(check("gone", "not_equals", json!("1")));
        assert!(check("missing", "equals", json!(null)));
        assert!(check("gone", "equals", json!(null)));
        assert!(!check("sex", "equals", json!(null)));
        assert!(check("note", "equals", json!("  ")));
    }

    #[test]
    fn test_existence_operators() {
        let scratch = ScratchRecord::new();
        let rec = record();
        let check = |field: &str, op: &str| {
            evaluate_condition(&condition(json!({"input_field": field, "operator": op})), &rec, &scratch)
        };

        assert!(check("sex", "exists"));
        assert!(!check("gone", "exists"));
        assert!(check("missing", "not_exists"));
        assert!(check("note", "is_empty"));
        assert!(check("gone", "is_empty"));
        assert!(check("sex", "is_not_empty"));
        assert!(!check("note", "is_not_empty"));
    }

    #[test]
    fn test_output_source() {
        let mut scratch = ScratchRecord::new();
        scratch.insert("status", Value::from("final"));

        let cond = condition(json!({
            "input_field": "status",
            "operator": "equals",
            "value": "final",
            "source": "output"
        }));
        assert!(evaluate_condition(&cond, &record(), &scratch));

        let cond = condition(json!({"input_field": "status", "operator": "exists"}));
        assert!(!evaluate_condition(&cond, &record(), &scratch));
    }

    #[test]
    fn test_unknown_operator_is_false() {
        let scratch = ScratchRecord::new();
        let cond = condition(json!({"input_field": "sex", "operator": "resembles", "value": "1"}));
        assert!(!evaluate_condition(&cond, &record(), &scratch));
    }
}
