//! Batch driver
//!
//! Runs a rule list over many records. A failing rule is recorded on its
//! record's target and processing continues with the next rule; every
//! record yields a target, whatever happened to it.

use crate::dispatcher::RuleDispatcher;
use rayon::prelude::*;
use rowmap_core::{OutputTarget, Record, Rule};
use tracing::{debug, error};

/// Applies a rule list to records
#[derive(Debug, Clone, Copy)]
pub struct BatchDriver<'a> {
    dispatcher: RuleDispatcher<'a>,
}

impl<'a> BatchDriver<'a> {
    pub fn new(dispatcher: RuleDispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Apply `rules` to every record in order, building each target with
    /// `new_target`
    pub fn apply<T, F>(&self, records: &[Record], rules: &[Rule], mut new_target: F) -> Vec<T>
    where
        T: OutputTarget,
        F: FnMut() -> T,
    {
        debug!(records = records.len(), rules = rules.len(), "Applying rules to batch");
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let mut target = new_target();
                self.apply_record(index, record, rules, &mut target);
                target
            })
            .collect()
    }

    /// Same as [`BatchDriver::apply`], spreading records over the rayon
    /// thread pool. Output order matches input order.
    pub fn apply_parallel<T, F>(&self, records: &[Record], rules: &[Rule], new_target: F) -> Vec<T>
    where
        T: OutputTarget + Send,
        F: Fn() -> T + Sync,
    {
        debug!(records = records.len(), rules = rules.len(), "Applying rules to batch in parallel");
        records
            .par_iter()
            .enumerate()
            .map(|(index, record)| {
                let mut target = new_target();
                self.apply_record(index, record, rules, &mut target);
                target
            })
            .collect()
    }

    /// Apply `rules` to one record; `index` only labels error messages
    pub fn apply_record(&self, index: usize, record: &Record, rules: &[Rule], target: &mut dyn OutputTarget) {
        target.set_raw_input(record);

        for (rule_index, rule) in rules.iter().enumerate() {
            if let Err(e) = self.dispatcher.apply(rule, record, target) {
                let message = format!(
                    "record {}, rule {} ({} for {}): {}",
                    index,
                    rule_index,
                    rule.kind(),
                    rule.output_label().as_deref().unwrap_or("-"),
                    e
                );
                error!("{}", message);
                if let Some(errors) = target.errors_mut() {
                    errors.push(message);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::CalculationRegistry;
    use rowmap_core::{record_from_pairs, LookupTables, ModelClass, ModelInstance, ModelSchema, Value};
    use serde_json::json;

    fn schema() -> ModelSchema {
        ModelSchema::new().with_class("Row", ModelClass::new().scalar("birth").scalar("name"))
    }

    fn rules() -> Vec<Rule> {
        serde_json::from_value(json!([
            {"rule_type": "data_type_conversion", "input_field": "dob", "output_field": "birth", "conversion_type": "to_date_yyyymmdd"},
            {"rule_type": "direct_mapping", "input_field": "name", "output_field": "name"}
        ]))
        .unwrap()
    }

    fn run(records: &[Record], parallel: bool) -> Vec<ModelInstance> {
        let schema = schema();
        let tables = LookupTables::new();
        let registry = CalculationRegistry::new();
        let driver = BatchDriver::new(RuleDispatcher::new(&tables, &registry).with_schema(&schema));
        let new_target = || schema.new_instance("Row").unwrap();
        if parallel {
            driver.apply_parallel(records, &rules(), new_target)
        } else {
            driver.apply(records, &rules(), new_target)
        }
    }

    #[test]
    fn test_failing_rule_does_not_stop_record() {
        let records = vec![record_from_pairs([("dob", "not-a-date"), ("name", "Hanako")])];
        let out = run(&records, false);

        assert_eq!(out[0].field("name"), Some(&Value::from("Hanako")));
        assert_eq!(
            out[0].errors(),
            ["record 0, rule 0 (data_type_conversion for birth): Date conversion error: not-a-date"]
        );
        assert_eq!(out[0].raw_input(), Some(&records[0]));
    }

    #[test]
    fn test_every_record_is_returned() {
        let records = vec![
            record_from_pairs([("dob", "bad"), ("name", "A")]),
            record_from_pairs([("dob", "2000-01-02"), ("name", "B")]),
        ];
        let out = run(&records, false);

        assert_eq!(out.len(), 2);
        assert!(out[0].has_errors());
        assert!(!out[1].has_errors());
        assert_eq!(out[1].field("birth"), Some(&Value::from("20000102")));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records: Vec<Record> = (0..64)
            .map(|i| {
                let dob = if i % 5 == 0 { "??".to_string() } else { format!("1990-01-{:02}", i % 28 + 1) };
                record_from_pairs([("dob", dob), ("name", format!("n{}", i))])
            })
            .collect();

        assert_eq!(run(&records, true), run(&records, false));
    }

    #[test]
    fn test_error_label_without_output_field() {
        let tables = LookupTables::new();
        let registry = CalculationRegistry::new();
        let driver = BatchDriver::new(RuleDispatcher::new(&tables, &registry));
        let rules: Vec<Rule> = serde_json::from_value(json!([
            {"rule_type": "entry_relationship_group", "components": []}
        ]))
        .unwrap();

        let out = driver.apply(&[Record::new()], &rules, || schema().new_instance("Row").unwrap());
        assert_eq!(
            out[0].errors(),
            ["record 0, rule 0 (entry_relationship_group for -): entry_relationship_group rule missing output_field_anchor"]
        );
    }
}
