//! Load-time path diagnostics
//!
//! Output paths are resolved at run time, and a path whose intermediate
//! object never exists is skipped with a warning on every record. The
//! validator walks a rule list once against the model schema and reports
//! those paths up front.
//!
//! The walk follows the rule list in order:
//! - eager nested fields resolve to their class
//! - lazy nested fields resolve only after a `create_nested_object` rule
//!   has created them
//! - conditional branches are both walked
//! - component group bodies write to scratch records and are skipped

use crate::error::{ParseError, Result};
use rowmap_core::ast::{LookupValue, Split};
use rowmap_core::{AttributePath, FieldSpec, ModelSchema, Rule};
use std::collections::HashMap;
use std::fmt;

/// An output path that cannot resolve against the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDiagnostic {
    /// Position of the rule, e.g. `rule 4` or `rule 2 > then 0`
    pub location: String,
    pub rule_type: String,
    pub path: String,
    pub message: String,
}

impl fmt::Display for PathDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} for {}): {}",
            self.location, self.rule_type, self.path, self.message
        )
    }
}

/// Walks rule lists against one root class of a schema
pub struct PathValidator<'a> {
    schema: &'a ModelSchema,
    root_class: &'a str,
}

/// Classes placed by `create_nested_object`, keyed by dotted path
type Created = HashMap<String, String>;

impl<'a> PathValidator<'a> {
    /// Create a validator for instances of `root_class`
    pub fn new(schema: &'a ModelSchema, root_class: &'a str) -> Result<Self> {
        if !schema.has_class(root_class) {
            return Err(ParseError::UnknownRootClass(root_class.to_string()));
        }
        Ok(Self { schema, root_class })
    }

    /// Report every output path that cannot resolve
    pub fn validate(&self, rules: &[Rule]) -> Vec<PathDiagnostic> {
        let mut diagnostics = Vec::new();
        let mut created = Created::new();
        self.walk(rules, "rule", &mut created, &mut diagnostics);
        diagnostics
    }

    fn walk(
        &self,
        rules: &[Rule],
        prefix: &str,
        created: &mut Created,
        diagnostics: &mut Vec<PathDiagnostic>,
    ) {
        for (index, rule) in rules.iter().enumerate() {
            let location = format!("{} {}", prefix, index);

            if let Rule::ConditionalMapping(r) = rule {
                self.walk(&r.then_rules, &format!("{} > then", location), created, diagnostics);
                self.walk(&r.else_rules, &format!("{} > else", location), created, diagnostics);
                continue;
            }

            for path in output_paths(rule) {
                if let Err(message) = self.resolve_parents(path, created) {
                    diagnostics.push(PathDiagnostic {
                        location: location.clone(),
                        rule_type: rule.kind().to_string(),
                        path: path.to_string(),
                        message,
                    });
                }
            }

            if let Rule::CreateNestedObject(r) = rule {
                if let (Some(path), Some(class)) = (&r.output_field, &r.class_name) {
                    if self.schema.has_class(class) {
                        created.insert(path.to_string(), class.clone());
                    } else {
                        diagnostics.push(PathDiagnostic {
                            location,
                            rule_type: rule.kind().to_string(),
                            path: path.to_string(),
                            message: format!("unknown class '{}'", class),
                        });
                    }
                }
            }
        }
    }

    /// Resolve every intermediate segment of `path` to a class
    fn resolve_parents(&self, path: &AttributePath, created: &Created) -> std::result::Result<(), String> {
        let mut class_name = self.root_class.to_string();

        for (depth, segment) in path.parents().iter().enumerate() {
            let prefix = path.segments()[..=depth].join(".");

            if let Some(class) = created.get(&prefix) {
                class_name = class.clone();
                continue;
            }

            let spec = self
                .schema
                .class(&class_name)
                .and_then(|c| c.field(segment));
            class_name = match spec {
                Some(FieldSpec::Nested { class, eager: true }) => class.clone(),
                Some(FieldSpec::Nested { class, eager: false }) => {
                    return Err(format!(
                        "'{}' is null until a create_nested_object rule creates a {}",
                        prefix, class
                    ))
                }
                Some(FieldSpec::Scalar { .. }) | Some(FieldSpec::List) => {
                    return Err(format!("'{}' is not an object", prefix))
                }
                None => {
                    return Err(format!(
                        "class {} has no attribute '{}'",
                        class_name, segment
                    ))
                }
            };
        }
        Ok(())
    }
}

/// Output paths a rule writes on its target
fn output_paths(rule: &Rule) -> Vec<&AttributePath> {
    match rule {
        Rule::DirectMapping(r) => r.output_field.iter().collect(),
        Rule::DefaultValue(r) => r.output_field.iter().collect(),
        Rule::DataTypeConversion(r) => r.output_field.iter().collect(),
        Rule::RoundNumber(r) => r.output_field.iter().collect(),
        Rule::MapMissingValues(r) => r.output_field.iter().collect(),
        Rule::Concat(r) => r.output_field.iter().collect(),
        Rule::CreateNestedObject(r) => r.output_field.iter().collect(),
        Rule::Calculate(r) => r.output_field.iter().collect(),
        Rule::LookupValue(r) => lookup_paths(r),
        Rule::Split(Split { output_fields, .. }) => output_fields.iter().collect(),
        Rule::ConditionalMapping(_)
        | Rule::EntryRelationshipGroup(_)
        | Rule::Comment
        | Rule::Unknown { .. }
        | Rule::Invalid { .. } => Vec::new(),
    }
}

fn lookup_paths(rule: &LookupValue) -> Vec<&AttributePath> {
    rule.output_field
        .iter()
        .chain(rule.output_mappings.iter().filter_map(|m| m.target_property.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleParser;
    use rowmap_core::ModelClass;

    fn schema() -> ModelSchema {
        ModelSchema::new()
            .with_class(
                "Record",
                ModelClass::new()
                    .scalar("name")
                    .eager_nested("gender", "Code")
                    .nested("weight", "Observation")
                    .list("results"),
            )
            .with_class("Code", ModelClass::new().scalar("code"))
            .with_class("Observation", ModelClass::new().scalar("value").eager_nested("unit", "Code"))
    }

    fn validate(rules_json: &str) -> Vec<PathDiagnostic> {
        let schema = schema();
        let rules = RuleParser::parse_json(rules_json).unwrap();
        PathValidator::new(&schema, "Record").unwrap().validate(&rules)
    }

    #[test]
    fn test_eager_paths_resolve() {
        let diagnostics = validate(
            r#"[
                {"rule_type": "direct_mapping", "input_field": "g", "output_field": "gender.code"},
                {"rule_type": "default_value", "output_field": "undeclared_top_level", "value": 1}
            ]"#,
        );
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }

    #[test]
    fn test_lazy_path_needs_create() {
        let diagnostics = validate(
            r#"[
                {"rule_type": "direct_mapping", "input_field": "w", "output_field": "weight.value"},
                {"rule_type": "create_nested_object", "output_field": "weight", "class_name": "Observation"},
                {"rule_type": "direct_mapping", "input_field": "w", "output_field": "weight.value"},
                {"rule_type": "default_value", "output_field": "weight.unit.code", "value": "kg"}
            ]"#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location, "rule 0");
        assert_eq!(diagnostics[0].path, "weight.value");
        assert!(diagnostics[0].message.contains("create_nested_object"));
    }

    #[test]
    fn test_scalar_and_unknown_intermediates() {
        let diagnostics = validate(
            r#"[
                {"rule_type": "split", "input_field": "n", "delimiter": " ", "output_fields": ["name.first", "name"]},
                {
                    "rule_type": "conditional_mapping",
                    "condition": {"input_field": "x"},
                    "else_rules": [
                        {"rule_type": "default_value", "output_field": "nowhere.code", "value": "1"}
                    ]
                },
                {"rule_type": "create_nested_object", "output_field": "weight", "class_name": "Nope"}
            ]"#,
        );

        let rendered: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "rule 0 (split for name.first): 'name' is not an object",
                "rule 1 > else 0 (default_value for nowhere.code): class Record has no attribute 'nowhere'",
                "rule 2 (create_nested_object for weight): unknown class 'Nope'",
            ]
        );
    }

    #[test]
    fn test_group_bodies_are_skipped() {
        let diagnostics = validate(
            r#"[{
                "rule_type": "entry_relationship_group",
                "output_field_anchor": "results",
                "components": [{"rules": [
                    {"rule_type": "default_value", "output_field": "value.code", "value": "1"}
                ]}]
            }]"#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_root_class() {
        let schema = schema();
        assert!(matches!(
            PathValidator::new(&schema, "Missing"),
            Err(ParseError::UnknownRootClass(_))
        ));
    }
}
