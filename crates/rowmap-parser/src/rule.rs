//! Rule parser
//!
//! Parses rule list documents into Rule AST nodes. Only the document shape
//! is checked here; a rule with a malformed body becomes `Rule::Invalid` and
//! reports its problem for each record it is applied to.

use crate::error::{json_type_name, read_file, Format, ParseError, Result};
use rowmap_core::Rule;
use std::path::Path;
use tracing::{debug, warn};

/// Rule parser
pub struct RuleParser;

impl RuleParser {
    /// Parse a JSON rule list
    pub fn parse_json(json_str: &str) -> Result<Vec<Rule>> {
        let document: serde_json::Value = serde_json::from_str(json_str)?;
        Self::from_value(document)
    }

    /// Parse a YAML rule list
    pub fn parse_yaml(yaml_str: &str) -> Result<Vec<Rule>> {
        let document: serde_json::Value = serde_yaml::from_str(yaml_str)?;
        Self::from_value(document)
    }

    /// Load a rule file; `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON
    pub fn from_file(path: impl AsRef<Path>) -> Result<Vec<Rule>> {
        let path = path.as_ref();
        debug!("Loading rules from: {}", path.display());

        let content = read_file(path)?;
        let rules = match Format::of(path) {
            Format::Json => Self::parse_json(&content)?,
            Format::Yaml => Self::parse_yaml(&content)?,
        };

        debug!("Loaded {} rules from {}", rules.len(), path.display());
        Ok(rules)
    }

    /// Decode an already-parsed document
    pub fn from_value(document: serde_json::Value) -> Result<Vec<Rule>> {
        let serde_json::Value::Array(items) = document else {
            return Err(ParseError::UnexpectedShape {
                expected: "a list of rules",
                actual: json_type_name(&document),
            });
        };

        let rules: Vec<Rule> = items.into_iter().map(Rule::from_json).collect();
        for (index, rule) in rules.iter().enumerate() {
            if let Rule::Invalid { message, .. } = rule {
                warn!(rule = index, "{}", message);
            }
        }
        Ok(rules)
    }
}
