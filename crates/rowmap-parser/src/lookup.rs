//! Lookup table parser
//!
//! A lookup document is a JSON (or YAML) object of table name to table, and
//! a table is an object of key to scalar or object value.

use crate::error::{json_type_name, read_file, Format, ParseError, Result};
use rowmap_core::{LookupTable, LookupTables};
use std::path::Path;
use tracing::debug;

/// Lookup table parser
pub struct LookupParser;

impl LookupParser {
    /// Parse a JSON document holding several named tables
    pub fn parse_json(json_str: &str) -> Result<LookupTables> {
        let document: serde_json::Value = serde_json::from_str(json_str)?;
        Self::tables_from_value(document)
    }

    /// Parse a YAML document holding several named tables
    pub fn parse_yaml(yaml_str: &str) -> Result<LookupTables> {
        let document: serde_json::Value = serde_yaml::from_str(yaml_str)?;
        Self::tables_from_value(document)
    }

    /// Load a lookup tables file
    pub fn from_file(path: impl AsRef<Path>) -> Result<LookupTables> {
        let path = path.as_ref();
        debug!("Loading lookup tables from: {}", path.display());

        let content = read_file(path)?;
        let tables = match Format::of(path) {
            Format::Json => Self::parse_json(&content)?,
            Format::Yaml => Self::parse_yaml(&content)?,
        };

        debug!("Loaded lookup tables {:?} from {}", tables.names(), path.display());
        Ok(tables)
    }

    /// Load a file holding a single table (such as the OID catalog)
    pub fn table_from_file(path: impl AsRef<Path>) -> Result<LookupTable> {
        let path = path.as_ref();
        let content = read_file(path)?;
        let document: serde_json::Value = match Format::of(path) {
            Format::Json => serde_json::from_str(&content)?,
            Format::Yaml => serde_yaml::from_str(&content)?,
        };
        Self::table_from_value(document)
    }

    fn tables_from_value(document: serde_json::Value) -> Result<LookupTables> {
        let serde_json::Value::Object(map) = document else {
            return Err(ParseError::UnexpectedShape {
                expected: "an object of lookup tables",
                actual: json_type_name(&document),
            });
        };

        let mut tables = LookupTables::new();
        for (name, table) in map {
            tables.insert(name, Self::table_from_value(table)?);
        }
        Ok(tables)
    }

    fn table_from_value(document: serde_json::Value) -> Result<LookupTable> {
        if !document.is_object() {
            return Err(ParseError::UnexpectedShape {
                expected: "a lookup table object",
                actual: json_type_name(&document),
            });
        }
        Ok(serde_json::from_value(document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_core::Value;

    #[test]
    fn test_parse_tables() {
        let tables = LookupParser::parse_json(
            r#"{
                "sex": {"M": {"code": "1", "display": "Male"}},
                "yn": {"Y": true}
            }"#,
        )
        .unwrap();

        assert_eq!(tables.names(), vec!["sex", "yn"]);
        assert_eq!(tables.get("yn").unwrap().get("Y"), Some(&Value::Bool(true)));
        assert_eq!(
            tables.get("sex").unwrap().get("M").unwrap().member("code"),
            Some(&Value::from("1"))
        );
    }

    #[test]
    fn test_parse_yaml_tables() {
        let tables = LookupParser::parse_yaml("units:\n  kg: kilogram\n  cm: centimetre\n").unwrap();
        assert_eq!(
            tables.get("units").unwrap().get("cm"),
            Some(&Value::from("centimetre"))
        );
    }

    #[test]
    fn test_table_must_be_object() {
        let err = LookupParser::parse_json(r#"{"sex": ["M", "F"]}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected a lookup table object at document root, got list"
        );
        assert!(LookupParser::parse_json("[]").is_err());
    }
}
