//! Lookup tables
//!
//! Named key → value mappings shared read-only by every record of a batch.
//! Values may be scalars or objects; object values feed fan-out lookups.

use crate::types::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Conventional table name for identifier and code-system resolution
pub const OID_CATALOG_TABLE: &str = "$oid_catalog$";

/// A single lookup table
pub type LookupTable = IndexMap<String, Value>;

/// All lookup tables available to a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTables {
    tables: HashMap<String, LookupTable>,
}

impl LookupTables {
    /// Create an empty set of tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table
    pub fn insert(&mut self, name: impl Into<String>, table: LookupTable) {
        self.tables.insert(name.into(), table);
    }

    /// Builder-style insert
    pub fn with_table(mut self, name: impl Into<String>, table: LookupTable) -> Self {
        self.insert(name, table);
        self
    }

    /// Get a table by name
    pub fn get(&self, name: &str) -> Option<&LookupTable> {
        self.tables.get(name)
    }

    /// Check if a table exists
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Names of all tables
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when no tables are loaded
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Add all tables from `other`; tables already present are kept
    pub fn merge(&mut self, other: LookupTables) {
        for (name, table) in other.tables {
            self.tables.entry(name).or_insert(table);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> LookupTable {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_insert_and_get() {
        let tables = LookupTables::new().with_table(OID_CATALOG_TABLE, table(&[("OID.JLAC10.Hgb", "1001-9")]));

        assert!(tables.contains(OID_CATALOG_TABLE));
        assert_eq!(
            tables.get(OID_CATALOG_TABLE).unwrap().get("OID.JLAC10.Hgb"),
            Some(&Value::from("1001-9"))
        );
        assert!(tables.get("missing").is_none());
    }

    #[test]
    fn test_merge_keeps_existing() {
        let mut tables = LookupTables::new().with_table("sex", table(&[("M", "1")]));
        let other = LookupTables::new()
            .with_table("sex", table(&[("M", "9")]))
            .with_table("yn", table(&[("Y", "true")]));

        tables.merge(other);

        assert_eq!(tables.len(), 2);
        assert_eq!(tables.get("sex").unwrap().get("M"), Some(&Value::from("1")));
        assert_eq!(tables.names(), vec!["sex", "yn"]);
    }

    #[test]
    fn test_deserialize_tables() {
        let tables: LookupTables = serde_json::from_str(
            r#"{"gender": {"M": {"code": "1", "display": "Male"}}}"#,
        )
        .unwrap();

        let entry = tables.get("gender").unwrap().get("M").unwrap();
        assert_eq!(entry.member("display"), Some(&Value::from("Male")));
    }
}
