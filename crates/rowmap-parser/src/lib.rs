//! rowmap Parser - JSON/YAML loaders for the rowmap rule engine
//!
//! This crate turns external documents into core types:
//! - rule lists (JSON or YAML)
//! - lookup tables and the OID catalog
//! - model schemas
//! - load-time diagnostics for output paths that can never resolve

pub mod diagnostics;
pub mod error;
pub mod lookup;
pub mod rule;
pub mod schema;

// Re-export main parser types
pub use diagnostics::{PathDiagnostic, PathValidator};
pub use error::{ParseError, Result};
pub use lookup::LookupParser;
pub use rule::RuleParser;
pub use schema::SchemaParser;
