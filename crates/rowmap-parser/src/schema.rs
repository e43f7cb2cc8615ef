//! Model schema parser

use crate::error::{read_file, Format, Result};
use rowmap_core::ModelSchema;
use std::path::Path;
use tracing::debug;

/// Model schema parser
pub struct SchemaParser;

impl SchemaParser {
    /// Parse a YAML schema document and check it for dangling classes
    pub fn parse_yaml(yaml_str: &str) -> Result<ModelSchema> {
        let schema: ModelSchema = serde_yaml::from_str(yaml_str)?;
        schema.check()?;
        Ok(schema)
    }

    /// Parse a JSON schema document and check it
    pub fn parse_json(json_str: &str) -> Result<ModelSchema> {
        let schema: ModelSchema = serde_json::from_str(json_str)?;
        schema.check()?;
        Ok(schema)
    }

    /// Load a schema file
    pub fn from_file(path: impl AsRef<Path>) -> Result<ModelSchema> {
        let path = path.as_ref();
        debug!("Loading model schema from: {}", path.display());

        let content = read_file(path)?;
        match Format::of(path) {
            Format::Json => Self::parse_json(&content),
            Format::Yaml => Self::parse_yaml(&content),
        }
    }
}
