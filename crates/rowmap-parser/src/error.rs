//! Parser error types

use rowmap_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// File could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document has the wrong top-level shape
    #[error("Expected {expected} at document root, got {actual}")]
    UnexpectedShape {
        expected: &'static str,
        actual: &'static str,
    },

    /// Schema or other core-level inconsistency
    #[error("Invalid model schema: {0}")]
    Schema(#[from] CoreError),

    /// Unknown class used as the validation root
    #[error("Unknown root class: {0}")]
    UnknownRootClass(String),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Document format, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Yaml,
}

impl Format {
    pub(crate) fn of(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

/// Read a file, attaching its path to any error
pub(crate) fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// JSON type name for shape errors
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}
