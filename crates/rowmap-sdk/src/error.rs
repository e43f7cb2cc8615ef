//! SDK error types

use rowmap_parser::PathDiagnostic;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] rowmap_parser::ParseError),

    /// Core error
    #[error("Model error: {0}")]
    CoreError(#[from] rowmap_core::CoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Output paths that can never resolve, with strict path checking on
    #[error("{} unresolvable output path(s); first: {}", .0.len(), first_diagnostic(.0))]
    UnresolvablePaths(Vec<PathDiagnostic>),

    /// No root model class configured
    #[error("No root model class configured")]
    NoRootClass,
}

fn first_diagnostic(diagnostics: &[PathDiagnostic]) -> String {
    diagnostics
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("Invalid configuration".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let sdk_error: SdkError = io_error.into();
        assert!(sdk_error.to_string().contains("I/O error"));
        assert!(sdk_error.to_string().contains("File not found"));
    }

    #[test]
    fn test_unresolvable_paths_message() {
        let error = SdkError::UnresolvablePaths(vec![PathDiagnostic {
            location: "rule 3".to_string(),
            rule_type: "direct_mapping".to_string(),
            path: "weight.value".to_string(),
            message: "'weight' is not an object".to_string(),
        }]);
        assert_eq!(
            error.to_string(),
            "1 unresolvable output path(s); first: rule 3 (direct_mapping for weight.value): 'weight' is not an object"
        );
    }

    #[test]
    fn test_core_error_conversion() {
        let error: SdkError = rowmap_core::CoreError::UnknownClass("Nope".to_string()).into();
        assert!(error.to_string().starts_with("Model error:"));
    }
}
