//! Error types for rowmap Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid attribute path: '{0}'")]
    InvalidPath(String),

    #[error("Unknown model class: {0}")]
    UnknownClass(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
