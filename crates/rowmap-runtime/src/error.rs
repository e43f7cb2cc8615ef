//! Runtime error types

use thiserror::Error;

/// Raised when a single rule cannot be applied to a record.
///
/// The batch driver turns these into per-record error strings; they never
/// abort a batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleApplicationError {
    /// Value is not an integer
    #[error("Int conversion error: {0}")]
    IntConversion(String),

    /// Value is not a decimal number
    #[error("Float conversion error: {0}")]
    FloatConversion(String),

    /// Value is not a recognised date
    #[error("Date conversion error: {0}")]
    DateConversion(String),

    /// Value is not a recognised boolean literal
    #[error("Bool conversion error: {0}")]
    BoolConversion(String),

    /// Value cannot be rounded
    #[error("Round conversion error: {0}")]
    RoundConversion(String),

    /// Conversion name not known
    #[error("Unknown conversion_type: {0}")]
    UnknownConversion(String),

    /// A parameter the rule kind requires is absent
    #[error("{kind} rule missing {parameter}")]
    MissingParameter {
        kind: &'static str,
        parameter: &'static str,
    },

    /// Lookup rule ran with no lookup tables at all
    #[error("Lookup tables not provided")]
    LookupTablesMissing,

    /// Group rules need an attribute-style target
    #[error("ER group rule output_field_anchor '{0}' cannot target a map-like record")]
    MapLikeTarget(String),

    /// Rule body could not be decoded
    #[error("{0}")]
    InvalidRule(String),
}

/// Result type for rule application
pub type Result<T> = std::result::Result<T, RuleApplicationError>;
