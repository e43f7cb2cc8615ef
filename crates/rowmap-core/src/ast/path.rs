//! Dotted attribute paths

use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A dot-separated address of a (possibly nested) field, e.g.
/// `header.patient_gender.code`.
///
/// Map-like targets treat the whole string as one key; attribute-style
/// targets navigate segment by segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath {
    raw: String,
    segments: Vec<String>,
}

impl AttributePath {
    /// Parse a dotted path. Empty paths and empty segments are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(CoreError::InvalidPath(raw.to_string()));
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(CoreError::InvalidPath(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Full path as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments leading to the final one
    pub fn parents(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// Final segment
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// First segment
    pub fn head(&self) -> &str {
        &self.segments[0]
    }

    /// True when the path has more than one segment
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }
}

impl FromStr for AttributePath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for AttributePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for AttributePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        AttributePath::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_path() {
        let path = AttributePath::parse("value").unwrap();
        assert_eq!(path.segments(), &["value".to_string()]);
        assert!(path.parents().is_empty());
        assert_eq!(path.leaf(), "value");
        assert!(!path.is_nested());
    }

    #[test]
    fn test_parse_nested_path() {
        let path = AttributePath::parse("header.patient_gender.code").unwrap();
        assert_eq!(path.head(), "header");
        assert_eq!(path.parents(), &["header".to_string(), "patient_gender".to_string()]);
        assert_eq!(path.leaf(), "code");
        assert!(path.is_nested());
        assert_eq!(path.to_string(), "header.patient_gender.code");
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(AttributePath::parse("").is_err());
        assert!(AttributePath::parse("a..b").is_err());
        assert!(AttributePath::parse(".a").is_err());
        assert!(AttributePath::parse("a.").is_err());
    }

    #[test]
    fn test_deserialize_path() {
        let path: AttributePath = serde_json::from_str(r#""bmi_observation.value""#).unwrap();
        assert_eq!(path.leaf(), "value");

        let err = serde_json::from_str::<AttributePath>(r#""a..b""#);
        assert!(err.is_err());
    }
}
