//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use rowmap_sdk::{EngineConfig, Record, TransformEngine, TransformEngineBuilder, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Path of a file under the workspace `config/` directory
pub fn shipped(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../config")
        .join(name)
}

/// Engine configuration matching `config/rowmap.yaml`
pub fn shipped_config() -> EngineConfig {
    EngineConfig::new()
        .with_rule_file(shipped("rules.json"))
        .with_lookup_file(shipped("lookups.json"))
        .with_schema_file(shipped("models.yaml"))
        .with_oid_catalog_file(shipped("oid_catalog.json"))
        .with_root_class("HealthCheckupRecord")
}

/// Engine built from the shipped configuration
pub fn shipped_engine() -> TransformEngine {
    TransformEngineBuilder::from_config(shipped_config())
        .build()
        .expect("Failed to build engine from shipped config")
}

/// Build a record the way the CLI does: every cell is a string
pub fn row(headers: &[&str], cells: &[&str]) -> Record {
    headers
        .iter()
        .zip(cells)
        .map(|(h, c)| (h.to_string(), Value::from(*c)))
        .collect()
}

/// Temporary directory holding rule, lookup and schema files
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Write `content` to `name` and return its path
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write temp file");
        path
    }
}
