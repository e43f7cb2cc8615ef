//! CLI settings
//!
//! Sources, lowest precedence first:
//! - built-in defaults
//! - `config/rowmap.{yaml,toml,json}` (or the file given with `--config`)
//! - `ROWMAP_*` environment variables, also read from `.env`
//! - command line flags

use crate::cli::{Cli, LogFormat};
use anyhow::Context;
use rowmap_sdk::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file looked up when `--config` is not given
pub const DEFAULT_SETTINGS_FILE: &str = "config/rowmap";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rule_files: Vec<PathBuf>,
    pub lookup_files: Vec<PathBuf>,
    pub schema_file: Option<PathBuf>,
    pub root_class: Option<String>,
    pub oid_catalog_file: Option<PathBuf>,
    pub strict_paths: bool,
    pub parallel: bool,

    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rule_files: Vec::new(),
            lookup_files: Vec::new(),
            schema_file: None,
            root_class: None,
            oid_catalog_file: None,
            strict_paths: false,
            parallel: false,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl Settings {
    /// Load settings from the settings file and the environment
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let file = match config_file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("ROWMAP")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("rule_files")
                    .with_list_parse_key("lookup_files"),
            )
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to deserialize settings")
    }

    /// Apply command line flags on top of the loaded settings
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if !cli.rules.is_empty() {
            self.rule_files = cli.rules.clone();
        }
        if !cli.lookups.is_empty() {
            self.lookup_files = cli.lookups.clone();
        }
        if let Some(schema) = &cli.schema {
            self.schema_file = Some(schema.clone());
        }
        if let Some(root_class) = &cli.root_class {
            self.root_class = Some(root_class.clone());
        }
        if let Some(catalog) = &cli.oid_catalog {
            self.oid_catalog_file = Some(catalog.clone());
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        if let Some(format) = cli.log_format {
            self.log_format = format;
        }
        self.strict_paths |= cli.strict_paths;
        self.parallel |= cli.parallel;
        self
    }

    /// Engine part of the settings
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            rule_files: self.rule_files.clone(),
            rule_contents: Vec::new(),
            lookup_files: self.lookup_files.clone(),
            schema_file: self.schema_file.clone(),
            root_class: self.root_class.clone(),
            oid_catalog_file: self.oid_catalog_file.clone(),
            strict_paths: self.strict_paths,
            parallel: self.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.log_format, LogFormat::Text);
        assert!(settings.rule_files.is_empty());
        assert!(!settings.parallel);
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = Settings {
            rule_files: vec![PathBuf::from("config/rules.json")],
            root_class: Some("HealthCheckupRecord".to_string()),
            ..Settings::default()
        };
        let cli = Cli {
            rules: vec![PathBuf::from("other.json")],
            parallel: true,
            log_format: Some(LogFormat::Json),
            ..Cli::default()
        };

        let merged = settings.with_overrides(&cli);
        assert_eq!(merged.rule_files, vec![PathBuf::from("other.json")]);
        assert_eq!(merged.root_class.as_deref(), Some("HealthCheckupRecord"));
        assert!(merged.parallel);
        assert_eq!(merged.log_format, LogFormat::Json);
    }

    #[test]
    fn test_engine_config() {
        let settings = Settings {
            schema_file: Some(PathBuf::from("config/models.yaml")),
            strict_paths: true,
            ..Settings::default()
        };

        let config = settings.engine_config();
        assert_eq!(config.schema_file, Some(PathBuf::from("config/models.yaml")));
        assert!(config.strict_paths);
        assert!(config.rule_contents.is_empty());
    }
}
