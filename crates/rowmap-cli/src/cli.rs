//! CLI argument definitions

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "rowmap",
    version,
    about = "Convert CSV rows into structured model documents using declarative rules"
)]
pub struct Cli {
    /// CSV file with one record per row
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the JSON output here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Settings file (default: config/rowmap.{yaml,toml,json} when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Rule file(s); replaces the configured list
    #[arg(short, long = "rules", value_name = "PATH")]
    pub rules: Vec<PathBuf>,

    /// Lookup table file(s); replaces the configured list
    #[arg(short, long = "lookups", value_name = "PATH")]
    pub lookups: Vec<PathBuf>,

    /// Model schema file
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Model class built for each row
    #[arg(long, value_name = "CLASS")]
    pub root_class: Option<String>,

    /// OID catalog file, loaded as the `$oid_catalog$` lookup table
    #[arg(long, value_name = "PATH")]
    pub oid_catalog: Option<PathBuf>,

    /// Fail when an output path can never resolve against the schema
    #[arg(long)]
    pub strict_paths: bool,

    /// Process rows on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
