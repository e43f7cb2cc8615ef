//! Tracing subscriber setup
//!
//! Logs go to stderr so that stdout carries only the JSON output.

use crate::cli::LogFormat;
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events are shown at the configured level
const CRATES: &[&str] = &["rowmap", "rowmap_cli", "rowmap_sdk", "rowmap_runtime", "rowmap_parser", "rowmap_core"];

/// Filter directives for `level`, used when RUST_LOG is not set
pub fn default_directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|name| format!("{}={}", name, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing subscriber
pub fn init_tracing(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr))
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("rowmap=debug,"));
        assert!(directives.contains("rowmap_runtime=debug"));
        assert!(directives.parse::<EnvFilter>().is_ok());
    }
}
