//! rowmap - CSV rows in, JSON model documents out

use anyhow::{Context, Result};
use clap::Parser;
use rowmap_cli::{input, logging, output, Cli, Settings};
use rowmap_sdk::TransformEngineBuilder;
use std::fs::File;
use std::io;
use tracing::{debug, info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::load(cli.config.as_deref())?.with_overrides(&cli);

    // Initialize tracing
    logging::init_tracing(&settings.log_level, settings.log_format)?;
    debug!("Loaded settings: {:?}", settings);

    let engine = TransformEngineBuilder::from_config(settings.engine_config())
        .build()
        .context("Failed to build transform engine")?;

    let records = input::read_records(&cli.input)?;
    let instances = engine.transform(&records)?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            output::write_documents(&instances, file, cli.pretty)?;
            info!("Wrote {} documents to {}", instances.len(), path.display());
        }
        None => output::write_documents(&instances, io::stdout().lock(), cli.pretty)?,
    }

    let failed = output::error_count(&instances);
    if failed > 0 {
        warn!("{} of {} records had rule errors", failed, instances.len());
    } else {
        info!("Transformed {} records", instances.len());
    }

    Ok(())
}
