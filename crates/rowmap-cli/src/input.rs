//! CSV input
//!
//! Every cell becomes a string value keyed by its column header; empty
//! cells stay empty strings and are left to the rules to interpret.

use anyhow::Context;
use rowmap_sdk::{Record, Value};
use std::io;
use std::path::Path;
use tracing::debug;

/// Read all rows of a CSV file
pub fn read_records(path: &Path) -> anyhow::Result<Vec<Record>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let records = records_from_reader(reader)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Read all rows from any CSV source
pub fn read_records_from<R: io::Read>(source: R) -> Result<Vec<Record>, csv::Error> {
    records_from_reader(csv::ReaderBuilder::new().has_headers(true).from_reader(source))
}

fn records_from_reader<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Record>, csv::Error> {
    let headers = reader.headers()?.clone();

    reader
        .records()
        .map(|row| {
            let row = row?;
            Ok(headers
                .iter()
                .zip(row.iter())
                .map(|(header, cell)| (header.to_string(), Value::from(cell)))
                .collect())
        })
        .collect()
}
