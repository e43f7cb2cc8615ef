//! JSON output

use rowmap_sdk::{ModelInstance, ModelObject};
use serde::Serialize;
use std::io::Write;

/// One output element: the built object and the errors of its record
#[derive(Debug, Serialize)]
pub struct OutputDocument<'a> {
    pub data: &'a ModelObject,
    pub errors: &'a [String],
}

impl<'a> From<&'a ModelInstance> for OutputDocument<'a> {
    fn from(instance: &'a ModelInstance) -> Self {
        Self {
            data: instance.root(),
            errors: instance.errors(),
        }
    }
}

/// Write all instances as one JSON array
pub fn write_documents<W: Write>(instances: &[ModelInstance], writer: W, pretty: bool) -> anyhow::Result<()> {
    let documents: Vec<OutputDocument<'_>> = instances.iter().map(OutputDocument::from).collect();
    let mut writer = std::io::BufWriter::new(writer);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, &documents)?;
    } else {
        serde_json::to_writer(&mut writer, &documents)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Render one instance as a JSON value
pub fn document_value(instance: &ModelInstance) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(OutputDocument::from(instance))
}

/// Number of instances with at least one error
pub fn error_count(instances: &[ModelInstance]) -> usize {
    instances.iter().filter(|i| i.has_errors()).count()
}
