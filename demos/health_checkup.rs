//! Health Checkup Example
//!
//! Builds an engine from the files under `config/` and converts two
//! hand-written rows.
//!
//! Run from the workspace root with: cargo run -p rowmap-sdk --example health_checkup

use rowmap_sdk::{Record, TransformEngineBuilder, Value};

fn row(pairs: &[(&str, &str)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::from(*v)))
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("rowmap_runtime=warn")
        .init();

    let engine = TransformEngineBuilder::new()
        .add_rule_file("config/rules.json")
        .add_lookup_file("config/lookups.json")
        .with_schema_file("config/models.yaml")
        .with_oid_catalog_file("config/oid_catalog.json")
        .root_class("HealthCheckupRecord")
        .build()?;

    println!("Loaded {} rules", engine.rules().len());

    let records = vec![
        row(&[
            ("document_id", "D0100"),
            ("exam_date", "2024/05/10"),
            ("patient_id", "P2001"),
            ("patient_name", "Tanaka Jiro"),
            ("sex", "1"),
            ("birth_date", "1970-1-2"),
            ("height_cm", "172.3"),
            ("height_m", "1.723"),
            ("weight_kg", "70.4"),
            ("sbp", "132"),
            ("smoker", "2"),
            ("hgb", "15.1"),
            ("hct", "44.0"),
        ]),
        row(&[("patient_id", "P2002"), ("birth_date", "last year")]),
    ];

    for instance in engine.transform(&records)? {
        println!("{}", serde_json::to_string_pretty(&instance)?);
        for error in instance.errors() {
            println!("  error: {}", error);
        }
    }

    Ok(())
}
