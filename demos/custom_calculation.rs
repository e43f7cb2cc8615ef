//! Custom Calculation Example
//!
//! Registers a calculation next to the built-in `bmi` and calls it from a
//! `calculate` rule.
//!
//! Run with: cargo run -p rowmap-sdk --example custom_calculation

use rowmap_sdk::{
    CalculationArgs, CalculationError, ModelClass, ModelSchema, Record, TransformEngineBuilder, Value,
};

const RULES: &str = r#"[
    {
        "rule_type": "calculate",
        "calculation_name": "waist_to_height",
        "input_mapping": [
            {"param_name": "waist_cm", "source_field": "waist", "data_type": "float"},
            {"param_name": "height_cm", "source_field": "height", "data_type": "float"}
        ],
        "output_field": "ratio"
    }
]"#;

fn waist_to_height(args: &CalculationArgs) -> Result<Value, CalculationError> {
    match (args.f64("waist_cm")?, args.f64("height_cm")?) {
        (Some(waist), Some(height)) if height > 0.0 => {
            Ok(Value::from((waist / height * 1000.0).round() / 1000.0))
        }
        _ => Ok(Value::Null),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = TransformEngineBuilder::new()
        .with_schema(ModelSchema::new().with_class("Measurements", ModelClass::new().scalar("ratio")))
        .root_class("Measurements")
        .add_rule_content(RULES)
        .with_calculation("waist_to_height", waist_to_height)
        .build()?;

    let record: Record = [("waist", "84.5"), ("height", "171")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::from(v)))
        .collect();

    let instance = engine.transform_one(&record)?;
    println!("ratio = {:?}", instance.field("ratio"));
    println!("calculations: {:?}", engine.calculations().names());
    Ok(())
}
