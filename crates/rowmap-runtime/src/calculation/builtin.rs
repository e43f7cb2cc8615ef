//! Built-in calculations

use super::{CalculationArgs, CalculationError};
use crate::coercion::round_to;
use rowmap_core::Value;
use tracing::warn;

/// Body mass index: `weight_kg / height_m²`, rounded to 2 decimals.
///
/// Null when either input is null or the height is zero.
pub fn bmi(args: &CalculationArgs) -> Result<Value, CalculationError> {
    let weight = args.f64("weight_kg")?;
    let height = args.f64("height_m")?;

    match (weight, height) {
        (Some(w), Some(h)) if h != 0.0 => Ok(Value::Float(round_to(w / (h * h), 2))),
        _ => {
            warn!(weight = ?weight, height = ?height, "Cannot calculate BMI");
            Ok(Value::Null)
        }
    }
}
