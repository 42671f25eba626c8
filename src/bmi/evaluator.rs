//! BMI computation and classification

use tracing::debug;

use crate::bmi::types::{BmiCategory, BmiResult, Measurement};
use crate::errors::{HealthError, Result};

/// Lower bound of the Normal band
pub const NORMAL_MIN: f64 = 18.5;

/// Lower bound of the Overweight band
pub const OVERWEIGHT_MIN: f64 = 25.0;

/// Lower bound of the Obese band
pub const OBESE_MIN: f64 = 30.0;

/// Compute BMI from height (cm) and weight (kg)
///
/// Returns `InvalidInput` when either value is non-positive or non-finite,
/// or when the ratio overflows or underflows.
pub fn compute(height_cm: f64, weight_kg: f64) -> Result<BmiResult> {
    let measurement = Measurement::new(height_cm, weight_kg)?;
    let height_m = measurement.height_m();
    let value = measurement.weight_kg / (height_m * height_m);
    if !value.is_finite() || value <= 0.0 {
        return Err(HealthError::invalid_input("measurement", "out of range"));
    }
    let category = classify(value);

    debug!(height_cm, weight_kg, value, ?category, "BMI computed");

    Ok(BmiResult { value, category })
}

/// Map a BMI value to its band. Half-open intervals, first match wins.
pub fn classify(value: f64) -> BmiCategory {
    if value < NORMAL_MIN {
        BmiCategory::Underweight
    } else if value < OVERWEIGHT_MIN {
        BmiCategory::Normal
    } else if value < OBESE_MIN {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

impl Measurement {
    /// Evaluate this measurement
    pub fn evaluate(&self) -> Result<BmiResult> {
        compute(self.height_cm, self.weight_kg)
    }
}
