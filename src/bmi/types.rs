//! BMI type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{HealthError, Result};

/// Height and weight as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Height in centimeters
    pub height_cm: f64,

    /// Weight in kilograms
    pub weight_kg: f64,
}

impl Measurement {
    /// Create a validated measurement
    pub fn new(height_cm: f64, weight_kg: f64) -> Result<Self> {
        let measurement = Self { height_cm, weight_kg };
        measurement.validate()?;
        Ok(measurement)
    }

    /// Parse raw form input. Blank or non-numeric text is rejected before the
    /// positivity check.
    pub fn parse(height: &str, weight: &str) -> Result<Self> {
        let height_cm = parse_field("height", height)?;
        let weight_kg = parse_field("weight", weight)?;
        Self::new(height_cm, weight_kg)
    }

    /// Both values must be finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        check_positive("height", self.height_cm)?;
        check_positive("weight", self.weight_kg)?;
        Ok(())
    }

    /// Height converted to meters
    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }
}

fn parse_field(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HealthError::invalid_input(field, "value is missing"));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| HealthError::invalid_input(field, format!("'{}' is not a number", trimmed)))
}

fn check_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(HealthError::invalid_input(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(HealthError::invalid_input(field, "must be greater than zero"));
    }
    Ok(())
}

/// BMI category band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// All bands in ascending order
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Presentation tone for colour coding
    pub fn severity(&self) -> Severity {
        match self {
            BmiCategory::Normal => Severity::Healthy,
            BmiCategory::Overweight => Severity::Caution,
            BmiCategory::Underweight | BmiCategory::Obese => Severity::Alert,
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Tone used when rendering a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Healthy,
    Caution,
    Alert,
}

/// Outcome of a single BMI computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// kg/m²
    pub value: f64,
    pub category: BmiCategory,
}

impl BmiResult {
    /// Value rounded for display, e.g. "24.2"
    pub fn rounded(&self) -> String {
        format!("{:.1}", self.value)
    }
}

impl fmt::Display for BmiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BMI: {} | Category: {}", self.rounded(), self.category)
    }
}
