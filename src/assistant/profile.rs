//! Patient profile submitted with the treatment form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{HealthError, Result};

/// Accepted age range in years
pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;

const REQUIRED_FIELDS: &str = "Please fill in all required fields.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Gender {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '/')
            .collect();

        match normalized.as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            "prefernottosay" | "n/a" | "na" | "none" => Ok(Gender::PreferNotToSay),
            "" => Err(HealthError::invalid_input("gender", REQUIRED_FIELDS)),
            _ => Err(HealthError::invalid_input(
                "gender",
                format!("'{}' is not one of Male, Female, Other, Prefer not to say", s.trim()),
            )),
        }
    }
}

/// Treatment form contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub condition: String,
    pub age: u32,
    pub gender: Gender,
    pub medical_history: String,
}

impl PatientProfile {
    /// Build a validated profile. Blank history is stored as "None".
    pub fn new(
        condition: impl Into<String>,
        age: u32,
        gender: Gender,
        medical_history: Option<String>,
    ) -> Result<Self> {
        let condition = condition.into().trim().to_string();
        if condition.is_empty() {
            return Err(HealthError::invalid_input("condition", REQUIRED_FIELDS));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(HealthError::invalid_input(
                "age",
                format!("must be between {} and {}", MIN_AGE, MAX_AGE),
            ));
        }

        let medical_history = medical_history
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| "None".to_string());

        Ok(Self {
            condition,
            age,
            gender,
            medical_history,
        })
    }

    /// Build a profile from raw form text
    pub fn parse(condition: &str, age: &str, gender: &str, medical_history: &str) -> Result<Self> {
        let age_text = age.trim();
        if age_text.is_empty() {
            return Err(HealthError::invalid_input("age", REQUIRED_FIELDS));
        }
        let age = age_text
            .parse::<u32>()
            .map_err(|_| HealthError::invalid_input("age", format!("'{}' is not a whole number", age_text)))?;
        let gender = gender.parse::<Gender>()?;

        Self::new(condition, age, gender, Some(medical_history.to_string()))
    }
}
