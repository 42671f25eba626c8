//! Reply types returned by the assistant

use serde::{Deserialize, Serialize};

use crate::assistant::profile::Gender;

/// Answer to a chat question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The canned answer on its own
    pub answer: String,
    pub disclaimer: String,
}

impl ChatReply {
    /// Answer and disclaimer separated by a blank line
    pub fn text(&self) -> String {
        format!("{}\n\n{}", self.answer, self.disclaimer)
    }
}

/// Result of the symptom form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomAnalysis {
    pub symptoms: String,
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}

/// Result of the treatment form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    pub condition: String,
    pub age: u32,
    pub gender: Gender,
    pub medical_history: String,
    pub plan: String,
    pub key_points: Vec<String>,
    pub disclaimer: String,
}
