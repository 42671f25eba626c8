//! Session manager for REPL state
//!
//! Holds everything the interactive shell remembers between prompts: the
//! active section, the chat transcript, the last treatment profile and the
//! last BMI result. All state is in memory and discarded on exit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use uuid::Uuid;

use crate::assistant::PatientProfile;
use crate::bmi::BmiResult;
use crate::errors::HealthError;

/// Default bound on the chat transcript
pub const DEFAULT_MAX_HISTORY: usize = 200;

/// Navigable area of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Dashboard,
    Chat,
    Prediction,
    Treatment,
    Analytics,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::Chat,
        Section::Prediction,
        Section::Treatment,
        Section::Analytics,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Chat => "Patient Chat",
            Section::Prediction => "Disease Prediction",
            Section::Treatment => "Treatment Plans",
            Section::Analytics => "Health Analytics",
        }
    }

    /// Short prompt tag
    pub fn tag(&self) -> &'static str {
        match self {
            Section::Dashboard => "home",
            Section::Chat => "chat",
            Section::Prediction => "predict",
            Section::Treatment => "treatment",
            Section::Analytics => "bmi",
        }
    }

    /// What free text means in this section
    pub fn input_hint(&self) -> &'static str {
        match self {
            Section::Dashboard => "Pick a section with /chat, /predict, /treatment or /bmi",
            Section::Chat => "Ask a health question",
            Section::Prediction => "Describe your symptoms, e.g. fever, headache, cough",
            Section::Treatment => "Enter a medical condition to start the treatment form",
            Section::Analytics => "Enter height (cm) and weight (kg), e.g. 170 70",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for Section {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" | "home" => Ok(Section::Dashboard),
            "chat" => Ok(Section::Chat),
            "prediction" | "predict" | "symptoms" => Ok(Section::Prediction),
            "treatment" | "treatments" | "plan" => Ok(Section::Treatment),
            "analytics" | "bmi" => Ok(Section::Analytics),
            other => Err(HealthError::invalid_input(
                "section",
                format!("unknown section '{}'", other),
            )),
        }
    }
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One line of the chat transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatEntry {
    pub fn new(role: ChatRole, message: impl Into<String>) -> Self {
        Self {
            role,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Session manager maintaining REPL state
pub struct SessionManager {
    id: Uuid,
    current: Section,
    chat_history: VecDeque<ChatEntry>,
    max_history: usize,
    profile: Option<PatientProfile>,
    last_bmi: Option<BmiResult>,
    started: Instant,
}

impl SessionManager {
    /// Create new session manager
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    /// Create a session whose chat transcript keeps at most `max_history` entries
    pub fn with_max_history(max_history: usize) -> Self {
        let max_history = max_history.max(1);
        SessionManager {
            id: Uuid::new_v4(),
            current: Section::Dashboard,
            chat_history: VecDeque::with_capacity(max_history.min(DEFAULT_MAX_HISTORY)),
            max_history,
            profile: None,
            last_bmi: None,
            started: Instant::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_section(&self) -> Section {
        self.current
    }

    /// Switch the active section. Returns the previous one.
    pub fn switch_section(&mut self, section: Section) -> Section {
        std::mem::replace(&mut self.current, section)
    }

    /// Append to the chat transcript, evicting the oldest entry at capacity
    pub fn record_chat(&mut self, entry: ChatEntry) {
        if self.chat_history.len() >= self.max_history {
            self.chat_history.pop_front();
        }
        self.chat_history.push_back(entry);
    }

    /// Most recent `limit` entries, oldest first
    pub fn recent_chat(&self, limit: usize) -> Vec<&ChatEntry> {
        let skip = self.chat_history.len().saturating_sub(limit);
        self.chat_history.iter().skip(skip).collect()
    }

    pub fn chat_len(&self) -> usize {
        self.chat_history.len()
    }

    pub fn set_profile(&mut self, profile: PatientProfile) {
        self.profile = Some(profile);
    }

    pub fn profile(&self) -> Option<&PatientProfile> {
        self.profile.as_ref()
    }

    pub fn set_last_bmi(&mut self, result: BmiResult) {
        self.last_bmi = Some(result);
    }

    pub fn last_bmi(&self) -> Option<&BmiResult> {
        self.last_bmi.as_ref()
    }

    /// Clear session state (reset). The active section is kept.
    pub fn reset(&mut self) {
        self.chat_history.clear();
        self.profile = None;
        self.last_bmi = None;
        self.started = Instant::now();
    }

    /// Get session duration in seconds
    pub fn session_duration(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    /// Check if anything has been recorded
    pub fn has_context(&self) -> bool {
        !self.chat_history.is_empty() || self.profile.is_some() || self.last_bmi.is_some()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
