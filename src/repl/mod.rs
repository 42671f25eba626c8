//! REPL (Read-Eval-Print Loop) for the interactive assistant
//!
//! Owns the assistant and the session state. Slash commands are handled by
//! [`CommandHandler`]; any other input goes to the active section.

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use crate::assistant::{Assistant, PatientProfile};
use crate::errors::HealthError;
use crate::repl::commands::{is_command, CommandHandler, Flow};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::InputHandler;
pub use crate::repl::input::ReadOutcome;
pub use crate::repl::session::{ChatEntry, ChatRole, Section, SessionManager};

/// Configuration for REPL mode
#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub history_file: Option<PathBuf>,
    pub show_spinner: bool,
    pub max_history: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            history_file: None,
            show_spinner: true,
            max_history: session::DEFAULT_MAX_HISTORY,
        }
    }
}

impl ReplConfig {
    /// Create config with history file
    pub fn with_history(path: PathBuf) -> Self {
        ReplConfig {
            history_file: Some(path),
            ..Default::default()
        }
    }
}

/// REPL session coordinator
pub struct ReplSession {
    input_handler: InputHandler,
    command_handler: CommandHandler,
    session_manager: SessionManager,
    display_manager: DisplayManager,
    assistant: Assistant,
}

impl ReplSession {
    /// Create new REPL session
    pub fn new(assistant: Assistant, config: ReplConfig) -> Result<Self> {
        Ok(ReplSession {
            input_handler: InputHandler::open(config.history_file)?,
            command_handler: CommandHandler::new(),
            session_manager: SessionManager::with_max_history(config.max_history),
            display_manager: DisplayManager::new().with_spinner(config.show_spinner),
            assistant,
        })
    }

    /// Show welcome banner
    pub fn show_welcome(&self, version: &str) {
        self.display_manager.show_banner(version);
    }

    /// Read a line of input from user
    pub fn read_input(&mut self) -> Result<ReadOutcome> {
        self.input_handler.set_section(self.session_manager.current_section());
        self.input_handler.read_line()
    }

    /// Handle user input (command or section input)
    ///
    /// Returns true if session should continue, false to exit
    pub async fn handle_input(&mut self, input: &str) -> Result<bool> {
        if input.trim().is_empty() {
            return Ok(true);
        }

        if !is_command(input) {
            self.submit(input).await?;
            return Ok(true);
        }

        let command = self.command_handler.parse(input);
        debug!(?command, "REPL command");
        let flow = self.command_handler.execute(
            command,
            &mut self.session_manager,
            self.assistant.telemetry(),
        )?;

        match flow {
            Flow::Continue => Ok(true),
            Flow::Exit => Ok(false),
            Flow::Submit(text) => {
                self.submit(&text).await?;
                Ok(true)
            }
        }
    }

    /// Route free text to the active section
    pub async fn submit(&mut self, text: &str) -> Result<()> {
        let outcome = match self.session_manager.current_section() {
            Section::Dashboard => {
                self.display_manager
                    .show_info(Section::Dashboard.input_hint());
                Ok(())
            }
            Section::Chat => self.ask(text).await,
            Section::Prediction => self.predict(text).await,
            Section::Treatment => self.treatment_form(text).await,
            Section::Analytics => self.calculate_bmi(text),
        };

        self.display_manager.finish_current();
        self.report(outcome)
    }

    /// Submit a complete treatment profile
    pub async fn submit_treatment(&mut self, profile: PatientProfile) -> Result<()> {
        let outcome = self.plan(profile).await;
        self.display_manager.finish_current();
        self.report(outcome)
    }

    async fn ask(&mut self, message: &str) -> crate::Result<()> {
        self.display_manager.start_waiting("HealthAI is thinking...");
        let reply = self.assistant.chat(message).await?;
        self.display_manager.finish_current();

        self.session_manager
            .record_chat(ChatEntry::new(ChatRole::User, message.trim()));
        self.session_manager
            .record_chat(ChatEntry::new(ChatRole::Assistant, reply.text()));
        self.display_manager.show_chat_reply(&reply);
        Ok(())
    }

    async fn predict(&mut self, symptoms: &str) -> crate::Result<()> {
        self.display_manager.start_waiting("Analyzing symptoms...");
        let analysis = self.assistant.analyze_symptoms(symptoms).await?;
        self.display_manager.finish_current();
        self.display_manager.show_analysis(&analysis);
        Ok(())
    }

    async fn treatment_form(&mut self, condition: &str) -> crate::Result<()> {
        let Some(age) = self.field("Age (1-120)")? else {
            return Ok(());
        };
        let Some(gender) = self.field("Gender (Male/Female/Other/Prefer not to say)")? else {
            return Ok(());
        };
        let Some(history) = self.field("Medical history (optional)")? else {
            return Ok(());
        };

        let profile = PatientProfile::parse(condition, &age, &gender, &history)?;
        self.plan(profile).await
    }

    async fn plan(&mut self, profile: PatientProfile) -> crate::Result<()> {
        self.session_manager.set_profile(profile.clone());
        self.display_manager.start_waiting("Generating treatment plan...");
        let plan = self.assistant.treatment_plan(&profile).await?;
        self.display_manager.finish_current();
        self.display_manager.show_plan(&plan);
        Ok(())
    }

    fn calculate_bmi(&mut self, text: &str) -> crate::Result<()> {
        let parts: Vec<&str> = text
            .split(|c: char| c.is_whitespace() || c == ',' || c == '/')
            .filter(|p| !p.is_empty())
            .collect();
        let height = parts.first().copied().unwrap_or_default();
        // extra tokens stay with the weight so it fails to parse
        let weight = parts.get(1..).map(|rest| rest.join(" ")).unwrap_or_default();

        let result = self.assistant.bmi_from_text(height, &weight)?;
        self.session_manager.set_last_bmi(result);
        self.display_manager.show_bmi(&result);
        Ok(())
    }

    /// Read one form field; `None` abandons the form
    fn field(&mut self, label: &str) -> crate::Result<Option<String>> {
        match self.input_handler.read_field(label)? {
            ReadOutcome::Line(value) => Ok(Some(value)),
            ReadOutcome::Interrupted | ReadOutcome::Eof => {
                self.display_manager.show_info("Treatment form cancelled");
                Ok(None)
            }
        }
    }

    /// Input errors are shown and swallowed; anything else propagates
    fn report(&self, outcome: crate::Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(HealthError::InvalidInput { field, reason }) => {
                self.display_manager
                    .show_warning(&format!("{} ({})", reason, field));
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Get session manager (immutable)
    pub fn session(&self) -> &SessionManager {
        &self.session_manager
    }

    /// Get display manager
    pub fn display(&self) -> &DisplayManager {
        &self.display_manager
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.command_handler.is_verbose()
    }

    /// Set verbose mode
    pub fn set_verbose(&mut self, enable: bool) {
        self.command_handler.set_verbose(enable);
    }

    /// Save line history
    pub fn save(&mut self) -> Result<()> {
        self.input_handler.save_history()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{AssistantConfig, Gender};
    use crate::bmi::BmiCategory;

    fn repl() -> ReplSession {
        let assistant = Assistant::new(AssistantConfig::instant(Some(1)));
        let config = ReplConfig {
            show_spinner: false,
            ..Default::default()
        };
        ReplSession::new(assistant, config).unwrap()
    }

    #[tokio::test]
    async fn test_handle_empty_input() {
        let mut session = repl();
        assert!(session.handle_input("").await.unwrap());
        assert!(session.handle_input("   ").await.unwrap());
    }

    #[tokio::test]
    async fn test_handle_exit_command() {
        let mut session = repl();
        assert!(!session.handle_input("/exit").await.unwrap());
    }

    #[tokio::test]
    async fn test_chat_records_transcript() {
        let mut session = repl();
        session.handle_input("/chat").await.unwrap();
        session.handle_input("Is walking good exercise?").await.unwrap();

        assert_eq!(session.session().chat_len(), 2);
        let recent = session.session().recent_chat(2);
        assert_eq!(recent[0].role, ChatRole::User);
        assert_eq!(recent[0].message, "Is walking good exercise?");
        assert_eq!(recent[1].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn test_bmi_command_with_values() {
        let mut session = repl();
        session.handle_input("/bmi 165 100").await.unwrap();

        assert_eq!(session.session().current_section(), Section::Analytics);
        let last = session.session().last_bmi().unwrap();
        assert_eq!(last.category, BmiCategory::Obese);
    }

    #[tokio::test]
    async fn test_bmi_free_text_separators() {
        let mut session = repl();
        session.handle_input("/bmi").await.unwrap();
        session.handle_input("180, 95").await.unwrap();
        assert_eq!(
            session.session().last_bmi().unwrap().category,
            BmiCategory::Overweight
        );
    }

    #[tokio::test]
    async fn test_invalid_bmi_does_not_crash() {
        let mut session = repl();
        assert!(session.handle_input("/bmi 0 70").await.unwrap());
        assert!(session.handle_input("/bmi 170").await.unwrap());
        assert!(session.handle_input("/bmi 170 70 12").await.unwrap());
        assert!(session.session().last_bmi().is_none());
        assert_eq!(session.assistant().telemetry().get_stats().inputs_rejected, 3);
    }

    #[tokio::test]
    async fn test_blank_symptoms_rejected_gracefully() {
        let mut session = repl();
        session.handle_input("/predict").await.unwrap();
        assert!(session.submit("  ").await.is_ok());
        assert_eq!(session.assistant().telemetry().get_stats().analyses_generated, 0);
    }

    #[tokio::test]
    async fn test_symptoms_analyzed() {
        let mut session = repl();
        session.handle_input("/predict").await.unwrap();
        session.handle_input("joint pain, stiffness").await.unwrap();
        assert_eq!(session.assistant().telemetry().get_stats().analyses_generated, 1);
    }

    #[tokio::test]
    async fn test_submit_treatment_stores_profile() {
        let mut session = repl();
        let profile = PatientProfile::new("hypertension", 55, Gender::Male, None).unwrap();
        session.submit_treatment(profile).await.unwrap();

        assert_eq!(session.session().profile().unwrap().condition, "hypertension");
        assert_eq!(session.assistant().telemetry().get_stats().plans_generated, 1);
    }

    #[tokio::test]
    async fn test_dashboard_input_is_hint_only() {
        let mut session = repl();
        session.handle_input("hello").await.unwrap();
        assert_eq!(session.session().chat_len(), 0);
        assert_eq!(session.assistant().telemetry().get_stats().total_requests(), 0);
    }

    #[tokio::test]
    async fn test_reset_clears_session() {
        let mut session = repl();
        session.handle_input("/bmi 170 70").await.unwrap();
        session.handle_input("/reset").await.unwrap();
        assert!(!session.session().has_context());
        assert_eq!(session.assistant().telemetry().get_stats().bmi_calculations, 0);
    }

    #[test]
    fn test_verbose_mode() {
        let mut session = repl();
        assert!(!session.is_verbose());
        session.set_verbose(true);
        assert!(session.is_verbose());
    }

    #[test]
    fn test_repl_config_default() {
        let config = ReplConfig::default();
        assert!(config.show_spinner);
        assert!(config.history_file.is_none());
        assert_eq!(config.max_history, session::DEFAULT_MAX_HISTORY);
    }

    #[test]
    fn test_repl_config_with_history() {
        let path = PathBuf::from("/tmp/history");
        let config = ReplConfig::with_history(path.clone());
        assert_eq!(config.history_file, Some(path));
    }
}
