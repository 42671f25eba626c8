//! Command handler for REPL built-in commands
//!
//! Slash commands navigate between sections and inspect session state.
//! Anything else typed at the prompt is routed to the active section.

use anyhow::Result;
use colored::*;
use crossterm::{
    cursor,
    execute,
    terminal::{Clear, ClearType},
};
use std::io;

use crate::bmi::BmiCategory;
use crate::repl::session::{ChatRole, Section, SessionManager};
use crate::responses::MEDICAL_DISCLAIMER;
use crate::telemetry::TelemetryCollector;

/// Events listed by `/status` in verbose mode
const RECENT_EVENTS: usize = 5;

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Go { section: Section },
    /// `/bmi` optionally followed by height and weight
    Bmi { input: Option<String> },
    History { limit: Option<usize> },
    Status,
    Profile,
    Disclaimer,
    Reset,
    Exit,
    Verbose { enable: bool },
    Clear,
    Unknown { input: String },
}

/// What the REPL loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
    /// Feed this text to the active section's handler
    Submit(String),
}

/// Command handler for parsing and executing REPL commands
pub struct CommandHandler {
    verbose: bool,
}

impl CommandHandler {
    /// Create new command handler
    pub fn new() -> Self {
        CommandHandler { verbose: false }
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        let Some(body) = trimmed.strip_prefix('/') else {
            return Command::Unknown { input: input.to_string() };
        };

        let parts: Vec<&str> = body.split_whitespace().collect();
        if parts.is_empty() {
            return Command::Unknown { input: input.to_string() };
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            "go" => match parts.get(1).and_then(|s| s.parse().ok()) {
                Some(section) => Command::Go { section },
                None => Command::Unknown { input: input.to_string() },
            },
            "dashboard" | "home" => Command::Go { section: Section::Dashboard },
            "chat" => Command::Go { section: Section::Chat },
            "predict" | "prediction" | "symptoms" => Command::Go { section: Section::Prediction },
            "treatment" | "plan" => Command::Go { section: Section::Treatment },
            "bmi" | "analytics" => {
                let rest = parts[1..].join(" ");
                Command::Bmi {
                    input: if rest.is_empty() { None } else { Some(rest) },
                }
            }
            "history" => {
                let limit = parts.get(1).and_then(|s| s.parse().ok());
                Command::History { limit }
            }
            "status" => Command::Status,
            "profile" => Command::Profile,
            "disclaimer" => Command::Disclaimer,
            "reset" => Command::Reset,
            "verbose" => {
                let enable = parts
                    .get(1)
                    .map(|s| s.to_lowercase() == "on" || s == &"1" || s == &"true")
                    .unwrap_or(true);
                Command::Verbose { enable }
            }
            "clear" | "cls" => Command::Clear,
            _ => Command::Unknown { input: input.to_string() },
        }
    }

    /// Execute a command
    pub fn execute(
        &mut self,
        command: Command,
        session: &mut SessionManager,
        telemetry: &TelemetryCollector,
    ) -> Result<Flow> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(Flow::Continue)
            }
            Command::Exit => {
                println!("{}", "Take care. Goodbye!".green());
                Ok(Flow::Exit)
            }
            Command::Go { section } => {
                self.enter(session, section);
                Ok(Flow::Continue)
            }
            Command::Bmi { input } => {
                if session.current_section() != Section::Analytics {
                    self.enter(session, Section::Analytics);
                }
                Ok(input.map(Flow::Submit).unwrap_or(Flow::Continue))
            }
            Command::History { limit } => {
                self.show_history(session, limit.unwrap_or(10));
                Ok(Flow::Continue)
            }
            Command::Status => {
                self.show_status(session, telemetry);
                Ok(Flow::Continue)
            }
            Command::Profile => {
                self.show_profile(session);
                Ok(Flow::Continue)
            }
            Command::Disclaimer => {
                println!("\n{}\n", MEDICAL_DISCLAIMER.yellow());
                Ok(Flow::Continue)
            }
            Command::Reset => {
                session.reset();
                telemetry.reset();
                println!("{}", "Session reset. History cleared.".yellow());
                Ok(Flow::Continue)
            }
            Command::Verbose { enable } => {
                self.verbose = enable;
                let status = if enable { "enabled" } else { "disabled" };
                println!("{}", format!("Verbose mode {}", status).cyan());
                Ok(Flow::Continue)
            }
            Command::Clear => {
                execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))?;
                Ok(Flow::Continue)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(Flow::Continue)
            }
        }
    }

    fn enter(&self, session: &mut SessionManager, section: Section) {
        session.switch_section(section);
        println!("\n{} {}", "→".cyan(), section.title().bold().cyan());
        println!("  {}\n", section.input_hint().dimmed());
    }

    /// Display help information
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = [
            ("/help, /h", "Show this help message"),
            ("/chat", "Patient chat: ask health questions"),
            ("/predict", "Disease prediction from symptoms"),
            ("/treatment", "Treatment plan form"),
            ("/bmi [h w]", "BMI calculator (height cm, weight kg)"),
            ("/dashboard", "Back to the dashboard"),
            ("/go <section>", "Switch section by name"),
            ("/history [n]", "Show last n chat messages (default: 10)"),
            ("/status", "Show session status and statistics"),
            ("/profile", "Show the last treatment profile"),
            ("/disclaimer", "Show the medical disclaimer"),
            ("/reset", "Clear session history"),
            ("/verbose [on|off]", "Toggle verbose output"),
            ("/clear, /cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<20} {}", cmd.green(), desc);
        }

        println!("\n{}", "Usage:".bold());
        println!("  - Type without a / prefix to use the active section");
        println!("  - Use {} for input history", "UP/DOWN arrows".cyan());
        println!("  - Press {} or {} to exit", "Ctrl-D".cyan(), "/exit".cyan());
        println!();
    }

    /// Display chat transcript
    fn show_history(&self, session: &SessionManager, limit: usize) {
        let history = session.recent_chat(limit);

        if history.is_empty() {
            println!("{}", "No chat messages yet.".yellow());
            return;
        }

        println!("\n{}", format!("Chat History (last {}):", history.len()).bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        for entry in history {
            let who = match entry.role {
                ChatRole::User => "You".green().bold(),
                ChatRole::Assistant => "HealthAI".cyan().bold(),
            };
            let time = entry.timestamp.format("%H:%M:%S").to_string().dimmed();
            let message = if self.verbose {
                entry.message.clone()
            } else {
                first_line(&entry.message)
            };
            println!("  {} {} {}", time, who, message);
        }
        println!();
    }

    /// Display session status
    fn show_status(&self, session: &SessionManager, telemetry: &TelemetryCollector) {
        println!("\n{}", "Session Status:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let duration = session.session_duration();
        let hours = duration / 3600;
        let minutes = (duration % 3600) / 60;
        let seconds = duration % 60;

        let duration_str = if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        };

        let stats = telemetry.get_stats();

        println!("  Session:          {}", session.id().to_string().dimmed());
        println!("  Section:          {}", session.current_section().title().green());
        println!("  Questions:        {}", stats.questions_answered.to_string().green());
        println!("  Analyses:         {}", stats.analyses_generated.to_string().green());
        println!("  Plans:            {}", stats.plans_generated.to_string().green());
        println!("  BMI Calculations: {}", stats.bmi_calculations.to_string().green());
        println!("  Rejected Inputs:  {}", stats.inputs_rejected.to_string().yellow());
        println!("  Chat Messages:    {}", session.chat_len().to_string().green());
        println!("  Session Duration: {}", duration_str.green());
        println!("  Verbose Mode:     {}", if self.verbose { "On".green() } else { "Off".red() });

        if self.verbose && stats.bmi_calculations > 0 {
            println!("  BMI by category:");
            for (category, count) in BmiCategory::ALL.iter().zip(stats.bmi_by_category) {
                println!("    {:<16} {}", category.label(), count);
            }
        }
        if let Some(bmi) = session.last_bmi() {
            println!("  Last BMI:         {} ({})", bmi.rounded().green(), bmi.category);
        }
        if self.verbose {
            let recent = telemetry.recent_events(RECENT_EVENTS);
            if !recent.is_empty() {
                println!("  Recent activity:");
                for event in recent {
                    println!("    {}", event.to_string().dimmed());
                }
            }
        }
        println!();
    }

    /// Display last submitted treatment profile
    fn show_profile(&self, session: &SessionManager) {
        let Some(profile) = session.profile() else {
            println!("{}", "No treatment profile submitted yet.".yellow());
            return;
        };

        println!("\n{}", "Patient Profile:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());
        println!("  Condition: {}", profile.condition);
        println!("  Age:       {} years", profile.age);
        println!("  Gender:    {}", profile.gender);
        println!("  History:   {}", profile.medical_history);
        println!();
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Set verbose mode
    pub fn set_verbose(&mut self, enable: bool) {
        self.verbose = enable;
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/')
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::session::ChatEntry;
    use crate::telemetry::{Feature, TelemetryEvent};

    #[test]
    fn test_is_command() {
        assert!(is_command("/help"));
        assert!(is_command(" /bmi"));
        assert!(!is_command("help"));
        assert!(!is_command("I have a headache"));
    }

    #[test]
    fn test_parse_help_and_exit() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/help"), Command::Help);
        assert_eq!(handler.parse("/h"), Command::Help);
        assert_eq!(handler.parse("/exit"), Command::Exit);
        assert_eq!(handler.parse("/quit"), Command::Exit);
        assert_eq!(handler.parse("/q"), Command::Exit);
    }

    #[test]
    fn test_parse_navigation() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/chat"), Command::Go { section: Section::Chat });
        assert_eq!(handler.parse("/predict"), Command::Go { section: Section::Prediction });
        assert_eq!(handler.parse("/treatment"), Command::Go { section: Section::Treatment });
        assert_eq!(handler.parse("/home"), Command::Go { section: Section::Dashboard });
        assert_eq!(handler.parse("/go analytics"), Command::Go { section: Section::Analytics });
        assert!(matches!(handler.parse("/go nowhere"), Command::Unknown { .. }));
    }

    #[test]
    fn test_parse_bmi() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/bmi"), Command::Bmi { input: None });
        assert_eq!(
            handler.parse("/bmi 170 70"),
            Command::Bmi { input: Some("170 70".to_string()) }
        );
    }

    #[test]
    fn test_parse_history() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/history"), Command::History { limit: None });
        assert_eq!(handler.parse("/history 5"), Command::History { limit: Some(5) });
    }

    #[test]
    fn test_parse_verbose() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/verbose"), Command::Verbose { enable: true });
        assert_eq!(handler.parse("/verbose on"), Command::Verbose { enable: true });
        assert_eq!(handler.parse("/verbose off"), Command::Verbose { enable: false });
    }

    #[test]
    fn test_parse_unknown() {
        let handler = CommandHandler::new();
        match handler.parse("/unknown") {
            Command::Unknown { input } => assert!(input.contains("unknown")),
            other => panic!("Expected Unknown command, got {:?}", other),
        }
        assert!(matches!(handler.parse("/"), Command::Unknown { .. }));
        assert!(matches!(handler.parse("plain text"), Command::Unknown { .. }));
    }

    #[test]
    fn test_execute_exit() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();
        let telemetry = TelemetryCollector::new();
        assert_eq!(handler.execute(Command::Exit, &mut session, &telemetry).unwrap(), Flow::Exit);
    }

    #[test]
    fn test_execute_go_switches_section() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();
        let telemetry = TelemetryCollector::new();
        let flow = handler
            .execute(Command::Go { section: Section::Prediction }, &mut session, &telemetry)
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(session.current_section(), Section::Prediction);
    }

    #[test]
    fn test_execute_bmi_with_values_submits() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();
        let telemetry = TelemetryCollector::new();
        let flow = handler
            .execute(Command::Bmi { input: Some("160 45".to_string()) }, &mut session, &telemetry)
            .unwrap();
        assert_eq!(flow, Flow::Submit("160 45".to_string()));
        assert_eq!(session.current_section(), Section::Analytics);
    }

    #[test]
    fn test_execute_reset() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();
        let telemetry = TelemetryCollector::new();
        session.record_chat(ChatEntry::new(ChatRole::User, "hi"));

        handler.execute(Command::Reset, &mut session, &telemetry).unwrap();
        assert_eq!(session.chat_len(), 0);
    }

    #[test]
    fn test_execute_verbose() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();
        let telemetry = TelemetryCollector::new();

        handler.execute(Command::Verbose { enable: true }, &mut session, &telemetry).unwrap();
        assert!(handler.is_verbose());
        handler.execute(Command::Verbose { enable: false }, &mut session, &telemetry).unwrap();
        assert!(!handler.is_verbose());
    }

    #[test]
    fn test_verbose_status_with_activity() {
        let mut handler = CommandHandler::new();
        handler.set_verbose(true);
        let mut session = SessionManager::new();
        let telemetry = TelemetryCollector::new();
        telemetry.record(TelemetryEvent::BmiCalculated { category: BmiCategory::Normal });
        telemetry.record(TelemetryEvent::InputRejected { feature: Feature::Chat });

        let flow = handler.execute(Command::Status, &mut session, &telemetry).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(telemetry.event_count(), 2);
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("answer\n\ndisclaimer"), "answer");
        assert_eq!(first_line(""), "");
    }
}
