//! Display manager for the terminal UI
//!
//! Renders assistant replies, BMI results and the waiting spinner.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::assistant::{ChatReply, SymptomAnalysis, TreatmentPlan};
use crate::bmi::{BmiResult, Severity};
use crate::repl::session::Section;

/// Display manager for REPL UI
pub struct DisplayManager {
    current_bar: Option<ProgressBar>,
    update_interval: Duration,
    show_spinner: bool,
}

impl DisplayManager {
    /// Create new display manager
    pub fn new() -> Self {
        DisplayManager {
            current_bar: None,
            update_interval: Duration::from_millis(100),
            show_spinner: true,
        }
    }

    /// Enable or disable the waiting spinner
    pub fn with_spinner(mut self, enabled: bool) -> Self {
        self.show_spinner = enabled;
        self
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str) {
        let width = 64;
        let rule = "=".repeat(width).cyan();
        let title = format!("  HealthAI {} - Intelligent Healthcare Assistant", version);
        let info = "  Demo mode: all answers are canned examples";

        println!("\n{}", rule);
        println!("{}", title.bold().cyan());
        println!("{}", info.dimmed());
        println!("{}\n", rule);
        println!("{}\n", "Educational use only. Not a substitute for professional medical advice.".yellow());
        self.show_dashboard();
        println!("Type {} for commands, {} to quit\n", "/help".green(), "/exit".green());
    }

    /// Feature cards shown on the dashboard
    pub fn show_dashboard(&self) {
        let cards = [
            (Section::Chat, "/chat", "Ask general health questions"),
            (Section::Prediction, "/predict", "Describe symptoms for an analysis"),
            (Section::Treatment, "/treatment", "Get general treatment guidance"),
            (Section::Analytics, "/bmi", "Calculate your body mass index"),
        ];
        for (section, cmd, desc) in cards {
            println!("  {:<12} {:<20} {}", cmd.green(), section.title().bold(), desc.dimmed());
        }
        println!();
    }

    /// Start the "thinking" spinner while a reply is pending
    pub fn start_waiting(&mut self, message: &str) -> Option<ProgressBar> {
        self.finish_current();
        if !self.show_spinner {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(self.update_interval);

        self.current_bar = Some(pb.clone());
        Some(pb)
    }

    /// Finish current spinner
    pub fn finish_current(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Render a chat answer
    pub fn show_chat_reply(&self, reply: &ChatReply) {
        println!("\n{} {}", "🩺".cyan(), "HealthAI:".bold().cyan());
        println!("{}\n", reply.answer);
        self.show_disclaimer(&reply.disclaimer);
    }

    /// Render a symptom analysis
    pub fn show_analysis(&self, analysis: &SymptomAnalysis) {
        self.show_section("Symptom Analysis");
        println!("{}", analysis.analysis);

        self.show_section("General Recommendations");
        for rec in &analysis.recommendations {
            self.show_bullet(rec);
        }
        println!();
        self.show_disclaimer(&analysis.disclaimer);
    }

    /// Render a treatment plan
    pub fn show_plan(&self, plan: &TreatmentPlan) {
        self.show_section("Patient Profile");
        println!("  {} {}", "Condition:".bold(), plan.condition);
        println!("  {} {} years", "Age:".bold(), plan.age);
        println!("  {} {}", "Gender:".bold(), plan.gender);
        println!("  {} {}", "History:".bold(), plan.medical_history);

        self.show_section("Treatment Approach");
        println!("{}", plan.plan);

        self.show_section("Key Treatment Points");
        for (i, point) in plan.key_points.iter().enumerate() {
            self.show_numbered(i + 1, point);
        }
        println!();
        self.show_disclaimer(&plan.disclaimer);
    }

    /// Render a BMI result, coloured by category severity
    pub fn show_bmi(&self, result: &BmiResult) {
        let category = format!("Category: {}", result.category);
        let category = match result.category.severity() {
            Severity::Healthy => category.green(),
            Severity::Caution => category.yellow(),
            Severity::Alert => category.red(),
        };

        println!("\n  {}", format!("BMI: {}", result.rounded()).bold());
        println!("  {}\n", category.bold());
    }

    /// Render the medical disclaimer block
    pub fn show_disclaimer(&self, disclaimer: &str) {
        println!("{}", "Medical Disclaimer".red().bold());
        println!("{}\n", disclaimer.dimmed());
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    /// Show section header
    pub fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(60).cyan());
    }

    /// Show bullet point
    pub fn show_bullet(&self, text: &str) {
        println!("  {} {}", "•".cyan(), text);
    }

    /// Show numbered item
    pub fn show_numbered(&self, index: usize, text: &str) {
        println!("  {}. {}", index.to_string().cyan(), text);
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}
