//! Command-line argument parsing for HealthAI
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HealthAI - canned health-information assistant with a BMI calculator
#[derive(Parser, Debug)]
#[command(name = "healthai")]
#[command(version)]
#[command(about = "Demo health assistant: chat, symptom analysis, treatment plans and BMI", long_about = None)]
pub struct Args {
    /// Health question to ask once (no subcommand)
    #[arg(value_name = "QUESTION")]
    pub question: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip the simulated response delay
    #[arg(long, global = true)]
    pub no_delay: bool,

    /// Seed for reproducible reply selection
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress everything except results)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start interactive mode
    Start,

    /// Calculate body mass index
    Bmi {
        /// Height in centimeters
        #[arg(long)]
        height: String,

        /// Weight in kilograms
        #[arg(long)]
        weight: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze described symptoms
    Predict {
        /// Symptoms, e.g. "fever, headache, body aches"
        #[arg(value_name = "SYMPTOMS")]
        symptoms: String,
    },

    /// Generate a treatment plan
    Treatment {
        /// Medical condition
        #[arg(long)]
        condition: String,

        /// Age in years (1-120)
        #[arg(long)]
        age: String,

        /// Male, Female, Other or "Prefer not to say"
        #[arg(long)]
        gender: String,

        /// Previous conditions, allergies, medications
        #[arg(long, default_value = "")]
        history: String,
    },

    /// Display current configuration
    Config,

    /// Print the medical disclaimer
    Disclaimer,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Verbosity from flags, falling back to the configured level when no
    /// flag was given
    pub fn verbosity_or(&self, configured: Verbosity) -> Verbosity {
        if self.quiet || self.verbose > 0 {
            self.verbosity()
        } else {
            configured
        }
    }

    /// A question and a subcommand are mutually exclusive
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_some() && self.question.is_some() {
            return Err("Cannot specify a question with a subcommand.".to_string());
        }

        Ok(())
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Parse the configuration file spelling
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Check if should show the waiting spinner
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show detailed events
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}
