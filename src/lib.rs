//! HealthAI - terminal demo of a health-information assistant
//!
//! # Architecture
//!
//! - **bmi**: body mass index calculation and category classification
//! - **responses**: canned reply pools and simulated latency windows
//! - **assistant**: input validation and canned chat, symptom and treatment replies
//! - **repl**: interactive shell with sections, commands and session state
//! - **cli**: argument parsing and TOML configuration
//! - **telemetry**: in-process usage counters and tracing setup
//!
//! Every answer is a fixed example text. Nothing here provides medical
//! advice.

pub mod assistant;
pub mod bmi;
pub mod cli;
pub mod errors;
pub mod repl;
pub mod responses;
pub mod telemetry;

pub use errors::{HealthError, Result};
