//! Telemetry for HealthAI
//!
//! Tracing subscriber setup plus an in-memory usage collector that feeds the
//! `/status` display. Nothing is written to disk.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use crate::bmi::BmiCategory;
use crate::cli::Verbosity;

/// Assistant feature a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Chat,
    Prediction,
    Treatment,
    Analytics,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Chat => write!(f, "chat"),
            Feature::Prediction => write!(f, "prediction"),
            Feature::Treatment => write!(f, "treatment"),
            Feature::Analytics => write!(f, "analytics"),
        }
    }
}

/// Telemetry event types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    Answered {
        feature: Feature,
    },
    BmiCalculated {
        category: BmiCategory,
    },
    InputRejected {
        feature: Feature,
    },
}

impl fmt::Display for TelemetryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryEvent::Answered { feature } => write!(f, "{} answered", feature),
            TelemetryEvent::BmiCalculated { category } => write!(f, "BMI calculated ({})", category),
            TelemetryEvent::InputRejected { feature } => write!(f, "{} input rejected", feature),
        }
    }
}

/// Telemetry statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryStats {
    pub questions_answered: usize,
    pub analyses_generated: usize,
    pub plans_generated: usize,
    pub bmi_calculations: usize,
    pub inputs_rejected: usize,
    /// Indexed in `BmiCategory::ALL` order
    pub bmi_by_category: [usize; 4],
}

impl TelemetryStats {
    pub fn total_requests(&self) -> usize {
        self.questions_answered
            + self.analyses_generated
            + self.plans_generated
            + self.bmi_calculations
    }
}

/// Events kept for `/status`; older ones are dropped
pub const MAX_EVENTS: usize = 256;

/// Telemetry collector
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<VecDeque<(Instant, TelemetryEvent)>>>,
    stats: Arc<Mutex<TelemetryStats>>,
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_EVENTS))),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        if let Ok(mut stats) = self.stats.lock() {
            match &event {
                TelemetryEvent::Answered { feature } => match feature {
                    Feature::Chat => stats.questions_answered += 1,
                    Feature::Prediction => stats.analyses_generated += 1,
                    Feature::Treatment => stats.plans_generated += 1,
                    Feature::Analytics => stats.bmi_calculations += 1,
                },
                TelemetryEvent::BmiCalculated { category } => {
                    stats.bmi_calculations += 1;
                    if let Some(idx) = BmiCategory::ALL.iter().position(|c| c == category) {
                        stats.bmi_by_category[idx] += 1;
                    }
                }
                TelemetryEvent::InputRejected { .. } => {
                    stats.inputs_rejected += 1;
                }
            }
        }

        if let Ok(mut events) = self.events.lock() {
            if events.len() >= MAX_EVENTS {
                events.pop_front();
            }
            events.push_back((Instant::now(), event));
        }
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        match self.events.lock() {
            Ok(events) => {
                let start = events.len().saturating_sub(n);
                events.iter().skip(start).map(|(_, e)| e.clone()).collect()
            }
            Err(_) => Vec::new(),
        }
    }

    /// Forget everything recorded so far
    pub fn reset(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
        if let Ok(mut stats) = self.stats.lock() {
            *stats = TelemetryStats::default();
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Default filter directive for a verbosity level
pub fn filter_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "healthai=info",
        Verbosity::VeryVerbose => "healthai=debug",
    }
}

/// Install the global tracing subscriber. `RUST_LOG` takes precedence.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
