//! Simulated response latency
//!
//! Each reply kind waits `base + uniform(0..=jitter)` milliseconds, scaled by
//! the configured factor, before it is returned.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::responses::pools::ResponseKind;

/// Delay window for one reply kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyWindow {
    pub base_ms: u64,
    pub jitter_ms: u64,
}

impl LatencyWindow {
    pub const fn new(base_ms: u64, jitter_ms: u64) -> Self {
        Self { base_ms, jitter_ms }
    }

    /// Draw a delay inside the window
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            rng.gen_range(0..=self.jitter_ms)
        };
        Duration::from_millis(self.base_ms + jitter)
    }

    /// Longest possible delay
    pub fn max(&self) -> Duration {
        Duration::from_millis(self.base_ms + self.jitter_ms)
    }
}

/// Delay settings for all reply kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyProfile {
    pub chat: LatencyWindow,
    pub symptoms: LatencyWindow,
    pub treatment: LatencyWindow,
    /// Multiplier applied to every sampled delay (0.0 disables waiting)
    pub scale: f64,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            chat: LatencyWindow::new(2000, 1000),
            symptoms: LatencyWindow::new(2500, 1000),
            treatment: LatencyWindow::new(3000, 1000),
            scale: 1.0,
        }
    }
}

impl LatencyProfile {
    /// Profile that never waits
    pub fn instant() -> Self {
        Self {
            scale: 0.0,
            ..Self::default()
        }
    }

    /// Default windows with a custom scale
    pub fn scaled(scale: f64) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    pub fn window(&self, kind: ResponseKind) -> LatencyWindow {
        match kind {
            ResponseKind::Chat => self.chat,
            ResponseKind::Symptoms => self.symptoms,
            ResponseKind::Treatment => self.treatment,
        }
    }

    /// Sampled and scaled delay for `kind`
    pub fn delay_for<R: Rng + ?Sized>(&self, kind: ResponseKind, rng: &mut R) -> Duration {
        if self.scale <= 0.0 {
            return Duration::ZERO;
        }
        self.window(kind).sample(rng).mul_f64(self.scale)
    }

    pub fn is_instant(&self) -> bool {
        self.scale <= 0.0
    }
}
