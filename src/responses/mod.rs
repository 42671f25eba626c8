//! Canned response pools and simulated latency
//!
//! Every reply is a uniform pick from a fixed pool; there is no inference.

pub mod latency;
pub mod pools;

pub use latency::{LatencyProfile, LatencyWindow};
pub use pools::{
    pick, ResponseKind, MEDICAL_DISCLAIMER, SYMPTOM_RECOMMENDATIONS, TREATMENT_KEY_POINTS,
};
