//! Body-mass-index evaluator
//!
//! Pure computation: a height/weight measurement in, a BMI value and its
//! category band out. No I/O, no state.

pub mod evaluator;
pub mod types;

pub use evaluator::{classify, compute};
pub use types::{BmiCategory, BmiResult, Measurement, Severity};
