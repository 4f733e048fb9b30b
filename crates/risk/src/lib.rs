//! `spacewx-risk`
//!
//! **Responsibility:** turn a space-weather snapshot into one alert decision.
//!
//! This crate is intentionally pure:
//! - It performs no I/O and reads no clock.
//! - Thresholds live in an explicit `ThresholdPolicy` value passed to every call;
//!   there is no process-wide default state.
//! - It emits **alert outcomes**, not notifications. Dispatch belongs to callers.

pub mod aggregator;
pub mod classifier;
pub mod policy;

pub use aggregator::aggregate;
pub use classifier::{RiskClassifier, classify};
pub use policy::{ThresholdPolicy, ThresholdRule};
