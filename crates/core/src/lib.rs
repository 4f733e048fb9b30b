//! `spacewx-core` — space-weather decision model.
//!
//! This crate contains **pure** value types (no I/O, no clocks, no global state):
//! the point-in-time parameter snapshot, alert tiers and reasons, the immutable
//! alert outcome, and the physical classification scales used for presentation.

pub mod comparison;
pub mod error;
pub mod outcome;
pub mod reason;
pub mod scale;
pub mod snapshot;
pub mod tier;

pub use comparison::Comparison;
pub use error::{RiskError, RiskResult};
pub use outcome::AlertOutcome;
pub use reason::{AlertReason, ReasonCategory, ReasonKind};
pub use scale::{ConditionsSummary, FlareClass, SatelliteStatus, StormLevel};
pub use snapshot::{Parameter, ParameterSnapshot};
pub use tier::AlertTier;
