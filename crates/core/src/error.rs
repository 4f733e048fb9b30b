//! Risk model error type.

use thiserror::Error;

/// Result type used across the classification layer.
pub type RiskResult<T> = Result<T, RiskError>;

/// Classification-level error.
///
/// The core performs no I/O, so failures are limited to unusable inputs.
/// Out-of-domain parameter values are *not* errors; they are evaluated as given.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RiskError {
    /// The snapshot carries no usable parameter (collection failed entirely).
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A threshold policy failed validation.
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
}

impl RiskError {
    pub fn invalid_snapshot(msg: impl Into<String>) -> Self {
        Self::InvalidSnapshot(msg.into())
    }

    pub fn invalid_policy(msg: impl Into<String>) -> Self {
        Self::InvalidPolicy(msg.into())
    }

    pub fn is_invalid_snapshot(&self) -> bool {
        matches!(self, Self::InvalidSnapshot(_))
    }
}
