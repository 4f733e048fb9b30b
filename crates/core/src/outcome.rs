//! Alert outcome: the single decision produced per snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reason::{AlertReason, ReasonKind};
use crate::tier::AlertTier;

/// Result of classifying one snapshot.
///
/// This is *not* a notification. It is an immutable decision that presentation
/// and dispatch layers render or forward; persisting history is the caller's job.
///
/// Reasons are ordered most severe first and contain no duplicate `ReasonKind`.
/// Build it with the aggregator, which establishes that ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertOutcome {
    tier: AlertTier,
    reasons: Vec<AlertReason>,
    timestamp: DateTime<Utc>,
}

impl AlertOutcome {
    /// Assemble an outcome from already-ordered parts.
    ///
    /// No reordering happens here; `reasons` must already be sorted and deduplicated.
    pub fn new(tier: AlertTier, reasons: Vec<AlertReason>, timestamp: DateTime<Utc>) -> Self {
        Self {
            tier,
            reasons,
            timestamp,
        }
    }

    /// Outcome with nothing triggered.
    pub fn normal(timestamp: DateTime<Utc>) -> Self {
        Self::new(AlertTier::Normal, Vec::new(), timestamp)
    }

    pub fn tier(&self) -> AlertTier {
        self.tier
    }

    pub fn reasons(&self) -> &[AlertReason] {
        &self.reasons
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_alert(&self) -> bool {
        self.tier.is_alert()
    }

    pub fn reason_kinds(&self) -> Vec<ReasonKind> {
        self.reasons.iter().map(|r| r.kind).collect()
    }
}
