//! Alert tiers.

use serde::{Deserialize, Serialize};

/// Severity tier of an alert. Total order: `Normal < Low < Moderate < High`.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AlertTier {
    #[default]
    Normal,
    Low,
    Moderate,
    High,
}

impl AlertTier {
    pub const ALL: [AlertTier; 4] = [
        AlertTier::Normal,
        AlertTier::Low,
        AlertTier::Moderate,
        AlertTier::High,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlertTier::Normal => "NORMAL",
            AlertTier::Low => "LOW",
            AlertTier::Moderate => "MODERATE",
            AlertTier::High => "HIGH",
        }
    }

    /// Whether this tier warrants notifying operators.
    pub fn is_alert(self) -> bool {
        self > AlertTier::Normal
    }
}

impl core::fmt::Display for AlertTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
