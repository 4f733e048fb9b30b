//! Alert reasons: which rule fired, on what value.

use serde::{Deserialize, Serialize};

use crate::comparison::Comparison;
use crate::snapshot::Parameter;
use crate::tier::AlertTier;

/// Identifies the rule that fired.
///
/// Declaration order is the fixed tie-break order among reasons of equal tier
/// (flare, storm, satellite risk, solar wind, Bz, then X-ray flux).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReasonKind {
    FlareProbabilityHigh,
    FlareProbabilityModerate,
    KpStormStrong,
    KpStormMinor,
    SatelliteRiskHigh,
    SatelliteRiskModerate,
    HighSpeedStream,
    GeoeffectiveBz,
    XrayFlareExtreme,
    XrayFlareStrong,
}

/// Presentation grouping of reasons (one indicator per category on a dashboard).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCategory {
    SolarFlare,
    GeomagneticStorm,
    SatelliteRisk,
    SolarWind,
    ImfBz,
    XrayFlux,
}

impl ReasonCategory {
    pub fn label(self) -> &'static str {
        match self {
            ReasonCategory::SolarFlare => "Solar Flare",
            ReasonCategory::GeomagneticStorm => "Geomagnetic Storm",
            ReasonCategory::SatelliteRisk => "Satellite Risk",
            ReasonCategory::SolarWind => "Solar Wind",
            ReasonCategory::ImfBz => "IMF Bz",
            ReasonCategory::XrayFlux => "X-ray Flux",
        }
    }
}

impl ReasonKind {
    pub const ALL: [ReasonKind; 10] = [
        ReasonKind::FlareProbabilityHigh,
        ReasonKind::FlareProbabilityModerate,
        ReasonKind::KpStormStrong,
        ReasonKind::KpStormMinor,
        ReasonKind::SatelliteRiskHigh,
        ReasonKind::SatelliteRiskModerate,
        ReasonKind::HighSpeedStream,
        ReasonKind::GeoeffectiveBz,
        ReasonKind::XrayFlareExtreme,
        ReasonKind::XrayFlareStrong,
    ];

    pub fn category(self) -> ReasonCategory {
        match self {
            ReasonKind::FlareProbabilityHigh | ReasonKind::FlareProbabilityModerate => {
                ReasonCategory::SolarFlare
            }
            ReasonKind::KpStormStrong | ReasonKind::KpStormMinor => {
                ReasonCategory::GeomagneticStorm
            }
            ReasonKind::SatelliteRiskHigh | ReasonKind::SatelliteRiskModerate => {
                ReasonCategory::SatelliteRisk
            }
            ReasonKind::HighSpeedStream => ReasonCategory::SolarWind,
            ReasonKind::GeoeffectiveBz => ReasonCategory::ImfBz,
            ReasonKind::XrayFlareExtreme | ReasonKind::XrayFlareStrong => ReasonCategory::XrayFlux,
        }
    }
}

impl core::fmt::Display for ReasonKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

/// A fired rule together with the value that triggered it and the threshold it crossed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertReason {
    pub kind: ReasonKind,
    pub tier: AlertTier,
    pub parameter: Parameter,
    pub comparison: Comparison,
    pub value: f64,
    pub threshold: f64,
}

impl AlertReason {
    /// Operator-facing description of the condition.
    pub fn message(&self) -> String {
        let v = self.value;
        match self.kind {
            ReasonKind::FlareProbabilityHigh => {
                format!("High probability ({:.0}%) of solar flare", v * 100.0)
            }
            ReasonKind::FlareProbabilityModerate => {
                format!("Moderate probability ({:.0}%) of solar flare", v * 100.0)
            }
            ReasonKind::KpStormStrong => {
                format!("Strong geomagnetic storm in progress (Kp={v:.1})")
            }
            ReasonKind::KpStormMinor => format!("Minor geomagnetic storm conditions (Kp={v:.1})"),
            ReasonKind::SatelliteRiskHigh => {
                format!("High risk to satellite operations (Risk={v:.1}/10)")
            }
            ReasonKind::SatelliteRiskModerate => {
                format!("Elevated satellite risk (Risk={v:.1}/10)")
            }
            ReasonKind::HighSpeedStream => format!("High-speed solar wind stream ({v:.0} km/s)"),
            ReasonKind::GeoeffectiveBz => {
                format!("Strong southward IMF Bz ({v:.1} nT) - geoeffective")
            }
            ReasonKind::XrayFlareExtreme => {
                format!("X-class flare X-ray flux ({v:.1e} W/m²)")
            }
            ReasonKind::XrayFlareStrong => format!("M-class flare X-ray flux ({v:.1e} W/m²)"),
        }
    }
}

impl core::fmt::Display for AlertReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} [{}]: {} = {} {} {}",
            self.kind, self.tier, self.parameter, self.value, self.comparison, self.threshold
        )
    }
}
