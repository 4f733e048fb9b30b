//! Physical classification scales (flare class, NOAA G-scale, satellite status).
//!
//! These are descriptive labels for presentation; alert tiers come from the
//! threshold policy, not from these scales.

use serde::{Deserialize, Serialize};

use crate::snapshot::{Parameter, ParameterSnapshot};

/// GOES X-ray flare class by peak 1–8 Å flux (W/m²).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FlareClass {
    A,
    B,
    C,
    M,
    X,
}

impl FlareClass {
    /// Classify an X-ray flux. Non-positive and NaN flux classify as `A`.
    pub fn from_xray_flux(flux: f64) -> Self {
        if flux.is_nan() || flux < 1e-8 {
            FlareClass::A
        } else if flux < 1e-7 {
            FlareClass::B
        } else if flux < 1e-6 {
            FlareClass::C
        } else if flux < 1e-5 {
            FlareClass::M
        } else {
            FlareClass::X
        }
    }

    /// M and X class flares are the ones counted as flare events.
    pub fn is_major(self) -> bool {
        self >= FlareClass::M
    }
}

impl core::fmt::Display for FlareClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

/// NOAA geomagnetic storm scale derived from Kp.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StormLevel {
    None,
    G1,
    G2,
    G3,
    G4,
    G5,
}

impl StormLevel {
    /// `None` when `kp` is NaN.
    pub fn from_kp(kp: f64) -> Option<Self> {
        if kp.is_nan() {
            return None;
        }
        let level = if kp < 5.0 {
            StormLevel::None
        } else if kp < 6.0 {
            StormLevel::G1
        } else if kp < 7.0 {
            StormLevel::G2
        } else if kp < 8.0 {
            StormLevel::G3
        } else if kp < 9.0 {
            StormLevel::G4
        } else {
            StormLevel::G5
        };
        Some(level)
    }

    pub fn label(self) -> &'static str {
        match self {
            StormLevel::None => "None",
            StormLevel::G1 => "G1-Minor",
            StormLevel::G2 => "G2-Moderate",
            StormLevel::G3 => "G3-Strong",
            StormLevel::G4 => "G4-Severe",
            StormLevel::G5 => "G5-Extreme",
        }
    }

    pub fn is_storm(self) -> bool {
        self > StormLevel::None
    }
}

impl core::fmt::Display for StormLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Operational status band for the 0–10 satellite risk score.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SatelliteStatus {
    Low,
    Moderate,
    High,
}

impl SatelliteStatus {
    /// `None` when `score` is NaN.
    pub fn from_risk_score(score: f64) -> Option<Self> {
        if score.is_nan() {
            None
        } else if score < 3.0 {
            Some(SatelliteStatus::Low)
        } else if score < 7.0 {
            Some(SatelliteStatus::Moderate)
        } else {
            Some(SatelliteStatus::High)
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            SatelliteStatus::Low => "Normal operations",
            SatelliteStatus::Moderate => "Monitor conditions",
            SatelliteStatus::High => "Take precautions",
        }
    }
}

impl core::fmt::Display for SatelliteStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            SatelliteStatus::Low => "LOW",
            SatelliteStatus::Moderate => "MODERATE",
            SatelliteStatus::High => "HIGH",
        };
        write!(f, "{label} - {}", self.guidance())
    }
}

/// Descriptive labels for a snapshot; each is absent when its input is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionsSummary {
    pub flare_class: Option<FlareClass>,
    pub storm_level: Option<StormLevel>,
    pub satellite_status: Option<SatelliteStatus>,
}

impl ConditionsSummary {
    pub fn from_snapshot(snapshot: &ParameterSnapshot) -> Self {
        Self {
            flare_class: snapshot
                .get(Parameter::XrayFluxWm2)
                .map(FlareClass::from_xray_flux),
            storm_level: snapshot.get(Parameter::KpIndex).and_then(StormLevel::from_kp),
            satellite_status: snapshot
                .get(Parameter::RiskScore)
                .and_then(SatelliteStatus::from_risk_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn flare_class_boundaries_are_lower_inclusive() {
        assert_eq!(FlareClass::from_xray_flux(0.0), FlareClass::A);
        assert_eq!(FlareClass::from_xray_flux(-1.0), FlareClass::A);
        assert_eq!(FlareClass::from_xray_flux(f64::NAN), FlareClass::A);
        assert_eq!(FlareClass::from_xray_flux(5e-9), FlareClass::A);
        assert_eq!(FlareClass::from_xray_flux(1e-8), FlareClass::B);
        assert_eq!(FlareClass::from_xray_flux(1e-7), FlareClass::C);
        assert_eq!(FlareClass::from_xray_flux(1e-6), FlareClass::M);
        assert_eq!(FlareClass::from_xray_flux(1e-5), FlareClass::X);
        assert_eq!(FlareClass::from_xray_flux(3e-4), FlareClass::X);
        assert!(FlareClass::M.is_major());
        assert!(!FlareClass::C.is_major());
    }

    #[test]
    fn storm_scale_follows_kp() {
        assert_eq!(StormLevel::from_kp(4.9), Some(StormLevel::None));
        assert_eq!(StormLevel::from_kp(5.0), Some(StormLevel::G1));
        assert_eq!(StormLevel::from_kp(6.5), Some(StormLevel::G2));
        assert_eq!(StormLevel::from_kp(7.0), Some(StormLevel::G3));
        assert_eq!(StormLevel::from_kp(8.3), Some(StormLevel::G4));
        assert_eq!(StormLevel::from_kp(9.0), Some(StormLevel::G5));
        assert_eq!(StormLevel::from_kp(f64::NAN), None);
        assert_eq!(StormLevel::G3.to_string(), "G3-Strong");
    }

    #[test]
    fn satellite_status_bands() {
        assert_eq!(SatelliteStatus::from_risk_score(2.9), Some(SatelliteStatus::Low));
        assert_eq!(SatelliteStatus::from_risk_score(3.0), Some(SatelliteStatus::Moderate));
        assert_eq!(SatelliteStatus::from_risk_score(7.0), Some(SatelliteStatus::High));
        assert_eq!(
            SatelliteStatus::High.to_string(),
            "HIGH - Take precautions"
        );
    }

    #[test]
    fn summary_skips_missing_inputs() {
        let at = Utc.with_ymd_and_hms(2024, 5, 10, 17, 0, 0).unwrap();
        let snapshot = ParameterSnapshot::new(at)
            .with_xray_flux_wm2(2e-5)
            .with_kp_index(8.0);

        let summary = ConditionsSummary::from_snapshot(&snapshot);
        assert_eq!(summary.flare_class, Some(FlareClass::X));
        assert_eq!(summary.storm_level, Some(StormLevel::G4));
        assert_eq!(summary.satellite_status, None);
    }
}
