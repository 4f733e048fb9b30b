//! Point-in-time space-weather readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monitored parameter, in the declaration order of the default threshold table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    FlareProbability,
    KpIndex,
    RiskScore,
    SolarWindSpeedKms,
    ImfBzNt,
    XrayFluxWm2,
    ProtonDensity,
}

impl Parameter {
    pub const ALL: [Parameter; 7] = [
        Parameter::FlareProbability,
        Parameter::KpIndex,
        Parameter::RiskScore,
        Parameter::SolarWindSpeedKms,
        Parameter::ImfBzNt,
        Parameter::XrayFluxWm2,
        Parameter::ProtonDensity,
    ];

    /// Field name as it appears in serialized snapshots.
    pub fn field_name(self) -> &'static str {
        match self {
            Parameter::FlareProbability => "flare_probability",
            Parameter::KpIndex => "kp_index",
            Parameter::RiskScore => "risk_score",
            Parameter::SolarWindSpeedKms => "solar_wind_speed_kms",
            Parameter::ImfBzNt => "imf_bz_nt",
            Parameter::XrayFluxWm2 => "xray_flux_wm2",
            Parameter::ProtonDensity => "proton_density",
        }
    }

    /// Whether the value is produced by model inference rather than direct measurement.
    pub fn is_model_output(self) -> bool {
        matches!(self, Parameter::FlareProbability | Parameter::RiskScore)
    }
}

impl core::fmt::Display for Parameter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// One reading of the monitored parameters, possibly partial.
///
/// Any parameter may be absent (API unavailable, model not trained). A NaN value
/// is treated as absent: upstream numeric coercion turns failed reads into NaN.
/// No physical-domain validation happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    pub observed_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solar_wind_speed_kms: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proton_density: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imf_bz_nt: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xray_flux_wm2: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kp_index: Option<f64>,

    /// Model output; absent when the flare model is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flare_probability: Option<f64>,

    /// Model output; absent when the satellite risk model is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
}

impl ParameterSnapshot {
    /// An empty snapshot observed at `observed_at`. Add readings with the `with_*` builders.
    pub fn new(observed_at: DateTime<Utc>) -> Self {
        Self {
            observed_at,
            solar_wind_speed_kms: None,
            proton_density: None,
            imf_bz_nt: None,
            xray_flux_wm2: None,
            kp_index: None,
            flare_probability: None,
            risk_score: None,
        }
    }

    pub fn with(mut self, parameter: Parameter, value: f64) -> Self {
        *self.slot_mut(parameter) = Some(value);
        self
    }

    pub fn with_solar_wind_speed_kms(self, value: f64) -> Self {
        self.with(Parameter::SolarWindSpeedKms, value)
    }

    pub fn with_proton_density(self, value: f64) -> Self {
        self.with(Parameter::ProtonDensity, value)
    }

    pub fn with_imf_bz_nt(self, value: f64) -> Self {
        self.with(Parameter::ImfBzNt, value)
    }

    pub fn with_xray_flux_wm2(self, value: f64) -> Self {
        self.with(Parameter::XrayFluxWm2, value)
    }

    pub fn with_kp_index(self, value: f64) -> Self {
        self.with(Parameter::KpIndex, value)
    }

    pub fn with_flare_probability(self, value: f64) -> Self {
        self.with(Parameter::FlareProbability, value)
    }

    pub fn with_risk_score(self, value: f64) -> Self {
        self.with(Parameter::RiskScore, value)
    }

    /// Usable value of `parameter`, or `None` if absent or NaN.
    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        let value = match parameter {
            Parameter::FlareProbability => self.flare_probability,
            Parameter::KpIndex => self.kp_index,
            Parameter::RiskScore => self.risk_score,
            Parameter::SolarWindSpeedKms => self.solar_wind_speed_kms,
            Parameter::ImfBzNt => self.imf_bz_nt,
            Parameter::XrayFluxWm2 => self.xray_flux_wm2,
            Parameter::ProtonDensity => self.proton_density,
        };
        value.filter(|v| !v.is_nan())
    }

    /// Parameters carrying a usable value, in declaration order.
    pub fn present(&self) -> impl Iterator<Item = (Parameter, f64)> + '_ {
        Parameter::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|v| (p, v)))
    }

    /// True when no parameter carries a usable value.
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// True when no model output is available (rule-based fallback only).
    pub fn is_measurement_only(&self) -> bool {
        self.present().all(|(p, _)| !p.is_model_output())
    }

    fn slot_mut(&mut self, parameter: Parameter) -> &mut Option<f64> {
        match parameter {
            Parameter::FlareProbability => &mut self.flare_probability,
            Parameter::KpIndex => &mut self.kp_index,
            Parameter::RiskScore => &mut self.risk_score,
            Parameter::SolarWindSpeedKms => &mut self.solar_wind_speed_kms,
            Parameter::ImfBzNt => &mut self.imf_bz_nt,
            Parameter::XrayFluxWm2 => &mut self.xray_flux_wm2,
            Parameter::ProtonDensity => &mut self.proton_density,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 17, 0, 0).unwrap()
    }

    #[test]
    fn new_snapshot_is_empty() {
        let snapshot = ParameterSnapshot::new(test_time());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.present().count(), 0);
    }

    #[test]
    fn builders_set_the_named_field() {
        let snapshot = ParameterSnapshot::new(test_time())
            .with_kp_index(6.0)
            .with_imf_bz_nt(-12.0);

        assert_eq!(snapshot.kp_index, Some(6.0));
        assert_eq!(snapshot.get(Parameter::ImfBzNt), Some(-12.0));
        assert_eq!(snapshot.get(Parameter::RiskScore), None);

        let present: Vec<Parameter> = snapshot.present().map(|(p, _)| p).collect();
        assert_eq!(present, vec![Parameter::KpIndex, Parameter::ImfBzNt]);
    }

    #[test]
    fn nan_counts_as_absent() {
        let snapshot = ParameterSnapshot::new(test_time()).with_kp_index(f64::NAN);
        assert_eq!(snapshot.get(Parameter::KpIndex), None);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn measurement_only_when_models_missing() {
        let measured = ParameterSnapshot::new(test_time()).with_solar_wind_speed_kms(420.0);
        assert!(measured.is_measurement_only());

        let modeled = measured.with_flare_probability(0.2);
        assert!(!modeled.is_measurement_only());
    }

    #[test]
    fn serde_omits_absent_fields() {
        let snapshot = ParameterSnapshot::new(test_time()).with_kp_index(5.0);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["kp_index"], 5.0);
        assert!(json.get("risk_score").is_none());

        let back: ParameterSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn deserializes_partial_json() {
        let json = r#"{"observed_at":"2024-05-10T17:00:00Z","imf_bz_nt":-3.5}"#;
        let snapshot: ParameterSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.observed_at, test_time());
        assert_eq!(snapshot.imf_bz_nt, Some(-3.5));
        assert_eq!(snapshot.present().count(), 1);
    }
}
