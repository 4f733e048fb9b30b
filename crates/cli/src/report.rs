//! Human-readable outcome summary (stderr companion to the JSON output).

use std::fmt::Write;

use spacewx_core::{AlertOutcome, ConditionsSummary, ParameterSnapshot};

pub fn render(snapshot: &ParameterSnapshot, outcome: &AlertOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Overall status: {} ({})", outcome.tier(), outcome.timestamp());

    if outcome.reasons().is_empty() {
        let _ = writeln!(out, "  No active alerts - conditions normal");
    }
    for reason in outcome.reasons() {
        let _ = writeln!(
            out,
            "  [{}] {} - {}",
            reason.tier,
            reason.kind.category().label(),
            reason.message()
        );
    }

    let summary = ConditionsSummary::from_snapshot(snapshot);
    let mut labels = Vec::new();
    if let Some(class) = summary.flare_class {
        if class.is_major() {
            labels.push(format!("flare class {class} (major)"));
        } else {
            labels.push(format!("flare class {class}"));
        }
    }
    if let Some(level) = summary.storm_level {
        if level.is_storm() {
            labels.push(format!("storm {level}"));
        } else {
            labels.push("no geomagnetic storm".to_string());
        }
    }
    if let Some(status) = summary.satellite_status {
        labels.push(format!("satellite {status}"));
    }
    if !labels.is_empty() {
        let _ = writeln!(out, "Conditions: {}", labels.join(" | "));
    }
    if snapshot.is_measurement_only() {
        let _ = writeln!(out, "Note: model outputs unavailable; rule-based fallback only");
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use spacewx_risk::{ThresholdPolicy, classify};

    fn snapshot() -> ParameterSnapshot {
        ParameterSnapshot::new(Utc.with_ymd_and_hms(2024, 5, 10, 17, 0, 0).unwrap())
    }

    #[test]
    fn lists_reasons_most_severe_first() {
        let s = snapshot()
            .with_solar_wind_speed_kms(750.0)
            .with_imf_bz_nt(-12.0);
        let outcome = classify(&s, &ThresholdPolicy::default()).unwrap();
        let text = render(&s, &outcome);

        let bz = text.find("IMF Bz").unwrap();
        let wind = text.find("Solar Wind").unwrap();
        assert!(bz < wind);
        assert!(text.starts_with("Overall status: HIGH"));
        assert!(text.contains("rule-based fallback"));
    }

    #[test]
    fn normal_outcome_says_so_and_shows_scales() {
        let s = snapshot().with_kp_index(3.0).with_risk_score(2.0).with_flare_probability(0.1);
        let outcome = classify(&s, &ThresholdPolicy::default()).unwrap();
        let text = render(&s, &outcome);

        assert!(text.contains("No active alerts"));
        assert!(text.contains("no geomagnetic storm"));
        assert!(text.contains("satellite LOW - Normal operations"));
        assert!(!text.contains("fallback"));
    }

    #[test]
    fn flags_major_flares_and_active_storms() {
        let s = snapshot().with_xray_flux_wm2(2e-5).with_kp_index(7.5);
        let outcome = classify(&s, &ThresholdPolicy::default()).unwrap();
        let text = render(&s, &outcome);

        assert!(text.contains("flare class X (major)"));
        assert!(text.contains("storm G3-Strong"));
        assert!(!text.contains("no geomagnetic storm"));
    }
}
