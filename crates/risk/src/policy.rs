use serde::{Deserialize, Deserializer, Serialize};

use spacewx_core::{
    AlertReason, AlertTier, Comparison, Parameter, ReasonKind, RiskError, RiskResult,
};

/// One threshold: when `parameter <comparison> threshold` holds, `reason` fires at `tier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub parameter: Parameter,
    pub comparison: Comparison,
    pub threshold: f64,
    pub tier: AlertTier,
    pub reason: ReasonKind,
}

impl ThresholdRule {
    pub fn new(
        parameter: Parameter,
        comparison: Comparison,
        threshold: f64,
        tier: AlertTier,
        reason: ReasonKind,
    ) -> Self {
        Self {
            parameter,
            comparison,
            threshold,
            tier,
            reason,
        }
    }

    /// Returns the fired reason if `value` satisfies this rule.
    pub fn evaluate(&self, value: f64) -> Option<AlertReason> {
        if !self.comparison.holds(value, self.threshold) {
            return None;
        }
        Some(AlertReason {
            kind: self.reason,
            tier: self.tier,
            parameter: self.parameter,
            comparison: self.comparison,
            value,
            threshold: self.threshold,
        })
    }

    /// True when `self` fires on strictly more extreme values than `other`.
    fn is_more_extreme_than(&self, other: &ThresholdRule) -> bool {
        if self.comparison.is_upward() {
            self.threshold > other.threshold
        } else {
            self.threshold < other.threshold
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPolicy {
    rules: Vec<ThresholdRule>,
}

/// Immutable, validated threshold table.
///
/// Rules for one parameter are evaluated in declaration order and the first match
/// wins for that parameter. Validation guarantees that declaration order runs from
/// the most extreme threshold to the least, with non-increasing tiers, so crossing
/// a threshold further can never lower a parameter's contribution.
///
/// Policies are plain values: pass one to every classification call, build
/// variants for testing or operator tuning, never mutate one in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdPolicy {
    rules: Vec<ThresholdRule>,
}

impl<'de> Deserialize<'de> for ThresholdPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPolicy::deserialize(deserializer)?;
        ThresholdPolicy::new(raw.rules).map_err(serde::de::Error::custom)
    }
}

impl Default for ThresholdPolicy {
    /// The reference table: flare, storm, satellite risk, solar wind, Bz.
    fn default() -> Self {
        use AlertTier::*;
        use Comparison::*;
        use Parameter::*;
        use ReasonKind::*;

        Self {
            rules: vec![
                ThresholdRule::new(FlareProbability, Above, 0.70, High, FlareProbabilityHigh),
                ThresholdRule::new(
                    FlareProbability,
                    Above,
                    0.40,
                    Moderate,
                    FlareProbabilityModerate,
                ),
                ThresholdRule::new(KpIndex, AtLeast, 7.0, High, KpStormStrong),
                ThresholdRule::new(KpIndex, AtLeast, 5.0, Moderate, KpStormMinor),
                ThresholdRule::new(RiskScore, Above, 7.0, High, SatelliteRiskHigh),
                ThresholdRule::new(RiskScore, Above, 4.0, Moderate, SatelliteRiskModerate),
                ThresholdRule::new(SolarWindSpeedKms, Above, 700.0, Low, HighSpeedStream),
                ThresholdRule::new(ImfBzNt, Below, -10.0, High, GeoeffectiveBz),
            ],
        }
    }
}

impl ThresholdPolicy {
    /// Validate and build a policy from rules in declaration order.
    pub fn new(rules: Vec<ThresholdRule>) -> RiskResult<Self> {
        validate(&rules)?;
        Ok(Self { rules })
    }

    /// Append the X-ray flux rules (X class → High, M class → Moderate).
    pub fn with_xray_flare_rules(self) -> RiskResult<Self> {
        let mut rules = self.rules;
        rules.push(ThresholdRule::new(
            Parameter::XrayFluxWm2,
            Comparison::AtLeast,
            1e-4,
            AlertTier::High,
            ReasonKind::XrayFlareExtreme,
        ));
        rules.push(ThresholdRule::new(
            Parameter::XrayFluxWm2,
            Comparison::AtLeast,
            1e-5,
            AlertTier::Moderate,
            ReasonKind::XrayFlareStrong,
        ));
        Self::new(rules)
    }

    pub fn rules(&self) -> &[ThresholdRule] {
        &self.rules
    }

    /// Rules for `parameter`, in evaluation order.
    pub fn rules_for(&self, parameter: Parameter) -> impl Iterator<Item = &ThresholdRule> + '_ {
        self.rules.iter().filter(move |r| r.parameter == parameter)
    }

    /// First matching rule for `parameter` at `value`, if any.
    pub fn evaluate(&self, parameter: Parameter, value: f64) -> Option<AlertReason> {
        self.rules_for(parameter).find_map(|rule| rule.evaluate(value))
    }
}

fn validate(rules: &[ThresholdRule]) -> RiskResult<()> {
    if rules.is_empty() {
        return Err(RiskError::invalid_policy("policy has no rules"));
    }

    let mut seen: Vec<ReasonKind> = Vec::with_capacity(rules.len());
    for rule in rules {
        if !rule.threshold.is_finite() {
            return Err(RiskError::invalid_policy(format!(
                "{}: threshold must be finite",
                rule.reason
            )));
        }
        if rule.tier == AlertTier::Normal {
            return Err(RiskError::invalid_policy(format!(
                "{}: a rule cannot fire at tier NORMAL",
                rule.reason
            )));
        }
        if seen.contains(&rule.reason) {
            return Err(RiskError::invalid_policy(format!(
                "{}: reason used by more than one rule",
                rule.reason
            )));
        }
        seen.push(rule.reason);
    }

    for parameter in Parameter::ALL {
        let chain: Vec<&ThresholdRule> =
            rules.iter().filter(|r| r.parameter == parameter).collect();
        for pair in chain.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if prev.comparison.is_upward() != next.comparison.is_upward() {
                return Err(RiskError::invalid_policy(format!(
                    "{parameter}: {} and {} compare in opposite directions",
                    prev.reason, next.reason
                )));
            }
            if !prev.is_more_extreme_than(next) {
                return Err(RiskError::invalid_policy(format!(
                    "{parameter}: {} ({} {}) must be declared after {} ({} {})",
                    prev.reason,
                    prev.comparison,
                    prev.threshold,
                    next.reason,
                    next.comparison,
                    next.threshold
                )));
            }
            if next.tier > prev.tier {
                return Err(RiskError::invalid_policy(format!(
                    "{parameter}: less extreme {} cannot have a higher tier than {}",
                    next.reason, prev.reason
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use AlertTier::*;
    use Comparison::*;
    use Parameter::*;
    use ReasonKind::*;

    fn rule(
        parameter: Parameter,
        comparison: Comparison,
        threshold: f64,
        tier: AlertTier,
        reason: ReasonKind,
    ) -> ThresholdRule {
        ThresholdRule::new(parameter, comparison, threshold, tier, reason)
    }

    #[test]
    fn default_policy_is_valid() {
        let policy = ThresholdPolicy::default();
        assert!(ThresholdPolicy::new(policy.rules().to_vec()).is_ok());
        assert_eq!(policy.rules().len(), 8);
    }

    #[test]
    fn rules_for_preserves_evaluation_order() {
        let policy = ThresholdPolicy::default();
        let kinds: Vec<ReasonKind> = policy
            .rules_for(Parameter::KpIndex)
            .map(|r| r.reason)
            .collect();
        assert_eq!(kinds, vec![ReasonKind::KpStormStrong, ReasonKind::KpStormMinor]);
        assert_eq!(policy.rules_for(Parameter::ProtonDensity).count(), 0);
    }

    #[test]
    fn first_matching_rule_wins() {
        let policy = ThresholdPolicy::default();

        let r = policy.evaluate(Parameter::KpIndex, 8.0).unwrap();
        assert_eq!(r.kind, ReasonKind::KpStormStrong);

        let r = policy.evaluate(Parameter::KpIndex, 5.0).unwrap();
        assert_eq!(r.kind, ReasonKind::KpStormMinor);
        assert_eq!(r.tier, AlertTier::Moderate);

        assert!(policy.evaluate(Parameter::KpIndex, 4.99).is_none());
    }

    #[test]
    fn strict_thresholds_do_not_fire_at_the_boundary() {
        let policy = ThresholdPolicy::default();
        assert_eq!(
            policy.evaluate(Parameter::FlareProbability, 0.70).map(|r| r.kind),
            Some(ReasonKind::FlareProbabilityModerate)
        );
        assert!(policy.evaluate(Parameter::SolarWindSpeedKms, 700.0).is_none());
        assert!(policy.evaluate(Parameter::ImfBzNt, -10.0).is_none());
        assert!(policy.evaluate(Parameter::ImfBzNt, -10.1).is_some());
    }

    #[test]
    fn rejects_ascending_threshold_order() {
        let err = ThresholdPolicy::new(vec![
            rule(KpIndex, AtLeast, 5.0, Moderate, KpStormMinor),
            rule(KpIndex, AtLeast, 7.0, High, KpStormStrong),
        ])
        .unwrap_err();
        assert!(
            matches!(err, RiskError::InvalidPolicy(msg) if msg.contains("must be declared after"))
        );
    }

    #[test]
    fn rejects_equal_thresholds_for_one_parameter() {
        let err = ThresholdPolicy::new(vec![
            rule(KpIndex, Above, 5.0, High, KpStormStrong),
            rule(KpIndex, AtLeast, 5.0, Moderate, KpStormMinor),
        ])
        .unwrap_err();
        assert!(matches!(err, RiskError::InvalidPolicy(_)));
    }

    #[test]
    fn rejects_tier_inversion() {
        let err = ThresholdPolicy::new(vec![
            rule(RiskScore, Above, 7.0, Low, SatelliteRiskHigh),
            rule(RiskScore, Above, 4.0, High, SatelliteRiskModerate),
        ])
        .unwrap_err();
        assert!(matches!(err, RiskError::InvalidPolicy(msg) if msg.contains("higher tier")));
    }

    #[test]
    fn rejects_mixed_directions() {
        let err = ThresholdPolicy::new(vec![
            rule(ImfBzNt, Below, -10.0, High, GeoeffectiveBz),
            rule(ImfBzNt, Above, 10.0, Low, HighSpeedStream),
        ])
        .unwrap_err();
        assert!(
            matches!(err, RiskError::InvalidPolicy(msg) if msg.contains("opposite directions"))
        );
    }

    #[test]
    fn rejects_duplicate_reason_normal_tier_and_nan() {
        let dup = ThresholdPolicy::new(vec![
            rule(KpIndex, AtLeast, 7.0, High, KpStormStrong),
            rule(RiskScore, Above, 7.0, High, KpStormStrong),
        ]);
        assert!(dup.is_err());

        let normal = ThresholdPolicy::new(vec![rule(
            Parameter::KpIndex,
            Comparison::AtLeast,
            7.0,
            AlertTier::Normal,
            ReasonKind::KpStormStrong,
        )]);
        assert!(normal.is_err());

        let nan = ThresholdPolicy::new(vec![rule(
            Parameter::KpIndex,
            Comparison::AtLeast,
            f64::NAN,
            AlertTier::High,
            ReasonKind::KpStormStrong,
        )]);
        assert!(nan.is_err());

        assert!(ThresholdPolicy::new(Vec::new()).is_err());
    }

    #[test]
    fn bz_chain_orders_more_negative_first() {
        let policy = ThresholdPolicy::new(vec![
            rule(ImfBzNt, Below, -20.0, High, GeoeffectiveBz),
            rule(ImfBzNt, Below, -10.0, Moderate, KpStormMinor),
        ])
        .unwrap();
        assert_eq!(
            policy.evaluate(Parameter::ImfBzNt, -15.0).map(|r| r.tier),
            Some(AlertTier::Moderate)
        );
        assert_eq!(
            policy.evaluate(Parameter::ImfBzNt, -25.0).map(|r| r.tier),
            Some(AlertTier::High)
        );
    }

    #[test]
    fn xray_rules_extend_the_default_table() {
        let policy = ThresholdPolicy::default().with_xray_flare_rules().unwrap();
        assert_eq!(policy.rules().len(), 10);
        assert_eq!(
            policy.evaluate(Parameter::XrayFluxWm2, 2e-4).map(|r| r.kind),
            Some(ReasonKind::XrayFlareExtreme)
        );
        assert_eq!(
            policy.evaluate(Parameter::XrayFluxWm2, 1e-5).map(|r| r.kind),
            Some(ReasonKind::XrayFlareStrong)
        );
        assert!(ThresholdPolicy::default().evaluate(Parameter::XrayFluxWm2, 1e-3).is_none());
    }

    #[test]
    fn json_policy_is_validated_on_load() {
        let json = serde_json::to_string(&ThresholdPolicy::default()).unwrap();
        let back: ThresholdPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ThresholdPolicy::default());

        let bad = r#"{"rules":[
            {"parameter":"kp_index","comparison":"at_least","threshold":5.0,
             "tier":"Moderate","reason":"KpStormMinor"},
            {"parameter":"kp_index","comparison":"at_least","threshold":7.0,
             "tier":"High","reason":"KpStormStrong"}
        ]}"#;
        let err = serde_json::from_str::<ThresholdPolicy>(bad).unwrap_err();
        assert!(err.to_string().contains("invalid policy"));
    }

    #[test]
    fn operator_can_lower_the_flare_threshold() {
        let mut rules = ThresholdPolicy::default().rules().to_vec();
        rules[0].threshold = 0.5;
        let tuned = ThresholdPolicy::new(rules).unwrap();
        assert_eq!(
            tuned.evaluate(Parameter::FlareProbability, 0.55).map(|r| r.kind),
            Some(ReasonKind::FlareProbabilityHigh)
        );
    }
}
