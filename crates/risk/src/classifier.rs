use tracing::debug;

use spacewx_core::{AlertOutcome, ParameterSnapshot, RiskError, RiskResult};

use crate::aggregator::aggregate;
use crate::policy::ThresholdPolicy;

/// Classify one snapshot against `policy`.
///
/// Model:
/// - For each parameter present in the snapshot, evaluate that parameter's rules in
///   declaration order; the first rule that holds contributes one reason.
/// - Absent (or NaN) parameters are skipped. This is the rule-based fallback when
///   model outputs such as `flare_probability` or `risk_score` are unavailable.
/// - Out-of-domain values (negative Kp, probability > 1) are evaluated as given.
/// - The outcome timestamp is the snapshot's `observed_at`.
///
/// Pure and deterministic: no clock, no I/O, no shared state.
///
/// Fails with `InvalidSnapshot` when no parameter is present, since a `Normal`
/// result would be indistinguishable from "all monitored conditions normal".
pub fn classify(
    snapshot: &ParameterSnapshot,
    policy: &ThresholdPolicy,
) -> RiskResult<AlertOutcome> {
    if snapshot.is_empty() {
        return Err(RiskError::invalid_snapshot(format!(
            "no parameter readings present (observed_at={})",
            snapshot.observed_at
        )));
    }

    let triggered = snapshot.present().filter_map(|(parameter, value)| {
        let reason = policy.evaluate(parameter, value)?;
        debug!(
            parameter = %parameter,
            value,
            threshold = reason.threshold,
            reason = %reason.kind,
            tier = %reason.tier,
            "threshold rule fired"
        );
        Some(reason)
    });

    Ok(aggregate(triggered, snapshot.observed_at))
}

/// A classifier bound to one policy.
///
/// Holds no mutable state; share it freely across threads (`Arc<RiskClassifier>`
/// or a clone per worker).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskClassifier {
    policy: ThresholdPolicy,
}

impl RiskClassifier {
    pub fn new(policy: ThresholdPolicy) -> Self {
        Self { policy }
    }

    pub fn with_policy(mut self, policy: ThresholdPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }

    pub fn classify(&self, snapshot: &ParameterSnapshot) -> RiskResult<AlertOutcome> {
        classify(snapshot, &self.policy)
    }
}
