use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use spacewx_core::{AlertOutcome, AlertReason, AlertTier};

/// Combine triggered reasons into one outcome.
///
/// Ordering:
/// - tier descending (most severe first)
/// - then `ReasonKind` declaration order (flare, storm, risk, wind, Bz, X-ray)
/// - then value/threshold, so identical inputs in any order give identical output
///
/// A `ReasonKind` appears at most once; the first occurrence in that order is kept.
/// The overall tier is the maximum triggered tier, or `Normal` when nothing fired.
///
/// Aggregating an outcome's own reasons again reproduces the outcome.
pub fn aggregate<I>(triggered: I, timestamp: DateTime<Utc>) -> AlertOutcome
where
    I: IntoIterator<Item = AlertReason>,
{
    let mut reasons: Vec<AlertReason> = triggered.into_iter().collect();
    reasons.sort_by(severity_order);

    let mut seen = BTreeSet::new();
    reasons.retain(|r| seen.insert(r.kind));

    let tier = reasons.first().map(|r| r.tier).unwrap_or(AlertTier::Normal);
    AlertOutcome::new(tier, reasons, timestamp)
}

fn severity_order(a: &AlertReason, b: &AlertReason) -> Ordering {
    b.tier
        .cmp(&a.tier)
        .then_with(|| a.kind.cmp(&b.kind))
        .then_with(|| a.value.total_cmp(&b.value))
        .then_with(|| a.threshold.total_cmp(&b.threshold))
}
