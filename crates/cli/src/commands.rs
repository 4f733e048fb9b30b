use std::io::{BufRead, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use chrono::Utc;
use tracing::info;

use spacewx_monitor::{
    FanoutSink, FileSnapshotSource, JsonLinesAlertSink, MonitorRunner, TracingAlertSink,
    parse_snapshot,
};
use spacewx_risk::{RiskClassifier, ThresholdPolicy};

use crate::PolicyArgs;
use crate::report;

/// Exit status when `--fail-on-alert` is set and the tier is above NORMAL.
const EXIT_ALERT: u8 = 2;

pub fn load_policy(args: &PolicyArgs) -> anyhow::Result<ThresholdPolicy> {
    let policy: ThresholdPolicy = match &args.policy {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read policy {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("failed to load policy {}", path.display()))?
        }
        None => ThresholdPolicy::default(),
    };

    if args.xray_rules {
        return policy
            .with_xray_flare_rules()
            .context("failed to add X-ray flare rules");
    }
    Ok(policy)
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read snapshot from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read snapshot {input}"))
}

pub fn classify(args: &PolicyArgs, input: &str, fail_on_alert: bool) -> anyhow::Result<ExitCode> {
    let classifier = RiskClassifier::new(load_policy(args)?);

    let json = read_input(input)?;
    let snapshot = parse_snapshot(&json, Utc::now()).context("failed to parse snapshot")?;
    let outcome = classifier
        .classify(&snapshot)
        .context("snapshot could not be classified")?;

    info!(tier = %outcome.tier(), reasons = outcome.reasons().len(), "snapshot classified");

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    eprintln!("{}", report::render(&snapshot, &outcome));

    if fail_on_alert && outcome.is_alert() {
        return Ok(ExitCode::from(EXIT_ALERT));
    }
    Ok(ExitCode::SUCCESS)
}

pub fn print_policy(args: &PolicyArgs) -> anyhow::Result<ExitCode> {
    let policy = load_policy(args)?;
    println!("{}", serde_json::to_string_pretty(&policy)?);
    Ok(ExitCode::SUCCESS)
}

pub fn watch(
    args: &PolicyArgs,
    snapshot: PathBuf,
    history: Option<PathBuf>,
    interval_secs: u64,
) -> anyhow::Result<ExitCode> {
    if interval_secs == 0 {
        bail!("--interval-secs must be greater than zero");
    }

    let runner = MonitorRunner::default()
        .with_interval(Duration::from_secs(interval_secs))
        .with_classifier(RiskClassifier::new(load_policy(args)?));

    let mut sink = FanoutSink::new().with(TracingAlertSink);
    if let Some(path) = &history {
        let history_sink = JsonLinesAlertSink::open(path)
            .with_context(|| format!("failed to open history {}", path.display()))?;
        info!(history = %history_sink.path().display(), "recording alert history");
        sink = sink.with(history_sink);
    }

    let source = Arc::new(FileSnapshotSource::new(snapshot));
    info!(snapshot = %source.path().display(), interval_secs, "reading snapshots");
    let handle = runner
        .spawn("spacewx-watch", source, Arc::new(sink))
        .context("failed to start monitor")?;

    info!("watching; press Enter to poll now, Ctrl-D to stop");
    for line in std::io::stdin().lock().lines() {
        if line.is_err() {
            break;
        }
        handle.trigger();
    }

    handle.shutdown();
    Ok(ExitCode::SUCCESS)
}
