use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use spacewx_risk::RiskClassifier;

use crate::sink::AlertSink;
use crate::source::SnapshotSource;

/// Config for the polling runner.
#[derive(Debug, Clone)]
pub struct MonitorRunner {
    pub interval: Duration,
    pub max_retries: u32,
    pub base_backoff: Duration,
    pub classifier: RiskClassifier,
}

impl Default for MonitorRunner {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15 * 60),
            max_retries: 5,
            base_backoff: Duration::from_millis(250),
            classifier: RiskClassifier::default(),
        }
    }
}

/// Handle for the running monitor (shutdown + trigger hook).
#[derive(Debug)]
pub struct MonitorHandle {
    shutdown: mpsc::Sender<()>,
    trigger: mpsc::SyncSender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl MonitorHandle {
    /// Request an immediate poll (e.g. a collector just wrote fresh data).
    ///
    /// Triggers are coalesced: if a poll is already pending this is a no-op.
    pub fn trigger(&self) {
        let _ = self.trigger.try_send(());
    }

    /// Stop the runner thread and wait for it to exit.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

impl MonitorRunner {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_classifier(mut self, classifier: RiskClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Spawn the polling thread.
    ///
    /// - Schedule: polls once on start, then every `interval`
    /// - Trigger: `handle.trigger()` requests an extra poll
    /// - Source errors: logged and retried with bounded exponential backoff
    /// - Snapshots with nothing to classify: logged and skipped until the next poll
    ///
    /// Fails with `InvalidInput` when `interval` is zero.
    pub fn spawn<R, S>(
        &self,
        name: impl Into<String>,
        source: Arc<R>,
        sink: Arc<S>,
    ) -> std::io::Result<MonitorHandle>
    where
        R: SnapshotSource,
        S: AlertSink,
    {
        if self.interval.is_zero() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "monitor interval must be greater than zero",
            ));
        }

        let name = name.into();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let (trigger_tx, trigger_rx) = mpsc::sync_channel::<()>(1);

        let cfg = self.clone();
        let join = thread::Builder::new().name(name.clone()).spawn(move || {
            runner_loop(&name, cfg, shutdown_rx, trigger_rx, source, sink)
        })?;

        Ok(MonitorHandle {
            shutdown: shutdown_tx,
            trigger: trigger_tx,
            join: Some(join),
        })
    }
}

fn runner_loop<R, S>(
    name: &str,
    cfg: MonitorRunner,
    shutdown_rx: mpsc::Receiver<()>,
    trigger_rx: mpsc::Receiver<()>,
    source: Arc<R>,
    sink: Arc<S>,
) where
    R: SnapshotSource,
    S: AlertSink,
{
    info!(
        runner = name,
        interval_secs = cfg.interval.as_secs(),
        "space weather monitor started"
    );

    let mut next_tick = Instant::now() + cfg.interval;
    let mut pending = true; // poll once on startup
    let mut failures: u32 = 0;
    let mut backoff_until: Option<Instant> = None;

    loop {
        // Shutdown has priority; a dropped handle also stops the loop.
        match shutdown_rx.try_recv() {
            Ok(()) | Err(mpsc::TryRecvError::Disconnected) => break,
            Err(mpsc::TryRecvError::Empty) => {}
        }

        let now = Instant::now();
        if now >= next_tick {
            pending = true;
            // Keep a stable cadence even if we were delayed.
            while next_tick <= now {
                next_tick += cfg.interval;
            }
        }

        while trigger_rx.try_recv().is_ok() {
            pending = true;
        }

        if let Some(until) = backoff_until {
            if Instant::now() < until {
                thread::sleep(Duration::from_millis(10));
                continue;
            }
            backoff_until = None;
        }

        if !pending {
            let sleep_for = next_tick
                .saturating_duration_since(Instant::now())
                .min(Duration::from_millis(50));
            thread::sleep(sleep_for);
            continue;
        }

        pending = false;

        // 1) Read the latest snapshot.
        let snapshot = match source.read() {
            Ok(s) => s,
            Err(e) => {
                warn!(
                    runner = name,
                    error = %e,
                    attempt = failures + 1,
                    "failed to read snapshot"
                );
                schedule_retry(&cfg, &mut failures, &mut pending, &mut backoff_until);
                continue;
            }
        };

        failures = 0;

        // 2) Classify (pure, deterministic). The source answered, so an empty
        // snapshot is skipped rather than retried.
        match cfg.classifier.classify(&snapshot) {
            Ok(outcome) => sink.emit(outcome),
            Err(e) => warn!(runner = name, error = %e, "snapshot not classifiable; skipped"),
        }
    }

    info!(runner = name, "space weather monitor stopped");
}

fn schedule_retry(
    cfg: &MonitorRunner,
    failures: &mut u32,
    pending: &mut bool,
    backoff_until: &mut Option<Instant>,
) {
    *failures += 1;
    if *failures <= cfg.max_retries {
        *pending = true;
        *backoff_until = Some(Instant::now() + backoff(cfg.base_backoff, *failures));
    } else {
        // Give up until the next scheduled tick or trigger.
        *failures = 0;
    }
}

fn backoff(base: Duration, attempt: u32) -> Duration {
    // Exponential backoff: base * 2^(attempt-1), capped.
    let pow = 1u32 << attempt.saturating_sub(1).min(10);
    let ms = base.as_millis().saturating_mul(pow as u128);
    Duration::from_millis(ms.min(60_000) as u64)
}
