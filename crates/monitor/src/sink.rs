use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{info, warn};

use spacewx_core::AlertOutcome;

/// Consumer of alert outcomes (dashboard feed, notification dispatch, history).
///
/// Sinks must not fail the caller: delivery problems are handled (logged) inside.
pub trait AlertSink: Send + Sync + 'static {
    fn emit(&self, outcome: AlertOutcome);
}

/// In-memory sink for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAlertSink {
    inner: Mutex<Vec<AlertOutcome>>,
}

impl InMemoryAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<AlertOutcome> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AlertSink for InMemoryAlertSink {
    fn emit(&self, outcome: AlertOutcome) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(outcome);
    }
}

/// Logs each outcome; alert tiers at `warn`, normal conditions at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn emit(&self, outcome: AlertOutcome) {
        let reasons: Vec<String> = outcome.reasons().iter().map(|r| r.message()).collect();
        if outcome.is_alert() {
            warn!(
                tier = %outcome.tier(),
                observed_at = %outcome.timestamp(),
                reasons = ?reasons,
                "space weather alert"
            );
        } else {
            info!(
                tier = %outcome.tier(),
                observed_at = %outcome.timestamp(),
                "conditions normal"
            );
        }
    }
}

/// Appends each outcome as one JSON line (alert history).
#[derive(Debug)]
pub struct JsonLinesAlertSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesAlertSink {
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AlertSink for JsonLinesAlertSink {
    fn emit(&self, outcome: AlertOutcome) {
        let line = match serde_json::to_string(&outcome) {
            Ok(line) => line,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to encode alert outcome");
                return;
            }
        };

        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(file, "{line}").and_then(|_| file.flush()) {
            warn!(path = %self.path.display(), error = %e, "failed to append alert history");
        }
    }
}

/// Forwards every outcome to each inner sink, in order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn AlertSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl AlertSink) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl AlertSink for FanoutSink {
    fn emit(&self, outcome: AlertOutcome) {
        for sink in &self.sinks {
            sink.emit(outcome.clone());
        }
    }
}
