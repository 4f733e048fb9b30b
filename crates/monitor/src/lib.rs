//! `spacewx-monitor`
//!
//! **Responsibility:** drive the classifier from outside the pure core.
//!
//! Snapshots come from a `SnapshotSource` (data collection), outcomes go to an
//! `AlertSink` (dashboards, notification dispatch, history). Failures here are
//! isolated: a failed poll is logged and retried, it never reaches the classifier.

pub mod runner;
pub mod sink;
pub mod source;

pub use runner::{MonitorHandle, MonitorRunner};
pub use sink::{AlertSink, FanoutSink, InMemoryAlertSink, JsonLinesAlertSink, TracingAlertSink};
pub use source::{FileSnapshotSource, SnapshotSource, SourceError, parse_snapshot};
