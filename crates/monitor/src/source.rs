use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use thiserror::Error;

use spacewx_core::ParameterSnapshot;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Supplier of snapshots (one per polling cycle).
///
/// Partial data is represented as absent fields, not errors. An `Err` means the
/// source could not produce any snapshot at all this cycle.
pub trait SnapshotSource: Send + Sync + 'static {
    fn read(&self) -> Result<ParameterSnapshot, SourceError>;
}

/// Parse a snapshot from JSON, stamping `fallback_time` when `observed_at` is missing.
pub fn parse_snapshot(
    json: &str,
    fallback_time: DateTime<Utc>,
) -> Result<ParameterSnapshot, SourceError> {
    let mut value: JsonValue = serde_json::from_str(json)?;
    if let JsonValue::Object(map) = &mut value {
        if !map.contains_key("observed_at") {
            map.insert("observed_at".to_string(), serde_json::to_value(fallback_time)?);
        }
    }
    Ok(serde_json::from_value(value)?)
}

/// Reads the latest snapshot from a JSON file rewritten by a collector process.
///
/// A snapshot without `observed_at` is stamped with the file's modification time.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SourceError {
        SourceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn read(&self) -> Result<ParameterSnapshot, SourceError> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let modified = std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        parse_snapshot(&json, modified)
    }
}
