//! On-disk snapshots of raw lookup payloads.
//!
//! A `dump` run stores every payload that carries placements so later
//! runs can re-derive summaries offline. Payloads are kept verbatim as
//! JSON values, stamped with the capture time.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub captured_at: DateTime<Utc>,
    pub records: Vec<Value>,
}

impl Snapshot {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            captured_at: Utc::now(),
            records,
        }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.captured_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        match self.age_minutes() {
            // Also covers clock skew
            minutes if minutes < 1 => "just now".to_string(),
            minutes if minutes < 60 => format!("{}m ago", minutes),
            minutes if minutes < 1440 => format!("{}h ago", minutes / 60),
            minutes => format!("{}d ago", minutes / 1440),
        }
    }
}

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, or `None` if nothing has been captured yet.
    pub fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read snapshot: {}", self.path.display()))?;

        let snapshot: Snapshot = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse snapshot: {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            records = snapshot.records.len(),
            age = %snapshot.age_display(),
            "Loaded snapshot"
        );
        Ok(Some(snapshot))
    }

    pub fn save(&self, records: Vec<Value>) -> Result<Snapshot> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let snapshot = Snapshot::new(records);
        let contents = serde_json::to_string(&snapshot)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write snapshot: {}", self.path.display()))?;
        Ok(snapshot)
    }
}
