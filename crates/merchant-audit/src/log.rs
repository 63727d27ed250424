//! Durable audit log
//!
//! One CSV file with a fixed column set, written through an exclusive
//! open-append-close cycle per event. Reads share the writer's mutex so a
//! reader never observes a torn row; read failures degrade to "no data"
//! because audit visibility is best-effort while audit writes are not.

use crate::fingerprint::fingerprint;
use chrono::{DateTime, Utc};
use merchant_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Verification status stamped on every appended row
pub const VERIFIED: &str = "VERIFIED";

/// Default size of the recent-entries view
pub const DEFAULT_RECENT_LOGS: usize = 10;

/// Column order of the durable store; must match [`AuditEntry`] field order
const HEADER: [&str; 6] = [
    "timestamp",
    "agent_name",
    "product_id",
    "action",
    "reasoning_fingerprint",
    "verification_status",
];

/// One immutable audit row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the decision was recorded
    pub timestamp: DateTime<Utc>,
    /// Logical component that made the decision
    pub agent_name: String,
    /// Product the decision concerns
    pub product_id: String,
    /// Short action label (e.g., "Strategy Generation")
    pub action: String,
    /// Truncated SHA-256 digest of the full decision text
    pub reasoning_fingerprint: String,
    /// Always [`VERIFIED`] for rows this log wrote
    pub verification_status: String,
}

/// Append-only, fingerprint-stamped decision log
pub struct AuditLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl AuditLog {
    /// Create a log handle for the given store path
    ///
    /// The store itself is initialized lazily on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one decision and return its fingerprint
    ///
    /// Computes the fingerprint of `reasoning`, appends a row stamped
    /// [`VERIFIED`], and returns the fingerprint. The store is created with
    /// its header row on first use; re-initialization is idempotent.
    pub fn log_event(
        &self,
        agent_name: &str,
        product_id: &str,
        action: &str,
        reasoning: &str,
    ) -> Result<String> {
        let reasoning_fingerprint = fingerprint(reasoning);
        let entry = AuditEntry {
            timestamp: Utc::now(),
            agent_name: agent_name.to_string(),
            product_id: product_id.to_string(),
            action: action.to_string(),
            reasoning_fingerprint: reasoning_fingerprint.clone(),
            verification_status: VERIFIED.to_string(),
        };

        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::LogWriteFailure("audit lock poisoned".to_string()))?;

        self.ensure_store()?;
        self.append(&entry)?;

        debug!(product_id, fingerprint = %reasoning_fingerprint, "audit entry appended");
        Ok(reasoning_fingerprint)
    }

    /// The most recent `n` entries, newest first
    ///
    /// Returns an empty view — never an error — when the store is missing or
    /// unreadable. Corrupted rows are skipped, not surfaced.
    pub fn recent(&self, n: usize) -> Vec<AuditEntry> {
        let Ok(_guard) = self.lock.lock() else {
            warn!("audit lock poisoned; returning empty view");
            return Vec::new();
        };

        let Ok(mut reader) = csv::Reader::from_path(&self.path) else {
            return Vec::new();
        };

        let entries: Vec<AuditEntry> = reader
            .deserialize()
            .filter_map(std::result::Result::ok)
            .collect();

        entries.into_iter().rev().take(n).collect()
    }

    /// Create the store with its header row if it does not exist yet
    fn ensure_store(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| Error::LogWriteFailure(format!("cannot create log dir: {e}")))?;
            }
        }

        let file = std::fs::File::create(&self.path)
            .map_err(|e| Error::LogWriteFailure(format!("cannot create log store: {e}")))?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(HEADER)
            .and_then(|()| writer.flush().map_err(Into::into))
            .map_err(|e| Error::LogWriteFailure(format!("cannot write log header: {e}")))?;

        debug!(path = %self.path.display(), "initialized audit store");
        Ok(())
    }

    /// One exclusive open-append-close cycle
    fn append(&self, entry: &AuditEntry) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::LogWriteFailure(format!("cannot open log store: {e}")))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .serialize(entry)
            .and_then(|()| writer.flush().map_err(Into::into))
            .map_err(|e| Error::LogWriteFailure(format!("cannot append log entry: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log() -> (tempfile::TempDir, AuditLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("audit_log.csv"));
        (dir, log)
    }

    #[test]
    fn test_log_event_returns_fingerprint() {
        let (_dir, log) = temp_log();
        let fp = log
            .log_event("MarketingAgent", "P001", "Strategy Generation", "DECISION: Hold")
            .unwrap();
        assert_eq!(fp, fingerprint("DECISION: Hold"));

        let entries = log.recent(DEFAULT_RECENT_LOGS);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].product_id, "P001");
        assert_eq!(entries[0].reasoning_fingerprint, fp);
        assert_eq!(entries[0].verification_status, VERIFIED);
    }

    #[test]
    fn test_initialization_is_idempotent() {
        let (_dir, log) = temp_log();
        log.log_event("MarketingAgent", "P001", "Strategy Generation", "first")
            .unwrap();
        log.log_event("MarketingAgent", "P002", "Strategy Generation", "second")
            .unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let header_count = content
            .lines()
            .filter(|line| line.starts_with("timestamp,"))
            .count();
        assert_eq!(header_count, 1);
        assert_eq!(log.recent(10).len(), 2);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let (_dir, log) = temp_log();
        for text in ["first", "second", "third"] {
            log.log_event("MarketingAgent", "P001", "Strategy Generation", text)
                .unwrap();
        }

        let entries = log.recent(2);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].reasoning_fingerprint, fingerprint("third"));
        assert_eq!(entries[1].reasoning_fingerprint, fingerprint("second"));
    }

    #[test]
    fn test_missing_store_reads_as_empty() {
        let (_dir, log) = temp_log();
        assert!(log.recent(10).is_empty());
    }

    #[test]
    fn test_corrupted_rows_are_skipped() {
        use std::io::Write;

        let (_dir, log) = temp_log();
        log.log_event("MarketingAgent", "P001", "Strategy Generation", "good")
            .unwrap();

        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        writeln!(file, "not,a,valid,row").unwrap();
        drop(file);

        log.log_event("MarketingAgent", "P002", "Strategy Generation", "also good")
            .unwrap();

        let entries = log.recent(10);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].product_id, "P002");
        assert_eq!(entries[1].product_id, "P001");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("nested/logs/audit_log.csv"));
        log.log_event("MarketingAgent", "P001", "Strategy Generation", "text")
            .unwrap();
        assert_eq!(log.recent(10).len(), 1);
    }
}
