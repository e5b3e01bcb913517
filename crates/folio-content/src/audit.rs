//! Append-only audit log for created content and admin activity.
//!
//! Entries are written as newline-delimited JSON into three files under a
//! configured directory. The log is write-only: nothing in the service ever
//! reads it back. Recording is best-effort and a failed write never affects
//! the operation that triggered it.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Result;

/// The file an entry is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditKind {
    /// Every created post.
    Blog,
    /// Every received contact message.
    Contact,
    /// Admin actions.
    Activity,
}

impl AuditKind {
    /// File name inside the audit directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            AuditKind::Blog => "blog_log.json",
            AuditKind::Contact => "contact_log.json",
            AuditKind::Activity => "activity.log",
        }
    }
}

/// Admin actions recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Login,
    LoginFailed,
    Logout,
    PostUpdated,
    PostDeleted,
}

/// A single activity log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub action: Action,
    pub details: String,
}

/// Audit log writer. A log without a directory discards every entry.
#[derive(Debug, Default)]
pub struct AuditLog {
    dir: Option<PathBuf>,
    // Serializes appends so concurrent lines never interleave.
    lock: Mutex<()>,
}

impl AuditLog {
    /// Create a log that writes into `dir`, creating it on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            lock: Mutex::new(()),
        }
    }

    /// Create a log that records nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Directory entries are written to, if enabled.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Append an entry, logging and swallowing any failure.
    pub fn record<T: Serialize>(&self, kind: AuditKind, entry: &T) {
        if let Err(e) = self.try_record(kind, entry) {
            tracing::warn!(file = kind.file_name(), error = %e, "Failed to write audit log entry");
        }
    }

    /// Append an entry, returning any I/O or serialization error.
    pub fn try_record<T: Serialize>(&self, kind: AuditKind, entry: &T) -> Result<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let _guard = self.lock.lock();
        fs::create_dir_all(dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(kind.file_name()))?;
        file.write_all(line.as_bytes())?;

        Ok(())
    }

    /// Record an admin action in the activity log.
    pub fn activity(&self, action: Action, details: impl Into<String>) {
        let entry = ActivityEntry {
            timestamp: Utc::now(),
            action,
            details: details.into(),
        };
        self.record(AuditKind::Activity, &entry);
    }
}
