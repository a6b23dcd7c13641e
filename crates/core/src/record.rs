use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal and in-flight states of an acquisition run.
///
/// The only legal transition is `Downloading` into one of the two
/// terminal states. A record is overwritten wholesale on the next
/// run, never edited back to `Downloading`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DumpStatus {
    Downloading,
    Success,
    Failed,
}

/// Persisted metadata for the current/most-recent acquisition run of
/// one source. Exactly one record exists per source id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DumpRecord {
    /// Constant source identifier (e.g. "pharmgkb").
    pub id: String,
    /// Run label, date-granular (`YYYYMMDD`).
    pub timestamp: String,
    /// Destination directory holding the fetched artifact.
    pub data_folder: PathBuf,
    /// Per-run fetch log inside `data_folder`.
    pub logfile: PathBuf,
    /// Remote modification time observed at probe time, when the
    /// resource reported one.
    pub last_modified: Option<DateTime<Utc>>,
    pub status: DumpStatus,
    /// Wall-clock fetch time in seconds; set only once terminal.
    pub duration_secs: Option<f64>,
    /// Signals a downstream uploader that a fresh artifact is ready.
    /// True iff `status` is `Success`.
    pub pending_upload: bool,
}

impl DumpRecord {
    /// A fresh record marking the start of a fetch.
    pub fn started(
        id: &str,
        timestamp: &str,
        data_folder: PathBuf,
        logfile: PathBuf,
        last_modified: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            data_folder,
            logfile,
            last_modified,
            status: DumpStatus::Downloading,
            duration_secs: None,
            pending_upload: false,
        }
    }

    /// Transition to a terminal state with the elapsed fetch time.
    pub fn finish(&mut self, status: DumpStatus, duration_secs: f64) {
        debug_assert!(self.status == DumpStatus::Downloading);
        self.status = status;
        self.duration_secs = Some(duration_secs);
        self.pending_upload = status == DumpStatus::Success;
    }
}
