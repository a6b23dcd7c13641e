//! Tracking store for per-source dump records.
//!
//! One JSON document per source id, stored as `<id>.json` under the
//! store directory. Writes go through a temp file and rename so a
//! crashed run never leaves a half-written document behind.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DumpError;
use crate::record::DumpRecord;

/// Document store holding one `DumpRecord` per source id.
pub struct DumpStore {
    dir: PathBuf,
}

impl DumpStore {
    /// Open (and create if needed) the store directory.
    pub fn new(dir: &Path) -> Result<Self, DumpError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn doc_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Load the record for a source. `None` means no run has been
    /// recorded yet — a valid first-run state.
    pub fn load(&self, id: &str) -> Result<Option<DumpRecord>, DumpError> {
        let path = self.doc_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)?;
        let record: DumpRecord = serde_json::from_str(&raw)
            .map_err(|e| DumpError::Store(format!("corrupt record {}: {e}", path.display())))?;
        Ok(Some(record))
    }

    /// Overwrite the record for `record.id` atomically.
    pub fn save(&self, record: &DumpRecord) -> Result<(), DumpError> {
        let path = self.doc_path(&record.id);
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| DumpError::Store(format!("failed to encode record: {e}")))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        debug!(id = %record.id, path = %path.display(), status = ?record.status, "record saved");
        Ok(())
    }
}
