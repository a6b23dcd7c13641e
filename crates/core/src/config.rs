use std::env;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

const PHARMGKB_GENES_URL: &str =
    "http://www.pharmgkb.org/download.do?objId=genes.zip&dlCls=common";

/// Per-invocation configuration for one acquisition run.
///
/// Everything here is computed fresh when the config is built — in
/// particular `run_label`, so a long-lived scheduler process does not
/// pin all runs to its start date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Source identifier, keys the tracking-store record.
    pub source: String,
    /// Root of the archive tree (`DATA_ARCHIVE_ROOT`).
    pub archive_root: PathBuf,
    /// Metadata-probe URL (HEAD target).
    pub probe_url: String,
    /// Archive download URL.
    pub download_url: String,
    /// Filename of the fetched artifact inside the destination.
    pub archive_filename: String,
    /// Run label, `YYYYMMDD`.
    pub run_label: String,
}

impl DumpConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    ///
    /// The probe and download URLs default to the same resource; they
    /// can be split via `DUMP_PROBE_URL` when the provider exposes a
    /// separate metadata endpoint.
    pub fn from_env() -> Self {
        let download_url = env_or("DUMP_DOWNLOAD_URL", PHARMGKB_GENES_URL);
        Self {
            source: env_or("DUMP_SOURCE", "pharmgkb"),
            archive_root: PathBuf::from(env_or("DATA_ARCHIVE_ROOT", "data")),
            probe_url: env_opt("DUMP_PROBE_URL").unwrap_or_else(|| download_url.clone()),
            download_url,
            archive_filename: env_or("DUMP_ARCHIVE_FILENAME", "genes.zip"),
            run_label: Utc::now().format("%Y%m%d").to_string(),
        }
    }

    /// Destination directory for this run:
    /// `<archive_root>/by_resources/<source>/<run_label>/`.
    pub fn data_folder(&self) -> PathBuf {
        self.archive_root
            .join("by_resources")
            .join(&self.source)
            .join(&self.run_label)
    }

    /// Per-run fetch log: `<data_folder>/<source>_dump.log`.
    pub fn logfile(&self) -> PathBuf {
        self.data_folder().join(format!("{}_dump.log", self.source))
    }

    /// Directory holding the per-source tracking documents.
    pub fn src_dump_dir(&self) -> PathBuf {
        self.archive_root.join("src_dump")
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  source:        {}", self.source);
        tracing::info!("  archive_root:  {}", self.archive_root.display());
        tracing::info!("  probe_url:     {}", self.probe_url);
        tracing::info!("  download_url:  {}", self.download_url);
        tracing::info!("  run_label:     {}", self.run_label);
        tracing::info!("  destination:   {}", self.data_folder().display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> DumpConfig {
        DumpConfig {
            source: "pharmgkb".to_string(),
            archive_root: PathBuf::from("/archive"),
            probe_url: PHARMGKB_GENES_URL.to_string(),
            download_url: PHARMGKB_GENES_URL.to_string(),
            archive_filename: "genes.zip".to_string(),
            run_label: "20240110".to_string(),
        }
    }

    #[test]
    fn data_folder_layout() {
        let cfg = test_config();
        assert_eq!(
            cfg.data_folder(),
            PathBuf::from("/archive/by_resources/pharmgkb/20240110")
        );
    }

    #[test]
    fn logfile_named_after_source() {
        let cfg = test_config();
        assert_eq!(
            cfg.logfile(),
            PathBuf::from("/archive/by_resources/pharmgkb/20240110/pharmgkb_dump.log")
        );
    }

    #[test]
    fn src_dump_dir_under_archive_root() {
        let cfg = test_config();
        assert_eq!(cfg.src_dump_dir(), PathBuf::from("/archive/src_dump"));
    }

    #[test]
    fn run_label_is_date_granular() {
        let cfg = DumpConfig::from_env();
        assert_eq!(cfg.run_label.len(), 8);
        assert!(cfg.run_label.chars().all(|c| c.is_ascii_digit()));
    }
}
