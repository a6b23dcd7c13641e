//! Byte-transfer capability.
//!
//! The coordinator never transfers bytes itself; it hands the download
//! URL and target path to a `Fetcher`. The default implementation
//! shells out to wget, mirroring the tool's output into the per-run
//! logfile. A non-zero exit is a reported outcome for the coordinator
//! to record, not an error; only failing to spawn the tool is fatal.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use srcdump_core::DumpError;

/// Capability seam for the actual file transfer.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Transfer `url` into `dest`, returning the transfer tool's exit
    /// code (0 = success).
    async fn fetch(&self, url: &str, dest: &Path) -> Result<i32, DumpError>;
}

/// Fetcher spawning `wget <url> -O <dest>` as an external process.
pub struct WgetFetcher {
    program: String,
    logfile: PathBuf,
}

impl WgetFetcher {
    /// `logfile` receives the tool's stdout and stderr; it is created
    /// on first fetch.
    pub fn new(logfile: PathBuf) -> Self {
        Self {
            program: "wget".to_string(),
            logfile,
        }
    }

    /// Override the spawned program (tests substitute a stub).
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }
}

#[async_trait]
impl Fetcher for WgetFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<i32, DumpError> {
        let log = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.logfile)?;
        let log_err = log.try_clone()?;

        info!(url, dest = %dest.display(), log = %self.logfile.display(), "starting fetch");
        let status = Command::new(&self.program)
            .arg(url)
            .arg("-O")
            .arg(dest)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err))
            .status()
            .await?;

        // Killed-by-signal has no code; report it as a generic failure.
        Ok(status.code().unwrap_or(-1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn zero_exit_reported() {
        let dir = TempDir::new().unwrap();
        let fetcher = WgetFetcher::new(dir.path().join("dump.log")).with_program("true");
        let code = fetcher
            .fetch("http://example.invalid/genes.zip", &dir.path().join("genes.zip"))
            .await
            .unwrap();
        assert_eq!(code, 0);
        assert!(dir.path().join("dump.log").exists());
    }

    #[tokio::test]
    async fn nonzero_exit_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let fetcher = WgetFetcher::new(dir.path().join("dump.log")).with_program("false");
        let code = fetcher
            .fetch("http://example.invalid/genes.zip", &dir.path().join("genes.zip"))
            .await
            .unwrap();
        assert_ne!(code, 0);
    }

    #[tokio::test]
    async fn unspawnable_program_is_fatal() {
        let dir = TempDir::new().unwrap();
        let fetcher = WgetFetcher::new(dir.path().join("dump.log"))
            .with_program("definitely-not-a-real-tool-9921");
        let result = fetcher
            .fetch("http://example.invalid/genes.zip", &dir.path().join("genes.zip"))
            .await;
        assert!(matches!(result, Err(DumpError::Io(_))));
    }
}
