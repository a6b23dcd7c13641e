//! Run coordinator: the freshness/fetch decision sequence and the
//! run-record lifecycle.
//!
//! One invocation is one run: load the previous record, probe the
//! remote, either skip (nothing newer and the old artifact is still
//! on disk) or mark the record `downloading`, delegate the transfer
//! to the fetcher, and close the record out as `success` or `failed`.
//! Strictly sequential; concurrent runs for the same source are the
//! scheduler's problem, not ours.

use std::time::Instant;

use tracing::{info, warn};

use srcdump_core::{DumpConfig, DumpError, DumpRecord, DumpStatus, DumpStore};

use crate::confirm::ConfirmPolicy;
use crate::fetch::Fetcher;
use crate::probe::Prober;

/// Outcome of a coordinator run. `Failed` carries the fetch tool's
/// exit code and is a normal return, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Skipped,
    Succeeded,
    Failed(i32),
}

/// Drives one acquisition run for a single source.
pub struct Coordinator {
    config: DumpConfig,
    store: DumpStore,
    prober: Box<dyn Prober>,
    fetcher: Box<dyn Fetcher>,
    confirm: Box<dyn ConfirmPolicy>,
}

impl Coordinator {
    pub fn new(
        config: DumpConfig,
        store: DumpStore,
        prober: Box<dyn Prober>,
        fetcher: Box<dyn Fetcher>,
        confirm: Box<dyn ConfirmPolicy>,
    ) -> Self {
        Self {
            config,
            store,
            prober,
            fetcher,
            confirm,
        }
    }

    /// Execute one run end to end.
    ///
    /// Fatal errors (unreachable probe, malformed metadata, dead
    /// storage) propagate without touching the tracking record; a
    /// failed transfer is recorded and returned as `Failed`.
    pub async fn run(&self) -> Result<RunOutcome, DumpError> {
        let source = self.config.source.as_str();
        let existing = self.store.load(source)?;
        let probed = self.prober.probe(&self.config.probe_url).await?;

        // Skip only on an explicit older-or-equal timestamp with the
        // previous artifact still in place. Unknown freshness (no
        // header) always proceeds.
        if let (Some(prev), Some(probed_ts)) = (existing.as_ref(), probed) {
            if let Some(prev_ts) = prev.last_modified {
                if probed_ts <= prev_ts {
                    let artifact = prev.data_folder.join(&self.config.archive_filename);
                    if artifact.exists() {
                        info!(
                            source,
                            last_modified = %prev_ts,
                            artifact = %artifact.display(),
                            "no newer file found, skipping run"
                        );
                        return Ok(RunOutcome::Skipped);
                    }
                }
            }
        }

        let dest = self.config.data_folder();
        if !dest.exists() {
            std::fs::create_dir_all(&dest).map_err(|e| {
                DumpError::StorageUnavailable(format!("{}: {e}", dest.display()))
            })?;
        } else if !dir_is_empty(&dest)?
            && !self
                .confirm
                .confirm(&format!("Destination {} is not empty. Continue?", dest.display()))
        {
            info!(source, dest = %dest.display(), "non-empty destination declined, skipping run");
            return Ok(RunOutcome::Skipped);
        }

        let mut record = DumpRecord::started(
            source,
            &self.config.run_label,
            dest.clone(),
            self.config.logfile(),
            probed,
        );
        self.store.save(&record)?;

        let target = dest.join(&self.config.archive_filename);
        if target.exists() {
            if self
                .confirm
                .confirm(&format!("Remove existing file \"{}\"?", target.display()))
            {
                std::fs::remove_file(&target)?;
            } else {
                // Known gap: the record stays `downloading`, and the
                // next run cannot satisfy the skip check against it,
                // so the fetch is naturally re-attempted.
                warn!(
                    source,
                    target = %target.display(),
                    "existing archive kept, fetch aborted with record left in downloading state"
                );
                return Ok(RunOutcome::Skipped);
            }
        }

        let started = Instant::now();
        let exit_code = self.fetcher.fetch(&self.config.download_url, &target).await?;
        let elapsed = started.elapsed().as_secs_f64();

        if exit_code == 0 {
            record.finish(DumpStatus::Success, elapsed);
            self.store.save(&record)?;
            info!(source, duration_secs = elapsed, "fetch succeeded");
            Ok(RunOutcome::Succeeded)
        } else {
            record.finish(DumpStatus::Failed, elapsed);
            self.store.save(&record)?;
            warn!(source, exit_code, duration_secs = elapsed, "fetch failed");
            Ok(RunOutcome::Failed(exit_code))
        }
    }
}

fn dir_is_empty(dir: &std::path::Path) -> Result<bool, DumpError> {
    Ok(std::fs::read_dir(dir)?.next().is_none())
}
