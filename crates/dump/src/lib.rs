//! Scheduled source-archive acquisition.
//!
//! This crate provides:
//! - `Prober` for metadata-only freshness checks against a remote resource
//! - `Fetcher` for the actual byte transfer (wget by default)
//! - `ConfirmPolicy` for attended vs. unattended prompt handling
//! - `Coordinator` tying them together: probe, compare against the
//!   last recorded run, conditionally fetch, and track run state

pub mod confirm;
pub mod coordinator;
pub mod fetch;
pub mod probe;

pub use confirm::{AlwaysConfirm, ConfirmPolicy, InteractiveConfirm};
pub use coordinator::{Coordinator, RunOutcome};
pub use fetch::{Fetcher, WgetFetcher};
pub use probe::{HttpProber, Prober};
