//! pharmgkb-dump — scheduled acquisition of the PharmGKB genes archive.
//!
//! One invocation is one run: probe the download URL's last-modified
//! time, skip if nothing newer is available, otherwise fetch
//! `genes.zip` into the dated archive folder and track the run in the
//! src_dump store. The outcome is pushed to the configured webhook
//! channel best-effort.
//!
//! Exit codes: 0 skip/success, 3 reported fetch failure, 255 fatal.

use std::collections::HashMap;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use srcdump_core::{config, DumpConfig, DumpStore};
use srcdump_dump::{
    AlwaysConfirm, ConfirmPolicy, Coordinator, HttpProber, InteractiveConfirm, RunOutcome,
    WgetFetcher,
};
use srcdump_notify::{Dispatcher, Notification, WebhookNotifier};

// ── CLI ─────────────────────────────────────────────────────────────

/// PharmGKB genes-archive downloader.
#[derive(Parser, Debug)]
#[command(name = "pharmgkb-dump", version, about)]
struct Cli {
    /// Answer every confirmation prompt with yes (unattended
    /// scheduling). Pass `--no-confirm false` for interactive runs.
    #[arg(
        long,
        env = "DUMP_NO_CONFIRM",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    no_confirm: bool,

    /// Webhook URL receiving run-outcome notifications.
    #[arg(long, env = "DUMP_WEBHOOK_URL")]
    webhook_url: Option<String>,
}

// ── Wiring ──────────────────────────────────────────────────────────

fn build_dispatcher(webhook_url: Option<&str>) -> Dispatcher {
    match webhook_url {
        Some(url) => match WebhookNotifier::new(url.to_string(), HashMap::new()) {
            Ok(notifier) => Dispatcher::new(vec![Box::new(notifier)]),
            Err(e) => {
                // Notification is best-effort; a broken channel must
                // not stop the dump itself.
                tracing::warn!(error = %e, "webhook channel misconfigured, notifications disabled");
                Dispatcher::empty()
            }
        },
        None => Dispatcher::empty(),
    }
}

fn build_coordinator(cfg: &DumpConfig, no_confirm: bool) -> anyhow::Result<Coordinator> {
    let store = DumpStore::new(&cfg.src_dump_dir()).context("failed to open tracking store")?;
    let confirm: Box<dyn ConfirmPolicy> = if no_confirm {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(InteractiveConfirm)
    };
    Ok(Coordinator::new(
        cfg.clone(),
        store,
        Box::new(HttpProber::new()),
        Box::new(WgetFetcher::new(cfg.logfile())),
        confirm,
    ))
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    config::load_dotenv();
    let cli = Cli::parse();

    let cfg = DumpConfig::from_env();
    cfg.log_summary();
    let dispatcher = build_dispatcher(cli.webhook_url.as_deref());
    let source = cfg.source.clone();

    let coordinator = match build_coordinator(&cfg, cli.no_confirm) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "startup failed");
            dispatcher
                .dispatch(&Notification::error(
                    format!("\"{source}\" downloader failed"),
                    e.to_string(),
                ))
                .await;
            return ExitCode::from(255);
        }
    };

    match coordinator.run().await {
        Ok(RunOutcome::Skipped) => {
            info!(source, "run skipped");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Succeeded) => {
            dispatcher
                .dispatch(&Notification::info(
                    format!("\"{source}\" downloader finished successfully"),
                    format!("archive stored in {}", cfg.data_folder().display()),
                ))
                .await;
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Failed(code)) => {
            dispatcher
                .dispatch(&Notification::error(
                    format!("\"{source}\" downloader failed"),
                    format!("fetch tool exited with code {code}"),
                ))
                .await;
            ExitCode::from(3)
        }
        Err(e) => {
            error!(source, error = %e, "run aborted");
            dispatcher
                .dispatch(&Notification::error(
                    format!("\"{source}\" downloader failed"),
                    e.to_string(),
                ))
                .await;
            ExitCode::from(255)
        }
    }
}
